//! Inventory domain types produced by the resolver.

use serde::{Deserialize, Serialize};

use super::gid::{ResourceKind, ShopifyGid};

/// Pagination info attached to every paginated upstream collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether more items exist after this page.
    pub has_next_page: bool,
    /// Cursor of the last item in this page.
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Returns the cursor to request the next page with, if there is one.
    ///
    /// A page that claims more items but carries no cursor yields `None`;
    /// callers must treat that as a broken pagination rather than the end.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_next_page {
            self.end_cursor.as_deref()
        } else {
            None
        }
    }
}

/// Inventory of one variant at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    /// Inventory level ID.
    pub id: String,
    /// Location GID.
    pub location_id: String,
    /// Location display name.
    pub location_name: String,
    /// Quantity available for sale (0 when the upstream omits it).
    pub available_quantity: i64,
}

/// Inventory records for a single product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInventory {
    /// Variant GID.
    pub variant_id: String,
    /// Variant title (e.g. "Small / Red").
    pub variant_title: String,
    /// Variant SKU, if one is set.
    pub sku: Option<String>,
    /// At most one record per distinct location.
    pub records: Vec<InventoryRecord>,
}

impl VariantInventory {
    /// Narrow this variant to the record at `location_id`.
    ///
    /// Returns `None` when the variant has no record at that location.
    #[must_use]
    pub fn at_location(self, location_id: &ShopifyGid) -> Option<Self> {
        let record = self
            .records
            .into_iter()
            .find(|r| r.location_id == location_id.as_str())?;

        Some(Self {
            variant_id: self.variant_id,
            variant_title: self.variant_title,
            sku: self.sku,
            records: vec![record],
        })
    }
}

/// What an inventory lookup starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupSubject {
    /// A single variant; a missing record is an error.
    Variant(ShopifyGid),
    /// Every variant of a product; variants without a record are omitted.
    Product(ShopifyGid),
}

impl LookupSubject {
    /// Returns the subject's GID.
    #[must_use]
    pub const fn id(&self) -> &ShopifyGid {
        match self {
            Self::Variant(id) | Self::Product(id) => id,
        }
    }

    /// Returns the resource kind this subject's GID must have.
    #[must_use]
    pub const fn expected_kind(&self) -> ResourceKind {
        match self {
            Self::Variant(_) => ResourceKind::ProductVariant,
            Self::Product(_) => ResourceKind::Product,
        }
    }
}
