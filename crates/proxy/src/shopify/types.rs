//! Domain types returned by the Admin API client.
//!
//! These are the converted, query-independent shapes the resolver works on.

use inventory_proxy_core::{InventoryRecord, PageInfo, VariantInventory};

/// One page of inventory levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryLevelPage {
    /// Records in this page.
    pub records: Vec<InventoryRecord>,
    /// Pagination info.
    pub page_info: PageInfo,
}

/// A variant together with one page of its inventory levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantLevels {
    /// Variant GID.
    pub variant_id: String,
    /// Variant title.
    pub variant_title: String,
    /// Variant SKU.
    pub sku: Option<String>,
    /// The fetched page of inventory levels.
    pub levels: InventoryLevelPage,
}

impl VariantLevels {
    /// Append a further page of levels.
    ///
    /// Records for a location already present are dropped, so the result keeps
    /// at most one record per location.
    pub fn extend(&mut self, page: InventoryLevelPage) {
        for record in page.records {
            let seen = self
                .levels
                .records
                .iter()
                .any(|r| r.location_id == record.location_id);
            if !seen {
                self.levels.records.push(record);
            }
        }
        self.levels.page_info = page.page_info;
    }

    /// Convert into the resolver's output type.
    #[must_use]
    pub fn into_inventory(self) -> VariantInventory {
        VariantInventory {
            variant_id: self.variant_id,
            variant_title: self.variant_title,
            sku: self.sku,
            records: self.levels.records,
        }
    }
}

/// One page of a product's variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductVariantPage {
    /// Variants in this page, in upstream order.
    pub variants: Vec<VariantLevels>,
    /// Pagination info for the variants connection.
    pub page_info: PageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(location: &str, quantity: i64) -> InventoryRecord {
        InventoryRecord {
            id: format!("gid://shopify/InventoryLevel/{location}"),
            location_id: format!("gid://shopify/Location/{location}"),
            location_name: format!("Location {location}"),
            available_quantity: quantity,
        }
    }

    #[test]
    fn test_extend_appends_and_advances_page_info() {
        let mut variant = VariantLevels {
            variant_id: "gid://shopify/ProductVariant/1".to_string(),
            variant_title: "Small".to_string(),
            sku: None,
            levels: InventoryLevelPage {
                records: vec![record("1", 4)],
                page_info: PageInfo {
                    has_next_page: true,
                    end_cursor: Some("c1".to_string()),
                },
            },
        };

        variant.extend(InventoryLevelPage {
            records: vec![record("2", 6)],
            page_info: PageInfo::default(),
        });

        assert_eq!(variant.levels.records, vec![record("1", 4), record("2", 6)]);
        assert!(!variant.levels.page_info.has_next_page);
    }

    #[test]
    fn test_extend_ignores_duplicate_locations() {
        let mut variant = VariantLevels {
            variant_id: "gid://shopify/ProductVariant/1".to_string(),
            variant_title: "Small".to_string(),
            sku: None,
            levels: InventoryLevelPage {
                records: vec![record("1", 4)],
                page_info: PageInfo::default(),
            },
        };

        variant.extend(InventoryLevelPage {
            records: vec![record("1", 99)],
            page_info: PageInfo::default(),
        });

        assert_eq!(variant.into_inventory().records, vec![record("1", 4)]);
    }
}
