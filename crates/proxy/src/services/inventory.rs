//! Inventory resolution at a single location.
//!
//! Walks the Admin API's nested pagination (variants under a product,
//! inventory levels under a variant) and narrows each variant to the record
//! at the requested location.
//!
//! # Guarantees
//!
//! - Every page of every collection is fetched before a result is returned;
//!   an error on any page fails the whole lookup.
//! - Location matching is exact equality on the canonical location GID.
//! - The whole lookup is bounded by [`ResolverConfig::timeout`].

use std::collections::HashSet;

use futures::{StreamExt, TryStreamExt, stream};
use inventory_proxy_core::{
    LookupSubject, PageInfo, ResourceKind, ShopifyGid, VariantInventory,
};
use thiserror::Error;
use tracing::instrument;

use crate::config::ResolverConfig;
use crate::shopify::{AdminClient, ShopifyError, VariantLevels};

/// Errors that can occur while resolving inventory.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The caller's input is missing or malformed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A single-variant lookup found no record at the location.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The Admin API failed, was unreachable, or timed out.
    #[error("Upstream error: {0}")]
    Upstream(#[from] ShopifyError),
}

/// Resolves inventory for a variant or product at one location.
#[derive(Clone)]
pub struct InventoryResolver {
    client: AdminClient,
    config: ResolverConfig,
}

impl InventoryResolver {
    /// Create a resolver over an Admin API client.
    #[must_use]
    pub const fn new(client: AdminClient, config: ResolverConfig) -> Self {
        Self { client, config }
    }

    /// Resolve inventory for `subject` at `location_id`.
    ///
    /// A `Variant` subject yields exactly one entry or fails with `NotFound`.
    /// A `Product` subject yields one entry per variant stocked at the
    /// location, in upstream order, and may be empty.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if an identifier names the wrong resource kind
    /// - `NotFound` if a single variant has no record at the location
    /// - `Upstream` on any Admin API failure or when the time budget runs out
    #[instrument(skip(self, subject, location_id), fields(subject = %subject.id(), location_id = %location_id))]
    pub async fn resolve(
        &self,
        subject: &LookupSubject,
        location_id: &ShopifyGid,
    ) -> Result<Vec<VariantInventory>, ResolveError> {
        validate_kinds(subject, location_id)?;

        let lookup = async {
            match subject {
                LookupSubject::Variant(id) => self
                    .resolve_variant(id, location_id)
                    .await
                    .map(|variant| vec![variant]),
                LookupSubject::Product(id) => self.resolve_product(id, location_id).await,
            }
        };

        let budget = self.config.timeout;
        let resolved = tokio::time::timeout(budget, lookup).await.map_err(|_| {
            tracing::warn!(timeout_secs = budget.as_secs(), "Inventory lookup timed out");
            ResolveError::Upstream(ShopifyError::Timeout(budget.as_secs()))
        })??;

        tracing::info!(matched = resolved.len(), "Inventory resolved");
        Ok(resolved)
    }

    async fn resolve_variant(
        &self,
        variant_id: &ShopifyGid,
        location_id: &ShopifyGid,
    ) -> Result<VariantInventory, ResolveError> {
        let Some(mut variant) = self
            .client
            .get_variant_inventory_levels(variant_id.as_str(), self.config.levels_page_size, None)
            .await?
        else {
            return Err(ResolveError::NotFound(format!(
                "Variant {variant_id} not found"
            )));
        };

        self.drain_levels(&mut variant).await?;

        variant
            .into_inventory()
            .at_location(location_id)
            .ok_or_else(|| {
                ResolveError::NotFound(format!(
                    "No inventory for variant {variant_id} at location {location_id}"
                ))
            })
    }

    async fn resolve_product(
        &self,
        product_id: &ShopifyGid,
        location_id: &ShopifyGid,
    ) -> Result<Vec<VariantInventory>, ResolveError> {
        let mut matched = Vec::new();
        let mut after: Option<String> = None;
        let mut cursors = CursorTrail::default();
        let mut pages: usize = 0;

        loop {
            let page = self
                .client
                .get_product_variants(
                    product_id.as_str(),
                    self.config.variants_page_size,
                    after.clone(),
                    self.config.levels_page_size,
                )
                .await?;

            let Some(page) = page else {
                if pages == 0 {
                    tracing::warn!("Product not found, no variants to report");
                    return Ok(Vec::new());
                }
                return Err(ShopifyError::InvalidResponse(format!(
                    "product {product_id} disappeared during pagination"
                ))
                .into());
            };
            pages += 1;

            tracing::debug!(
                page = pages,
                variants = page.variants.len(),
                "Fetched product variant page"
            );

            matched.extend(self.complete_variants(page.variants, location_id).await?);

            match cursors.advance(&page.page_info, product_id.as_str())? {
                Some(cursor) => after = Some(cursor),
                None => break,
            }
        }

        Ok(matched)
    }

    /// Fetch outstanding level pages for a batch of variants and narrow each
    /// to the location, keeping upstream order.
    async fn complete_variants(
        &self,
        variants: Vec<VariantLevels>,
        location_id: &ShopifyGid,
    ) -> Result<Vec<VariantInventory>, ShopifyError> {
        let narrowed: Vec<Option<VariantInventory>> = stream::iter(variants)
            .map(|mut variant| async move {
                self.drain_levels(&mut variant).await?;
                Ok::<_, ShopifyError>(variant.into_inventory().at_location(location_id))
            })
            .buffered(self.config.concurrency)
            .try_collect()
            .await?;

        Ok(narrowed.into_iter().flatten().collect())
    }

    /// Fetch the remaining inventory level pages of a variant.
    async fn drain_levels(&self, variant: &mut VariantLevels) -> Result<(), ShopifyError> {
        let mut cursors = CursorTrail::default();

        while let Some(cursor) = cursors.advance(&variant.levels.page_info, &variant.variant_id)? {
            let page = self
                .client
                .get_variant_inventory_levels(
                    &variant.variant_id,
                    self.config.levels_page_size,
                    Some(cursor),
                )
                .await?
                .ok_or_else(|| {
                    ShopifyError::InvalidResponse(format!(
                        "variant {} disappeared during pagination",
                        variant.variant_id
                    ))
                })?;

            tracing::debug!(
                variant_id = %variant.variant_id,
                levels = page.levels.records.len(),
                "Fetched inventory level page"
            );

            variant.extend(page.levels);
        }

        Ok(())
    }
}

/// Reject identifiers of the wrong resource kind before any upstream call.
fn validate_kinds(subject: &LookupSubject, location_id: &ShopifyGid) -> Result<(), ResolveError> {
    if subject.id().kind() != subject.expected_kind() {
        return Err(ResolveError::InvalidRequest(format!(
            "expected a {} identifier, got {}",
            subject.expected_kind(),
            subject.id()
        )));
    }

    if location_id.kind() != ResourceKind::Location {
        return Err(ResolveError::InvalidRequest(format!(
            "expected a Location identifier, got {location_id}"
        )));
    }

    Ok(())
}

/// Cursors already handed out by one paginated collection.
///
/// A page that reports more items must carry a cursor never seen before in
/// the same walk; a missing or recurring cursor would truncate or loop the
/// walk, so both are errors.
#[derive(Debug, Default)]
struct CursorTrail {
    seen: HashSet<String>,
}

impl CursorTrail {
    /// Cursor for the page after `page_info`, or `None` at the end.
    fn advance(&mut self, page_info: &PageInfo, owner: &str) -> Result<Option<String>, ShopifyError> {
        if !page_info.has_next_page {
            return Ok(None);
        }

        let cursor = page_info.next_cursor().ok_or_else(|| {
            ShopifyError::InvalidResponse(format!("{owner} reports more pages without a cursor"))
        })?;

        if !self.seen.insert(cursor.to_string()) {
            return Err(ShopifyError::InvalidResponse(format!(
                "{owner} returned cursor '{cursor}' twice"
            )));
        }

        Ok(Some(cursor.to_string()))
    }
}
