//! Inventory lookup operations for the Admin API.

use tracing::instrument;

use super::{
    AdminClient, ShopifyError,
    conversions::{convert_product_variant_page, convert_variant_levels},
    queries::{
        ProductVariantsInventory, VariantInventoryLevels, product_variants_inventory,
        variant_inventory_levels,
    },
};
use crate::shopify::types::{ProductVariantPage, VariantLevels};

impl AdminClient {
    /// Get one page of a variant's inventory levels.
    ///
    /// # Arguments
    ///
    /// * `variant_id` - Shopify variant GID (e.g., `gid://shopify/ProductVariant/123`)
    /// * `first` - Number of inventory levels to return
    /// * `after` - Cursor for pagination
    ///
    /// Returns `None` if the variant does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(variant_id = %variant_id))]
    pub async fn get_variant_inventory_levels(
        &self,
        variant_id: &str,
        first: i64,
        after: Option<String>,
    ) -> Result<Option<VariantLevels>, ShopifyError> {
        let variables = variant_inventory_levels::Variables {
            id: variant_id.to_string(),
            first,
            after,
        };

        let response = self.execute::<VariantInventoryLevels>(variables).await?;

        Ok(response.product_variant.map(convert_variant_levels))
    }

    /// Get one page of a product's variants, each with its first page of
    /// inventory levels.
    ///
    /// # Arguments
    ///
    /// * `product_id` - Shopify product GID (e.g., `gid://shopify/Product/123`)
    /// * `first` - Number of variants to return
    /// * `after` - Cursor for pagination
    /// * `levels_first` - Number of inventory levels to return per variant
    ///
    /// Returns `None` if the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product_variants(
        &self,
        product_id: &str,
        first: i64,
        after: Option<String>,
        levels_first: i64,
    ) -> Result<Option<ProductVariantPage>, ShopifyError> {
        let variables = product_variants_inventory::Variables {
            id: product_id.to_string(),
            first,
            after,
            levels_first,
        };

        let response = self.execute::<ProductVariantsInventory>(variables).await?;

        Ok(response.product.map(convert_product_variant_page))
    }
}
