//! Conversions from query response shapes to client domain types.

use inventory_proxy_core::{InventoryRecord, PageInfo};

use crate::shopify::types::{InventoryLevelPage, ProductVariantPage, VariantLevels};

use super::queries::{common, product_variants_inventory, variant_inventory_levels};

/// Quantity name requested from `quantities(names: [...])`.
const AVAILABLE: &str = "available";

// =============================================================================
// Shared conversions
// =============================================================================

fn convert_page_info(page_info: common::PageInfo) -> PageInfo {
    PageInfo {
        has_next_page: page_info.has_next_page,
        end_cursor: page_info.end_cursor,
    }
}

fn convert_inventory_level(node: common::InventoryLevelNode) -> InventoryRecord {
    // Absent quantity means nothing is recorded as available
    let available_quantity = node
        .quantities
        .unwrap_or_default()
        .into_iter()
        .find(|q| q.name == AVAILABLE)
        .and_then(|q| q.quantity)
        .unwrap_or(0);

    InventoryRecord {
        id: node.id,
        location_name: node.location.name.unwrap_or_default(),
        location_id: node.location.id,
        available_quantity,
    }
}

/// A variant without an inventory item has no levels at all.
fn convert_inventory_item(item: Option<common::InventoryItem>) -> InventoryLevelPage {
    item.map_or_else(InventoryLevelPage::default, |item| InventoryLevelPage {
        records: item
            .inventory_levels
            .edges
            .into_iter()
            .map(|e| convert_inventory_level(e.node))
            .collect(),
        page_info: convert_page_info(item.inventory_levels.page_info),
    })
}

// =============================================================================
// VariantInventoryLevels conversions
// =============================================================================

pub fn convert_variant_levels(
    variant: variant_inventory_levels::ProductVariant,
) -> VariantLevels {
    VariantLevels {
        variant_id: variant.id,
        variant_title: variant.title.unwrap_or_default(),
        sku: variant.sku,
        levels: convert_inventory_item(variant.inventory_item),
    }
}

// =============================================================================
// ProductVariantsInventory conversions
// =============================================================================

pub fn convert_product_variant_page(
    product: product_variants_inventory::Product,
) -> ProductVariantPage {
    ProductVariantPage {
        variants: product
            .variants
            .edges
            .into_iter()
            .map(|e| convert_product_variant(e.node))
            .collect(),
        page_info: convert_page_info(product.variants.page_info),
    }
}

fn convert_product_variant(node: product_variants_inventory::VariantNode) -> VariantLevels {
    VariantLevels {
        variant_id: node.id,
        variant_title: node.title.unwrap_or_default(),
        sku: node.sku,
        levels: convert_inventory_item(node.inventory_item),
    }
}
