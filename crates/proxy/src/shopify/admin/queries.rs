//! GraphQL query definitions for Shopify Admin API.
//!
//! Each query implements [`GraphQLQuery`] by hand instead of through the
//! derive macro: the proxy needs two read-only queries, and hand-written
//! response types let every field the resolver does not depend on stay
//! optional. Caller-supplied identifiers only ever travel as variables.

use graphql_client::{GraphQLQuery, QueryBody};

// =============================================================================
// Shared response shapes
// =============================================================================

/// Response shapes shared by both inventory queries.
pub mod common {
    use serde::Deserialize;

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PageInfo {
        pub has_next_page: bool,
        #[serde(default)]
        pub end_cursor: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InventoryItem {
        pub inventory_levels: InventoryLevelConnection,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InventoryLevelConnection {
        pub edges: Vec<InventoryLevelEdge>,
        pub page_info: PageInfo,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct InventoryLevelEdge {
        pub node: InventoryLevelNode,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct InventoryLevelNode {
        pub id: String,
        pub location: InventoryLevelLocation,
        #[serde(default)]
        pub quantities: Option<Vec<InventoryQuantity>>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct InventoryLevelLocation {
        pub id: String,
        #[serde(default)]
        pub name: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct InventoryQuantity {
        pub name: String,
        #[serde(default)]
        pub quantity: Option<i64>,
    }
}

// =============================================================================
// Variant inventory levels
// =============================================================================

/// One page of inventory levels for a single variant.
pub struct VariantInventoryLevels;

pub mod variant_inventory_levels {
    use serde::{Deserialize, Serialize};

    use super::common::InventoryItem;

    pub const OPERATION_NAME: &str = "VariantInventoryLevels";
    pub const QUERY: &str = r#"query VariantInventoryLevels($id: ID!, $first: Int!, $after: String) {
  productVariant(id: $id) {
    id
    title
    sku
    inventoryItem {
      inventoryLevels(first: $first, after: $after) {
        edges {
          node {
            id
            location {
              id
              name
            }
            quantities(names: ["available"]) {
              name
              quantity
            }
          }
        }
        pageInfo {
          hasNextPage
          endCursor
        }
      }
    }
  }
}
"#;

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub id: String,
        pub first: i64,
        pub after: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_variant: Option<ProductVariant>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductVariant {
        pub id: String,
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub sku: Option<String>,
        #[serde(default)]
        pub inventory_item: Option<InventoryItem>,
    }
}

impl GraphQLQuery for VariantInventoryLevels {
    type Variables = variant_inventory_levels::Variables;
    type ResponseData = variant_inventory_levels::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: variant_inventory_levels::QUERY,
            operation_name: variant_inventory_levels::OPERATION_NAME,
        }
    }
}

// =============================================================================
// Product variants with inline inventory levels
// =============================================================================

/// One page of a product's variants, each with its first page of inventory levels.
pub struct ProductVariantsInventory;

pub mod product_variants_inventory {
    use serde::{Deserialize, Serialize};

    use super::common::{InventoryItem, PageInfo};

    pub const OPERATION_NAME: &str = "ProductVariantsInventory";
    pub const QUERY: &str = r#"query ProductVariantsInventory($id: ID!, $first: Int!, $after: String, $levelsFirst: Int!) {
  product(id: $id) {
    variants(first: $first, after: $after) {
      edges {
        node {
          id
          title
          sku
          inventoryItem {
            inventoryLevels(first: $levelsFirst) {
              edges {
                node {
                  id
                  location {
                    id
                    name
                  }
                  quantities(names: ["available"]) {
                    name
                    quantity
                  }
                }
              }
              pageInfo {
                hasNextPage
                endCursor
              }
            }
          }
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}
"#;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub id: String,
        pub first: i64,
        pub after: Option<String>,
        pub levels_first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<Product>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Product {
        pub variants: VariantConnection,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct VariantConnection {
        pub edges: Vec<VariantEdge>,
        pub page_info: PageInfo,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct VariantEdge {
        pub node: VariantNode,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct VariantNode {
        pub id: String,
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub sku: Option<String>,
        #[serde(default)]
        pub inventory_item: Option<InventoryItem>,
    }
}

impl GraphQLQuery for ProductVariantsInventory {
    type Variables = product_variants_inventory::Variables;
    type ResponseData = product_variants_inventory::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: product_variants_inventory::QUERY,
            operation_name: product_variants_inventory::OPERATION_NAME,
        }
    }
}
