//! Shopify Admin API client (read-only inventory access).
//!
//! # Security
//!
//! The Admin API access token grants access to the whole store. The proxy
//! only ever issues the two read-only inventory queries defined in
//! [`admin::queries`], and always binds caller input as GraphQL variables.
//!
//! # Example
//!
//! ```rust,ignore
//! use inventory_proxy::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify)?;
//!
//! // First page of a variant's inventory levels
//! let page = client
//!     .get_variant_inventory_levels("gid://shopify/ProductVariant/111", 50, None)
//!     .await?;
//! ```

pub mod admin;
pub mod types;

pub use admin::AdminClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with Shopify Admin API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Non-success HTTP status without a GraphQL payload.
    #[error("Upstream returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// The response was well formed but broke the pagination contract.
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    /// The lookup did not finish within its time budget.
    #[error("Upstream timed out after {0} seconds")]
    Timeout(u64),
}

impl ShopifyError {
    /// Whether a fresh attempt of the same request may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(err) => err.is_connect() || err.is_timeout(),
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Upstream GraphQL error messages, verbatim.
    #[must_use]
    pub fn graphql_messages(&self) -> Vec<String> {
        match self {
            Self::GraphQL(errors) => errors.iter().map(|e| e.message.clone()).collect(),
            _ => Vec::new(),
        }
    }
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}
