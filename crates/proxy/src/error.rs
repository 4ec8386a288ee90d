//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures upstream failures to
//! Sentry before responding to the client. Every error response is JSON:
//! `{ "error": "..." }`, plus `"details"` when Shopify returned GraphQL errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::ResolveError;
use crate::shopify::ShopifyError;

/// Application-level error type for the proxy.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),

    /// No inventory record for the requested variant and location.
    #[error("{0}")]
    NotFound(String),

    /// Shopify Admin API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::InvalidRequest(msg) => Self::BadRequest(msg),
            ResolveError::NotFound(msg) => Self::NotFound(msg),
            ResolveError::Upstream(err) => Self::Shopify(err),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Shopify(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture upstream failures to Sentry
        if let Self::Shopify(err) = &self {
            let event_id = sentry::capture_error(err);
            tracing::error!(
                error = %err,
                sentry_event_id = %event_id,
                "Upstream request failed"
            );
        }

        let details = match &self {
            Self::Shopify(err) => err.graphql_messages(),
            _ => Vec::new(),
        };

        let body = ErrorBody {
            error: self.to_string(),
            details,
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
