//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::services::InventoryResolver;
use crate::shopify::{AdminClient, ShopifyError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It holds no per-request or
/// mutable data; every lookup is independent.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ProxyConfig,
    resolver: InventoryResolver,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Admin API HTTP client cannot be built.
    pub fn new(config: ProxyConfig) -> Result<Self, ShopifyError> {
        let client = AdminClient::new(&config.shopify)?;
        let resolver = InventoryResolver::new(client, config.resolver);

        Ok(Self {
            inner: Arc::new(AppStateInner { config, resolver }),
        })
    }

    /// Get a reference to the proxy configuration.
    #[must_use]
    pub fn config(&self) -> &ProxyConfig {
        &self.inner.config
    }

    /// Get a reference to the inventory resolver.
    #[must_use]
    pub fn resolver(&self) -> &InventoryResolver {
        &self.inner.resolver
    }
}
