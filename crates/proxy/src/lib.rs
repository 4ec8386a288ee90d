//! Inventory proxy library.
//!
//! A read-only HTTP service that answers "how many units of this variant (or
//! of every variant of this product) are available at this location?" by
//! querying the Shopify Admin GraphQL API.
//!
//! This crate provides the proxy as a library, allowing it to be tested and
//! embedded; the `inventory-proxy` binary wires it to a listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;

pub use routes::app;
pub use state::AppState;
