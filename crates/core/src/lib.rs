//! Inventory Proxy Core - Shared types library.
//!
//! This crate provides the types shared between the proxy service and its
//! integration tests:
//! - [`ShopifyGid`] - validated Shopify global identifiers
//! - [`InventoryRecord`] / [`VariantInventory`] - resolved inventory at a location
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O and no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
