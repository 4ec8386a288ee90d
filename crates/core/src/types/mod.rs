//! Core types for the inventory proxy.
//!
//! This module provides type-safe wrappers for the identifiers and inventory
//! records passed between the HTTP layer and the resolver.

pub mod gid;
pub mod inventory;

pub use gid::{GidError, ResourceKind, ShopifyGid};
pub use inventory::{InventoryRecord, LookupSubject, PageInfo, VariantInventory};
