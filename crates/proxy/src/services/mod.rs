//! Business logic services.
//!
//! - [`inventory`] - inventory resolution at a single location

pub mod inventory;

pub use inventory::{InventoryResolver, ResolveError};
