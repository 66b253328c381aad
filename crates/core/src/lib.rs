//! `almacen-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod code;
pub mod error;

pub use code::ProductCode;
pub use error::{InventoryError, InventoryResult};
