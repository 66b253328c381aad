//! Products domain module.
//!
//! This crate contains the validated product entity model, implemented purely
//! as deterministic domain logic (no IO, no storage).

pub mod product;
pub mod record;

pub use product::{Category, Product, parse_price, parse_quantity, validate_price, validate_quantity};
pub use record::ProductRecord;
