//! Persistence gateways for the product inventory.
//!
//! The [`ProductStore`] trait is the shared contract; two gateways implement
//! it: [`JsonStore`] (one JSON document holding every record) and
//! [`PostgresStore`] (base table plus one subtype table per category).
//! Outcomes are typed — callers branch on [`InventoryError`] variants, never
//! on message text.

use async_trait::async_trait;

use almacen_core::{InventoryError, InventoryResult, ProductCode};
use almacen_products::Product;

pub mod config;
pub mod json;
pub mod postgres;

pub use config::DatabaseConfig;
pub use json::JsonStore;
pub use postgres::PostgresStore;

/// Repository contract shared by both persistence gateways.
///
/// Operations are sequential and self-contained: each call performs its own
/// full load/save cycle (document variant) or its own transaction
/// (relational variant). No locking is provided; the system is designed for
/// single-process, single-user use.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persist a new product.
    ///
    /// Fails with [`InventoryError::Conflict`] if a record with the same
    /// code already exists; the existing record is left unchanged.
    async fn create(&self, product: &Product) -> InventoryResult<()>;

    /// Look up a product by code, reconstructing its subtype from the
    /// stored discriminator. Fails with [`InventoryError::NotFound`] if the
    /// code is absent.
    async fn get(&self, code: &ProductCode) -> InventoryResult<Product>;

    /// Overwrite the stored quantity for a code.
    ///
    /// The new quantity is held to the same strictly-positive rule as
    /// construction. Fails with [`InventoryError::NotFound`] if the code is
    /// absent; the store is untouched.
    async fn update_quantity(&self, code: &ProductCode, quantity: u32) -> InventoryResult<()>;

    /// Remove a product by code (cascading through subtype storage in the
    /// relational variant). Fails with [`InventoryError::NotFound`] if the
    /// code is absent.
    async fn delete(&self, code: &ProductCode) -> InventoryResult<()>;

    /// Every stored record, reconstructed into its subtype, ordered by code.
    async fn list(&self) -> InventoryResult<Vec<Product>>;
}

pub(crate) fn storage_error(op: &str, err: impl core::fmt::Display) -> InventoryError {
    InventoryError::storage(format!("{op}: {err}"))
}
