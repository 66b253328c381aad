//! Domain error model.

use thiserror::Error;

use crate::code::ProductCode;

/// Result type used across the inventory layers.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory-level error.
///
/// Every store operation resolves to one of these variants so callers can
/// branch programmatically instead of parsing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// A value failed validation (e.g. malformed price or quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// No record exists for the given code; the operation was a no-op.
    #[error("product {0} not found")]
    NotFound(ProductCode),

    /// A record with the given code already exists; it was left unchanged.
    #[error("product {0} already exists")]
    Conflict(ProductCode),

    /// The backing store failed (I/O, serialization, database). The intended
    /// mutation did not complete.
    #[error("storage error: {0}")]
    Storage(String),
}

impl InventoryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(code: impl Into<ProductCode>) -> Self {
        Self::NotFound(code.into())
    }

    pub fn conflict(code: impl Into<ProductCode>) -> Self {
        Self::Conflict(code.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
