//! Strongly-typed product identifier.

use serde::{Deserialize, Serialize};

/// Unique identifier of a product record within a store.
///
/// Codes are kept as strings end to end: the JSON document keys its records
/// by the string form, and the relational schema stores `codigo` as text.
/// Numeric input is accepted and normalized to its decimal string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCode(String);

impl ProductCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<String> for ProductCode {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProductCode {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<i64> for ProductCode {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<ProductCode> for String {
    fn from(value: ProductCode) -> Self {
        value.0
    }
}

impl AsRef<str> for ProductCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
