//! Document gateway: one JSON file holding every record.
//!
//! The file contains a single JSON object whose top-level keys are product
//! codes and whose values are flat [`ProductRecord`] objects. Every
//! operation is its own load-mutate-save cycle; saves rewrite the whole
//! document through a temp file renamed over the target, so a crash
//! mid-write leaves the previous contents intact.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use async_trait::async_trait;
use tracing::debug;

use almacen_core::{InventoryError, InventoryResult, ProductCode};
use almacen_products::{Product, ProductRecord, validate_quantity};

use crate::{ProductStore, storage_error};

/// JSON-document-backed product store.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full record set. A missing file is an empty store, not an
    /// error; anything else that goes wrong reading or parsing is fatal to
    /// the call.
    fn load(&self) -> InventoryResult<BTreeMap<String, ProductRecord>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| storage_error(&format!("parse {}", self.path.display()), e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(storage_error(&format!("read {}", self.path.display()), e)),
        }
    }

    /// Rewrite the full document from the in-memory record set.
    fn save(&self, records: &BTreeMap<String, ProductRecord>) -> InventoryResult<()> {
        let contents = serde_json::to_string_pretty(records)
            .map_err(|e| storage_error("serialize records", e))?;
        self.write_atomic(contents.as_bytes())
            .map_err(|e| storage_error(&format!("write {}", self.path.display()), e))
    }

    /// Write to a sibling temp file, then rename over the target.
    fn write_atomic(&self, contents: &[u8]) -> io::Result<()> {
        let mut tmp_name = OsString::from(self.path.as_os_str());
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)
    }
}

#[async_trait]
impl ProductStore for JsonStore {
    async fn create(&self, product: &Product) -> InventoryResult<()> {
        let mut records = self.load()?;
        let code = product.code();
        if records.contains_key(code.as_str()) {
            return Err(InventoryError::conflict(code.clone()));
        }
        records.insert(code.as_str().to_owned(), ProductRecord::from(product));
        self.save(&records)?;
        debug!(code = %code, "product created");
        Ok(())
    }

    async fn get(&self, code: &ProductCode) -> InventoryResult<Product> {
        let mut records = self.load()?;
        match records.remove(code.as_str()) {
            Some(record) => Product::try_from(record),
            None => Err(InventoryError::not_found(code.clone())),
        }
    }

    async fn update_quantity(&self, code: &ProductCode, quantity: u32) -> InventoryResult<()> {
        let quantity = validate_quantity(quantity)?;
        let mut records = self.load()?;
        match records.get_mut(code.as_str()) {
            Some(record) => record.cantidad = quantity,
            None => return Err(InventoryError::not_found(code.clone())),
        }
        self.save(&records)?;
        debug!(code = %code, quantity, "quantity updated");
        Ok(())
    }

    async fn delete(&self, code: &ProductCode) -> InventoryResult<()> {
        let mut records = self.load()?;
        if records.remove(code.as_str()).is_none() {
            return Err(InventoryError::not_found(code.clone()));
        }
        self.save(&records)?;
        debug!(code = %code, "product deleted");
        Ok(())
    }

    async fn list(&self) -> InventoryResult<Vec<Product>> {
        // BTreeMap keys keep the listing ordered by code.
        self.load()?
            .into_values()
            .map(Product::try_from)
            .collect()
    }
}
