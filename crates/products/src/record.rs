//! Flat wire record shared by both persistence gateways.
//!
//! The field names are the persisted layout and must not change: the JSON
//! document stores one of these objects per code, and the relational columns
//! carry the same names. Exactly one of `vencimiento` (perishable) or
//! `garantia` (electronic) is present; its presence is the subtype
//! discriminator, with `vencimiento` checked first.

use serde::{Deserialize, Serialize};

use almacen_core::{InventoryError, InventoryResult};

use crate::product::{Category, Product};

/// Serialized form of a [`Product`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub codigo: String,
    pub nombre: String,
    pub marca: String,
    pub precio: f64,
    pub cantidad: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vencimiento: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garantia: Option<u32>,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        let (vencimiento, garantia) = match product.category() {
            Category::Perishable { expiration_months } => (Some(expiration_months), None),
            Category::Electronic { warranty_months } => (None, Some(warranty_months)),
        };
        Self {
            codigo: product.code().as_str().to_owned(),
            nombre: product.name().to_owned(),
            marca: product.brand().to_owned(),
            precio: product.price(),
            cantidad: product.quantity(),
            vencimiento,
            garantia,
        }
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = InventoryError;

    /// Reconstruct the correct subtype from a stored record.
    ///
    /// A record carrying neither discriminator field, or failing the entity
    /// validation it passed when written, indicates a corrupted store and
    /// surfaces as [`InventoryError::Storage`].
    fn try_from(record: ProductRecord) -> InventoryResult<Product> {
        let category = if let Some(expiration_months) = record.vencimiento {
            Category::Perishable { expiration_months }
        } else if let Some(warranty_months) = record.garantia {
            Category::Electronic { warranty_months }
        } else {
            return Err(InventoryError::storage(format!(
                "record {} has neither vencimiento nor garantia",
                record.codigo
            )));
        };

        Product::new(
            record.codigo.clone(),
            record.nombre,
            record.marca,
            record.precio,
            record.cantidad,
            category,
        )
        .map_err(|e| InventoryError::storage(format!("record {}: {}", record.codigo, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perishable_record_carries_vencimiento_only() {
        let milk = Product::new(
            "1",
            "milk",
            "lala",
            2.5,
            10,
            Category::Perishable { expiration_months: 6 },
        )
        .unwrap();
        let record = ProductRecord::from(&milk);
        assert_eq!(record.vencimiento, Some(6));
        assert_eq!(record.garantia, None);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["codigo"], "1");
        assert_eq!(json["nombre"], "Milk");
        assert_eq!(json["marca"], "Lala");
        assert_eq!(json["precio"], 2.5);
        assert_eq!(json["cantidad"], 10);
        assert_eq!(json["vencimiento"], 6);
        assert!(json.get("garantia").is_none());
    }

    #[test]
    fn electronic_record_carries_garantia_only() {
        let tv = Product::new(
            "2",
            "tv",
            "samsung",
            499.0,
            3,
            Category::Electronic { warranty_months: 12 },
        )
        .unwrap();
        let record = ProductRecord::from(&tv);
        assert_eq!(record.vencimiento, None);
        assert_eq!(record.garantia, Some(12));

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("vencimiento").is_none());
        assert_eq!(json["garantia"], 12);
    }

    #[test]
    fn record_reconstructs_the_matching_subtype() {
        let record = ProductRecord {
            codigo: "1".into(),
            nombre: "Milk".into(),
            marca: "Lala".into(),
            precio: 2.5,
            cantidad: 10,
            vencimiento: Some(6),
            garantia: None,
        };
        let product = Product::try_from(record).unwrap();
        assert_eq!(
            product.category(),
            Category::Perishable { expiration_months: 6 }
        );
        assert_eq!(product.name(), "Milk");
    }

    #[test]
    fn vencimiento_wins_when_both_fields_are_present() {
        let record = ProductRecord {
            codigo: "3".into(),
            nombre: "Odd".into(),
            marca: "Case".into(),
            precio: 1.0,
            cantidad: 1,
            vencimiento: Some(2),
            garantia: Some(9),
        };
        let product = Product::try_from(record).unwrap();
        assert_eq!(
            product.category(),
            Category::Perishable { expiration_months: 2 }
        );
    }

    #[test]
    fn record_without_discriminator_is_a_storage_error() {
        let record = ProductRecord {
            codigo: "4".into(),
            nombre: "Bare".into(),
            marca: "None".into(),
            precio: 1.0,
            cantidad: 1,
            vencimiento: None,
            garantia: None,
        };
        let err = Product::try_from(record).unwrap_err();
        assert!(matches!(err, InventoryError::Storage(_)));
    }

    #[test]
    fn record_with_invalid_price_is_a_storage_error() {
        let record = ProductRecord {
            codigo: "5".into(),
            nombre: "Bad".into(),
            marca: "Data".into(),
            precio: -1.0,
            cantidad: 1,
            vencimiento: Some(1),
            garantia: None,
        };
        let err = Product::try_from(record).unwrap_err();
        assert!(matches!(err, InventoryError::Storage(_)));
    }
}
