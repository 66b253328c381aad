use almacen_core::{InventoryError, InventoryResult, ProductCode};

/// Product category, discriminated by which extra field the record carries.
///
/// Replaces subtype inheritance: a record is either perishable (with an
/// expiration period) or electronic (with a warranty period), never both and
/// never neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Perishable { expiration_months: u32 },
    Electronic { warranty_months: u32 },
}

/// A validated inventory product.
///
/// Construction is the only way to obtain one: price and quantity are
/// checked, and name/brand are normalized to capitalized form. The raw
/// (pre-normalization) values are not retained.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    code: ProductCode,
    name: String,
    brand: String,
    price: f64,
    quantity: u32,
    category: Category,
}

impl Product {
    /// Build a validated product.
    ///
    /// Fails with [`InventoryError::Validation`] if the price is not a
    /// finite positive number or the quantity is zero. The category's extra
    /// field is taken as-is (no validation beyond its type).
    pub fn new(
        code: impl Into<ProductCode>,
        name: impl Into<String>,
        brand: impl Into<String>,
        price: f64,
        quantity: u32,
        category: Category,
    ) -> InventoryResult<Self> {
        Ok(Self {
            code: code.into(),
            name: capitalize(&name.into()),
            brand: capitalize(&brand.into()),
            price: validate_price(price)?,
            quantity: validate_quantity(quantity)?,
            category,
        })
    }

    pub fn code(&self) -> &ProductCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.category {
            Category::Perishable { expiration_months } => write!(
                f,
                "{} {} - expiration: {} months",
                self.name, self.brand, expiration_months
            ),
            Category::Electronic { warranty_months } => write!(
                f,
                "{} {} - warranty: {} months",
                self.name, self.brand, warranty_months
            ),
        }
    }
}

/// Check that a price is a finite, strictly positive number.
pub fn validate_price(price: f64) -> InventoryResult<f64> {
    if !price.is_finite() || price <= 0.0 {
        return Err(InventoryError::validation("price must be a positive number"));
    }
    Ok(price)
}

/// Check that a quantity is strictly positive.
///
/// Zero is rejected: a product with no stock is removed, not stored empty.
pub fn validate_quantity(quantity: u32) -> InventoryResult<u32> {
    if quantity == 0 {
        return Err(InventoryError::validation(
            "quantity must be a positive integer",
        ));
    }
    Ok(quantity)
}

/// Parse console input into a valid price.
pub fn parse_price(input: &str) -> InventoryResult<f64> {
    let price: f64 = input
        .trim()
        .parse()
        .map_err(|_| InventoryError::validation("price must be a valid number"))?;
    validate_price(price)
}

/// Parse console input into a valid quantity.
pub fn parse_quantity(input: &str) -> InventoryResult<u32> {
    let quantity: i64 = input
        .trim()
        .parse()
        .map_err(|_| InventoryError::validation("quantity must be a valid integer"))?;
    if quantity <= 0 || quantity > u32::MAX as i64 {
        return Err(InventoryError::validation(
            "quantity must be a positive integer",
        ));
    }
    Ok(quantity as u32)
}

/// Capitalized form: first character uppercased, the rest lowercased.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perishable() -> Category {
        Category::Perishable {
            expiration_months: 6,
        }
    }

    #[test]
    fn construction_normalizes_name_and_brand() {
        let product = Product::new("1", "milk", "lala", 2.5, 10, perishable()).unwrap();
        assert_eq!(product.name(), "Milk");
        assert_eq!(product.brand(), "Lala");
    }

    #[test]
    fn construction_lowercases_trailing_characters() {
        let product = Product::new("1", "MILK", "LaLa", 2.5, 10, perishable()).unwrap();
        assert_eq!(product.name(), "Milk");
        assert_eq!(product.brand(), "Lala");
    }

    #[test]
    fn construction_stores_price_and_quantity() {
        let product = Product::new("1", "milk", "lala", 2.5, 10, perishable()).unwrap();
        assert_eq!(product.price(), 2.5);
        assert_eq!(product.quantity(), 10);
        assert_eq!(product.code().as_str(), "1");
    }

    #[test]
    fn construction_rejects_zero_price() {
        let err = Product::new("1", "milk", "lala", 0.0, 10, perishable()).unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));
    }

    #[test]
    fn construction_rejects_negative_price() {
        let err = Product::new("1", "milk", "lala", -3.0, 10, perishable()).unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));
    }

    #[test]
    fn construction_rejects_non_finite_price() {
        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Product::new("1", "milk", "lala", price, 10, perishable()).unwrap_err();
            assert!(matches!(err, InventoryError::Validation(_)));
        }
    }

    #[test]
    fn construction_rejects_zero_quantity() {
        let err = Product::new("1", "milk", "lala", 2.5, 0, perishable()).unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));
    }

    #[test]
    fn parse_price_rejects_non_numeric_input() {
        assert!(matches!(
            parse_price("abc"),
            Err(InventoryError::Validation(_))
        ));
        assert!(matches!(parse_price(""), Err(InventoryError::Validation(_))));
    }

    #[test]
    fn parse_price_rejects_non_positive_input() {
        assert!(matches!(
            parse_price("0"),
            Err(InventoryError::Validation(_))
        ));
        assert!(matches!(
            parse_price("-2.5"),
            Err(InventoryError::Validation(_))
        ));
    }

    #[test]
    fn parse_price_accepts_positive_input() {
        assert_eq!(parse_price(" 2.5 ").unwrap(), 2.5);
        assert_eq!(parse_price("199").unwrap(), 199.0);
    }

    #[test]
    fn parse_quantity_rejects_non_numeric_input() {
        assert!(matches!(
            parse_quantity("ten"),
            Err(InventoryError::Validation(_))
        ));
        assert!(matches!(
            parse_quantity("2.5"),
            Err(InventoryError::Validation(_))
        ));
    }

    #[test]
    fn parse_quantity_rejects_non_positive_input() {
        assert!(matches!(
            parse_quantity("0"),
            Err(InventoryError::Validation(_))
        ));
        assert!(matches!(
            parse_quantity("-4"),
            Err(InventoryError::Validation(_))
        ));
    }

    #[test]
    fn parse_quantity_accepts_positive_input() {
        assert_eq!(parse_quantity("10").unwrap(), 10);
        assert_eq!(parse_quantity(" 1 ").unwrap(), 1);
    }

    #[test]
    fn display_composes_subtype_field() {
        let milk = Product::new("1", "milk", "lala", 2.5, 10, perishable()).unwrap();
        assert_eq!(milk.to_string(), "Milk Lala - expiration: 6 months");

        let tv = Product::new(
            "2",
            "tv",
            "samsung",
            499.0,
            3,
            Category::Electronic { warranty_months: 12 },
        )
        .unwrap();
        assert_eq!(tv.to_string(), "Tv Samsung - warranty: 12 months");
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any finite positive price is accepted and stored as-is.
            #[test]
            fn positive_prices_are_accepted(price in 0.001f64..1_000_000.0) {
                let product =
                    Product::new("1", "milk", "lala", price, 1, perishable()).unwrap();
                prop_assert_eq!(product.price(), price);
            }

            /// Property: non-positive prices are always rejected.
            #[test]
            fn non_positive_prices_are_rejected(price in -1_000_000.0f64..=0.0) {
                let err =
                    Product::new("1", "milk", "lala", price, 1, perishable()).unwrap_err();
                prop_assert!(matches!(err, InventoryError::Validation(_)));
            }

            /// Property: any positive quantity is accepted and stored as-is.
            #[test]
            fn positive_quantities_are_accepted(quantity in 1u32..) {
                let product =
                    Product::new("1", "milk", "lala", 2.5, quantity, perishable()).unwrap();
                prop_assert_eq!(product.quantity(), quantity);
            }

            /// Property: the normalized name starts uppercase with a lowercase tail,
            /// regardless of input casing.
            #[test]
            fn names_are_capitalized(name in "[a-zA-Z]{1,32}") {
                let product =
                    Product::new("1", name.as_str(), "lala", 2.5, 1, perishable()).unwrap();
                let mut chars = product.name().chars();
                let first = chars.next().unwrap();
                prop_assert!(first.is_uppercase());
                prop_assert!(chars.all(|c| c.is_lowercase()));
            }

            /// Property: normalization is idempotent.
            #[test]
            fn capitalization_is_idempotent(name in "[a-zA-Z]{1,32}") {
                let once = capitalize(&name);
                prop_assert_eq!(capitalize(&once), once.clone());
            }
        }
    }
}
