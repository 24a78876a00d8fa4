//! Catalogue

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors related to catalogue construction or price lookups.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogueError {
    /// Untyped catalogue products were not a mapping of product names to float prices.
    #[error("catalogue products must be a mapping of product names to floats, got: {0}")]
    Type(String),

    /// A product was given a price of zero or less.
    #[error("catalogue prices must be positive; '{name}' has price {price}")]
    Price {
        /// Offending product name
        name: String,

        /// Offending price
        price: f64,
    },

    /// A price was requested for a product that isn't in the catalogue.
    #[error("product '{name}' is not in the catalogue (known products: {product_names:?})")]
    UnknownPrice {
        /// Product that was requested
        name: String,

        /// Products the catalogue does know about
        product_names: Vec<String>,
    },
}

/// Product prices, keyed by product name.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    prices: FxHashMap<String, f64>,
    product_names: Vec<String>,
}

impl Catalogue {
    /// Create a new, empty catalogue.
    pub fn new() -> Self {
        Catalogue::default()
    }

    /// Create a catalogue from product name and price pairs.
    ///
    /// A name given more than once keeps its first position and takes the last price.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Price`] if any price is not strictly positive.
    pub fn with_products<I, K>(products: I) -> Result<Self, CatalogueError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut catalogue = Catalogue::new();

        for (name, price) in products {
            let name = name.into();

            if price.is_nan() || price <= 0.0 {
                return Err(CatalogueError::Price { name, price });
            }

            if catalogue.prices.insert(name.clone(), price).is_none() {
                catalogue.product_names.push(name);
            }
        }

        Ok(catalogue)
    }

    /// Check if a product is in the catalogue.
    pub fn contains(&self, name: &str) -> bool {
        self.prices.contains_key(name)
    }

    /// Product names, in the order they were added.
    pub fn product_names(&self) -> &[String] {
        &self.product_names
    }

    /// Price of a single unit of a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::UnknownPrice`] if the product isn't in the catalogue.
    pub fn price(&self, name: &str) -> Result<f64, CatalogueError> {
        self.prices
            .get(name)
            .copied()
            .ok_or_else(|| CatalogueError::UnknownPrice {
                name: name.to_string(),
                product_names: self.product_names.clone(),
            })
    }

    /// Number of products in the catalogue.
    pub fn len(&self) -> usize {
        self.product_names.len()
    }

    /// Check if the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.product_names.is_empty()
    }
}

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "catalogue prices are stored and returned exactly"
)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_is_empty() {
        let catalogue = Catalogue::new();

        assert!(catalogue.is_empty());
        assert!(catalogue.product_names().is_empty());
    }

    #[test]
    fn with_products_keeps_insertion_order() -> TestResult {
        let catalogue = Catalogue::with_products([("b", 2.0), ("a", 1.0), ("c", 3.0)])?;

        assert_eq!(catalogue.product_names(), ["b", "a", "c"]);
        assert_eq!(catalogue.len(), 3);

        Ok(())
    }

    #[test]
    fn with_products_rejects_zero_price() {
        let result = Catalogue::with_products([("a", 1.0), ("b", 0.0)]);

        assert_eq!(
            result.map(|catalogue| catalogue.len()),
            Err(CatalogueError::Price {
                name: "b".to_string(),
                price: 0.0
            })
        );
    }

    #[test]
    fn with_products_rejects_negative_price() {
        let result = Catalogue::with_products([("a", -1.5)]);

        assert!(matches!(result, Err(CatalogueError::Price { .. })));
    }

    #[test]
    fn with_products_rejects_nan_price() {
        let result = Catalogue::with_products([("a", f64::NAN)]);

        assert!(matches!(result, Err(CatalogueError::Price { .. })));
    }

    #[test]
    fn repeated_name_keeps_position_and_last_price() -> TestResult {
        let catalogue = Catalogue::with_products([("a", 1.0), ("b", 2.0), ("a", 5.0)])?;

        assert_eq!(catalogue.product_names(), ["a", "b"]);
        assert_eq!(catalogue.price("a")?, 5.0);

        Ok(())
    }

    #[test]
    fn contains() -> TestResult {
        let catalogue = Catalogue::with_products([("a", 1.0)])?;

        assert!(catalogue.contains("a"));
        assert!(!catalogue.contains("b"));

        Ok(())
    }

    #[test]
    fn price_is_stored_value_and_idempotent() -> TestResult {
        let catalogue = Catalogue::with_products([("a", 1.25)])?;

        assert_eq!(catalogue.price("a")?, 1.25);
        assert_eq!(catalogue.price("a")?, 1.25);
        assert_eq!(catalogue.len(), 1);

        Ok(())
    }

    #[test]
    fn price_of_unknown_product_lists_known_names() -> TestResult {
        let catalogue = Catalogue::with_products([("a", 1.0), ("b", 2.0)])?;

        let result = catalogue.price("c");

        assert_eq!(
            result,
            Err(CatalogueError::UnknownPrice {
                name: "c".to_string(),
                product_names: vec!["a".to_string(), "b".to_string()],
            })
        );

        Ok(())
    }
}
