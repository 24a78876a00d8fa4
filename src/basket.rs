//! Basket

use std::{fmt, slice};

use thiserror::Error;

/// Errors related to basket construction or mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BasketError {
    /// Untyped basket contents were not a mapping of product names to integer quantities.
    #[error("basket contents must be a mapping of product names to integers, got: {0}")]
    Type(String),

    /// A product was given a quantity of zero or less.
    #[error("product quantities must be positive integers; '{name}' has quantity {quantity}")]
    Quantity {
        /// Offending product name
        name: String,

        /// Offending quantity
        quantity: i64,
    },

    /// A product was removed that isn't in the basket.
    #[error("product '{name}' is not in the current basket ({contents})")]
    ProductNotInBasket {
        /// Product that was requested
        name: String,

        /// Rendered basket contents at the time of the request
        contents: String,
    },
}

/// Products and their quantities, in the order they were first added.
///
/// Every stored quantity is positive. A product whose quantity drops to zero is removed.
#[derive(Debug, Clone, Default)]
pub struct Basket {
    lines: Vec<(String, usize)>,
}

impl Basket {
    /// Create a new, empty basket.
    pub fn new() -> Self {
        Basket { lines: Vec::new() }
    }

    /// Create a basket from product name and quantity pairs.
    ///
    /// A name given more than once keeps its first position and takes the last quantity.
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::Quantity`] if any quantity is zero or negative.
    pub fn with_contents<I, K>(contents: I) -> Result<Self, BasketError>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<String>,
    {
        let mut basket = Basket::new();

        for (name, quantity) in contents {
            let name = name.into();

            let Some(units) = usize::try_from(quantity).ok().filter(|units| *units > 0) else {
                return Err(BasketError::Quantity { name, quantity });
            };

            match basket.position(&name) {
                Some(idx) => {
                    if let Some(line) = basket.lines.get_mut(idx) {
                        line.1 = units;
                    }
                }
                None => basket.lines.push((name, units)),
            }
        }

        Ok(basket)
    }

    /// Check if a product is in the basket.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Total number of units in the basket, saturating at `usize::MAX`.
    pub fn count(&self) -> usize {
        self.lines
            .iter()
            .fold(0_usize, |units, (_, quantity)| units.saturating_add(*quantity))
    }

    /// Quantity of a product in the basket, or zero if it isn't present.
    pub fn quantity(&self, name: &str) -> usize {
        self.lines
            .iter()
            .find(|(line_name, _)| line_name == name)
            .map_or(0, |(_, quantity)| *quantity)
    }

    /// Add a single unit of a product.
    pub fn add(&mut self, name: impl Into<String>) {
        let name = name.into();

        if let Some((_, quantity)) = self.lines.iter_mut().find(|(line, _)| *line == name) {
            *quantity = quantity.saturating_add(1);
        } else {
            self.lines.push((name, 1));
        }
    }

    /// Remove a single unit of a product.
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::ProductNotInBasket`] if the product isn't in the basket.
    pub fn remove(&mut self, name: &str) -> Result<(), BasketError> {
        let Some(idx) = self.position(name) else {
            return Err(BasketError::ProductNotInBasket {
                name: name.to_string(),
                contents: self.to_string(),
            });
        };

        let emptied = match self.lines.get_mut(idx) {
            Some((_, quantity)) => {
                *quantity -= 1;
                *quantity == 0
            }
            None => false,
        };

        if emptied {
            self.lines.remove(idx);
        }

        Ok(())
    }

    /// Iterate over the product names in the basket.
    pub fn iter(&self) -> Names<'_> {
        Names {
            lines: self.lines.iter(),
        }
    }

    /// Iterate over product names and their quantities.
    pub fn items(&self) -> impl Iterator<Item = (&str, usize)> {
        self.lines
            .iter()
            .map(|(name, quantity)| (name.as_str(), *quantity))
    }

    /// Number of distinct products in the basket.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.lines.iter().position(|(line, _)| line == name)
    }
}

impl PartialEq for Basket {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.items().all(|(name, q)| other.quantity(name) == q)
    }
}

impl Eq for Basket {}

impl fmt::Display for Basket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.items()).finish()
    }
}

/// Iterator over the product names in a [`Basket`].
#[derive(Debug, Clone)]
pub struct Names<'a> {
    lines: slice::Iter<'a, (String, usize)>,
}

impl<'a> Iterator for Names<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(|(name, _)| name.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lines.size_hint()
    }
}

impl<'a> IntoIterator for &'a Basket {
    type Item = &'a str;
    type IntoIter = Names<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_is_empty() {
        let basket = Basket::new();

        assert!(basket.is_empty());
        assert_eq!(basket.count(), 0);
        assert_eq!(basket, Basket::default());
    }

    #[test]
    fn with_contents_counts_all_units() -> TestResult {
        let basket = Basket::with_contents([("a", 1), ("b", 2), ("c", 3)])?;

        assert_eq!(basket.count(), 6);
        assert_eq!(basket.len(), 3);

        Ok(())
    }

    #[test]
    fn count_saturates_instead_of_overflowing() -> TestResult {
        let mut basket =
            Basket::with_contents([("a", i64::MAX), ("b", i64::MAX), ("c", i64::MAX)])?;

        assert_eq!(basket.count(), usize::MAX);

        basket.add("d");

        assert_eq!(basket.count(), usize::MAX);
        assert_eq!(basket.quantity("d"), 1);

        Ok(())
    }

    #[test]
    fn with_contents_rejects_zero_quantity() {
        let result = Basket::with_contents([("a", 1), ("b", 0)]);

        assert_eq!(
            result,
            Err(BasketError::Quantity {
                name: "b".to_string(),
                quantity: 0
            })
        );
    }

    #[test]
    fn with_contents_rejects_negative_quantity() {
        let result = Basket::with_contents([("a", -1)]);

        assert!(matches!(result, Err(BasketError::Quantity { quantity: -1, .. })));
    }

    #[test]
    fn with_contents_repeated_name_keeps_position_and_last_quantity() -> TestResult {
        let basket = Basket::with_contents([("a", 1), ("b", 1), ("a", 4)])?;

        assert_eq!(basket.items().collect::<Vec<_>>(), vec![("a", 4), ("b", 1)]);

        Ok(())
    }

    #[test]
    fn contains() -> TestResult {
        let basket = Basket::with_contents([("a", 1)])?;

        assert!(basket.contains("a"));
        assert!(!basket.contains("b"));

        Ok(())
    }

    #[test]
    fn quantity_of_missing_product_is_zero() -> TestResult {
        let basket = Basket::with_contents([("a", 3)])?;

        assert_eq!(basket.quantity("a"), 3);
        assert_eq!(basket.quantity("b"), 0);

        Ok(())
    }

    #[test]
    fn add_initialises_then_increments() {
        let mut basket = Basket::new();

        basket.add("a");
        assert_eq!(basket.quantity("a"), 1);

        basket.add("a");
        assert_eq!(basket.quantity("a"), 2);
    }

    #[test]
    fn remove_decrements() -> TestResult {
        let mut basket = Basket::with_contents([("a", 2)])?;

        basket.remove("a")?;

        assert_eq!(basket.quantity("a"), 1);
        assert!(basket.contains("a"));

        Ok(())
    }

    #[test]
    fn remove_last_unit_deletes_entry() -> TestResult {
        let mut basket = Basket::with_contents([("a", 1), ("b", 1)])?;

        basket.remove("a")?;

        assert!(!basket.contains("a"));
        assert_eq!(basket.iter().collect::<Vec<_>>(), vec!["b"]);

        Ok(())
    }

    #[test]
    fn add_then_remove_round_trips_to_empty() -> TestResult {
        let mut basket = Basket::new();

        basket.add("a");
        basket.remove("a")?;

        assert_eq!(basket, Basket::new());

        Ok(())
    }

    #[test]
    fn remove_missing_product_errors() {
        let mut basket = Basket::new();

        let result = basket.remove("a");

        assert!(matches!(
            result,
            Err(BasketError::ProductNotInBasket { ref name, .. }) if name == "a"
        ));
    }

    #[test]
    fn iterates_names_in_insertion_order() -> TestResult {
        let mut basket = Basket::with_contents([("b", 1), ("a", 1)])?;

        basket.add("c");

        let names: Vec<&str> = (&basket).into_iter().collect();

        assert_eq!(names, vec!["b", "a", "c"]);

        Ok(())
    }

    #[test]
    fn equality_ignores_order() -> TestResult {
        let left = Basket::with_contents([("a", 1), ("b", 2)])?;
        let right = Basket::with_contents([("b", 2), ("a", 1)])?;

        assert_eq!(left, right);
        assert_ne!(left, Basket::with_contents([("a", 1), ("b", 3)])?);

        Ok(())
    }

    #[test]
    fn display_renders_contents() -> TestResult {
        let basket = Basket::with_contents([("apple", 2)])?;

        assert_eq!(basket.to_string(), r#"{"apple": 2}"#);

        Ok(())
    }
}
