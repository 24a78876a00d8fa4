//! Price Stubs

/// A single unit of a product at its current price.
///
/// Offers work on sequences of stubs: a basket holding two apples becomes two apple stubs.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceStub {
    name: String,
    price: f64,
}

impl PriceStub {
    /// Creates a new stub for one unit of a product
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current price of the unit, which may be zero or negative after offers have run
    pub fn price(&self) -> f64 {
        self.price
    }

    /// The same unit at a different price.
    #[must_use]
    pub fn with_price(self, price: f64) -> Self {
        Self { price, ..self }
    }

    /// Price floored at zero, as counted towards a basket total.
    pub fn clamped_price(&self) -> f64 {
        self.price.max(0.0)
    }
}

#[cfg(test)]
#[expect(clippy::float_cmp, reason = "stub prices are copied, never computed")]
mod tests {
    use super::*;

    #[test]
    fn new_stub() {
        let stub = PriceStub::new("apple", 1.0);

        assert_eq!(stub.name(), "apple");
        assert_eq!(stub.price(), 1.0);
    }

    #[test]
    fn with_price_keeps_name() {
        let stub = PriceStub::new("apple", 1.0).with_price(0.0);

        assert_eq!(stub, PriceStub::new("apple", 0.0));
    }

    #[test]
    fn clamped_price_floors_negative_prices() {
        assert_eq!(PriceStub::new("apple", -2.5).clamped_price(), 0.0);
        assert_eq!(PriceStub::new("apple", 2.5).clamped_price(), 2.5);
    }
}
