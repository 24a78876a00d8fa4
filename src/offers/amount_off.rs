//! Amount Off Offers

use crate::{
    offers::{Offer, OfferError},
    stubs::PriceStub,
};

/// Take a fixed amount off every unit of a product.
///
/// Units cheaper than the amount end up with a negative price, which counts as zero
/// towards the basket total.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountOff {
    title: String,
    product: String,
    amount: f64,
}

impl AmountOff {
    /// Create a new amount off offer.
    ///
    /// # Errors
    ///
    /// Returns [`OfferError::InvalidAmount`] unless `amount` is positive and finite.
    pub fn new(
        title: impl Into<String>,
        product: impl Into<String>,
        amount: f64,
    ) -> Result<Self, OfferError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(OfferError::InvalidAmount(amount));
        }

        Ok(Self {
            title: title.into(),
            product: product.into(),
            amount,
        })
    }

    /// Targeted product
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Amount taken off each unit
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl Offer for AmountOff {
    fn title(&self) -> &str {
        &self.title
    }

    fn apply(&self, stubs: Vec<PriceStub>) -> Vec<PriceStub> {
        stubs
            .into_iter()
            .map(|stub| {
                if stub.name() == self.product {
                    let price = stub.price() - self.amount;
                    stub.with_price(price)
                } else {
                    stub
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[expect(clippy::float_cmp, reason = "test amounts are exactly representable")]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn takes_amount_off_matching_units() -> TestResult {
        let offer = AmountOff::new("50p off milk", "milk", 0.5)?;

        let stubs = offer.apply(vec![
            PriceStub::new("milk", 1.5),
            PriceStub::new("bread", 1.5),
        ]);

        assert_eq!(
            stubs,
            vec![PriceStub::new("milk", 1.0), PriceStub::new("bread", 1.5)]
        );

        Ok(())
    }

    #[test]
    fn can_produce_negative_prices() -> TestResult {
        let offer = AmountOff::new("2.00 off milk", "milk", 2.0)?;

        let stubs = offer.apply(vec![PriceStub::new("milk", 1.5)]);

        assert_eq!(stubs.first().map(PriceStub::price), Some(-0.5));
        assert_eq!(stubs.first().map(PriceStub::clamped_price), Some(0.0));

        Ok(())
    }

    #[test]
    fn new_rejects_non_positive_amounts() {
        assert_eq!(
            AmountOff::new("Nothing off", "milk", 0.0),
            Err(OfferError::InvalidAmount(0.0))
        );
        assert!(AmountOff::new("Surcharge", "milk", -1.0).is_err());
        assert!(AmountOff::new("Everything off", "milk", f64::INFINITY).is_err());
    }

    #[test]
    fn accessors() -> TestResult {
        let offer = AmountOff::new("50p off milk", "milk", 0.5)?;

        assert_eq!(offer.product(), "milk");
        assert_eq!(offer.amount(), 0.5);

        Ok(())
    }
}
