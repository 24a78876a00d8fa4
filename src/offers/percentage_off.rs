//! Percentage Off Offers

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};

use crate::{
    offers::{Offer, OfferError},
    stubs::PriceStub,
};

/// Take a percentage off every unit of a product.
#[derive(Debug, Clone)]
pub struct PercentageOff {
    title: String,
    product: String,
    percentage: Percentage,
}

impl PercentageOff {
    /// Create a new percentage off offer, e.g. `0.5` for half price.
    ///
    /// # Errors
    ///
    /// Returns [`OfferError::InvalidPercentage`] if `percentage` is outside `0.0..=1.0`.
    pub fn new(
        title: impl Into<String>,
        product: impl Into<String>,
        percentage: f64,
    ) -> Result<Self, OfferError> {
        if !(0.0..=1.0).contains(&percentage) {
            return Err(OfferError::InvalidPercentage(percentage));
        }

        Ok(Self {
            title: title.into(),
            product: product.into(),
            percentage: Percentage::from(percentage),
        })
    }

    /// Targeted product
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Fraction taken off each unit
    pub fn percentage(&self) -> Percentage {
        self.percentage
    }

    /// Discounted price, or `None` if the price can't be represented as a decimal.
    fn discounted(&self, price: f64) -> Option<f64> {
        let price = Decimal::from_f64(price)?;
        let off = (self.percentage * Decimal::ONE).checked_mul(price)?;

        price.checked_sub(off)?.to_f64()
    }
}

impl Offer for PercentageOff {
    fn title(&self) -> &str {
        &self.title
    }

    fn apply(&self, stubs: Vec<PriceStub>) -> Vec<PriceStub> {
        stubs
            .into_iter()
            .map(|stub| {
                if stub.name() != self.product {
                    return stub;
                }

                match self.discounted(stub.price()) {
                    Some(price) => stub.with_price(price),
                    None => stub,
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "halving and quartering these prices is exact"
)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn half_price_halves_each_unit() -> TestResult {
        let offer = PercentageOff::new("Half price oranges", "orange", 0.5)?;

        let stubs = offer.apply(vec![PriceStub::new("orange", 2.0); 2]);

        assert_eq!(stubs, vec![PriceStub::new("orange", 1.0); 2]);

        Ok(())
    }

    #[test]
    fn other_products_pass_through() -> TestResult {
        let offer = PercentageOff::new("25% off bread", "bread", 0.25)?;

        let stubs = offer.apply(vec![
            PriceStub::new("apple", 1.0),
            PriceStub::new("bread", 2.0),
        ]);

        assert_eq!(
            stubs,
            vec![PriceStub::new("apple", 1.0), PriceStub::new("bread", 1.5)]
        );

        Ok(())
    }

    #[test]
    fn already_free_units_stay_free() -> TestResult {
        let offer = PercentageOff::new("Half price apples", "apple", 0.5)?;

        let stubs = offer.apply(vec![PriceStub::new("apple", 0.0)]);

        assert_eq!(stubs.first().map(PriceStub::price), Some(0.0));

        Ok(())
    }

    #[test]
    fn non_finite_prices_pass_through() -> TestResult {
        let offer = PercentageOff::new("Half price apples", "apple", 0.5)?;

        let stubs = offer.apply(vec![PriceStub::new("apple", f64::INFINITY)]);

        assert_eq!(stubs.first().map(PriceStub::price), Some(f64::INFINITY));

        Ok(())
    }

    #[test]
    fn new_rejects_out_of_range_percentages() {
        assert_eq!(
            PercentageOff::new("Too generous", "apple", 1.5).map(|offer| offer.percentage()),
            Err(OfferError::InvalidPercentage(1.5))
        );
        assert!(PercentageOff::new("Negative", "apple", -0.1).is_err());
        assert!(PercentageOff::new("NaN", "apple", f64::NAN).is_err());
    }

    #[test]
    fn accessors() -> TestResult {
        let offer = PercentageOff::new("Half price oranges", "orange", 0.5)?;

        assert_eq!(offer.product(), "orange");
        assert_eq!(offer.percentage(), Percentage::from(0.5));
        assert_eq!(offer.title(), "Half price oranges");

        Ok(())
    }
}
