//! Pricer
//!
//! Expands a basket into one stub per unit, priced from the catalogue, then folds the
//! offers over those stubs in the order they were supplied.
//!
//! Nothing is cached: every accessor recomputes from the borrowed basket, catalogue and
//! offers. The borrows keep the inputs from changing underneath a pricer.

use std::iter;

use crate::{
    basket::Basket,
    catalogue::{Catalogue, CatalogueError},
    offers::{BoxedOffer, apply_all},
    stubs::PriceStub,
};

/// Prices a basket against a catalogue and a sequence of offers.
#[derive(Debug, Clone, Copy)]
pub struct Pricer<'a> {
    basket: &'a Basket,
    catalogue: &'a Catalogue,
    offers: &'a [BoxedOffer],
}

impl<'a> Pricer<'a> {
    /// Create a pricer with no offers.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::UnknownPrice`] if a basket product isn't in the catalogue.
    pub fn new(basket: &'a Basket, catalogue: &'a Catalogue) -> Result<Self, CatalogueError> {
        Self::with_offers(basket, catalogue, &[])
    }

    /// Create a pricer that applies `offers` in order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::UnknownPrice`] for the first basket product that isn't in
    /// the catalogue.
    pub fn with_offers(
        basket: &'a Basket,
        catalogue: &'a Catalogue,
        offers: &'a [BoxedOffer],
    ) -> Result<Self, CatalogueError> {
        if let Some(name) = basket.iter().find(|name| !catalogue.contains(name)) {
            return Err(CatalogueError::UnknownPrice {
                name: name.to_string(),
                product_names: catalogue.product_names().to_vec(),
            });
        }

        tracing::debug!(
            products = basket.len(),
            units = basket.count(),
            offers = offers.len(),
            "created pricer"
        );

        Ok(Pricer {
            basket,
            catalogue,
            offers,
        })
    }

    /// The basket being priced
    pub fn basket(&self) -> &'a Basket {
        self.basket
    }

    /// The catalogue prices are taken from
    pub fn catalogue(&self) -> &'a Catalogue {
        self.catalogue
    }

    /// The offers, in application order
    pub fn offers(&self) -> &'a [BoxedOffer] {
        self.offers
    }

    /// One stub per unit in the basket, at catalogue price, in basket order.
    pub fn stubs_list(&self) -> Vec<PriceStub> {
        let mut stubs = Vec::new();

        for (name, quantity) in self.basket.items() {
            // Checked against the catalogue in `with_offers`.
            let Some(price) = self.unit_price(name) else {
                continue;
            };

            stubs.extend(iter::repeat_n(PriceStub::new(name, price), quantity));
        }

        stubs
    }

    /// Stubs after every offer has been applied, prices not yet floored at zero.
    pub fn final_stubs(&self) -> Vec<PriceStub> {
        apply_all(self.offers, self.stubs_list())
    }

    /// Value of the basket before any offers.
    pub fn sub_total(&self) -> f64 {
        self.stubs_list().iter().map(PriceStub::price).sum()
    }

    /// Value of the basket after all offers, with each unit floored at zero.
    pub fn total(&self) -> f64 {
        self.final_stubs()
            .iter()
            .map(PriceStub::clamped_price)
            .sum()
    }

    /// Amount taken off the sub-total by the offers.
    ///
    /// Negative when the offers raise prices above the catalogue.
    pub fn discount(&self) -> f64 {
        self.sub_total() - self.total()
    }

    fn unit_price(&self, name: &str) -> Option<f64> {
        self.catalogue.price(name).ok()
    }
}

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "all prices in these tests are exactly representable"
)]
mod tests {
    use testresult::TestResult;

    use crate::offers::{AmountOff, FnOffer, MultiBuy, PercentageOff, offer};

    use super::*;

    fn fruit() -> Result<Catalogue, CatalogueError> {
        Catalogue::with_products([("apple", 1.0), ("orange", 2.0)])
    }

    fn fruit_offers() -> TestResult<Vec<BoxedOffer>> {
        Ok(vec![
            offer(MultiBuy::buy_one_get_one_free(
                "Buy one apple get one free",
                "apple",
            )),
            offer(PercentageOff::new("Half price oranges", "orange", 0.5)?),
        ])
    }

    #[test]
    fn new_with_empty_inputs() -> TestResult {
        let basket = Basket::new();
        let catalogue = Catalogue::new();

        let pricer = Pricer::new(&basket, &catalogue)?;

        assert!(pricer.offers().is_empty());
        assert!(pricer.basket().is_empty());
        assert!(pricer.catalogue().is_empty());

        Ok(())
    }

    #[test]
    fn unknown_product_is_rejected() -> TestResult {
        let basket = Basket::with_contents([("a", 1)])?;
        let catalogue = Catalogue::new();

        let result = Pricer::new(&basket, &catalogue);

        assert!(matches!(
            result,
            Err(CatalogueError::UnknownPrice { ref name, ref product_names })
                if name == "a" && product_names.is_empty()
        ));

        Ok(())
    }

    #[test]
    fn stubs_list_expands_quantities_in_basket_order() -> TestResult {
        let basket = Basket::with_contents([("orange", 2), ("apple", 1)])?;
        let catalogue = fruit()?;

        let stubs = Pricer::new(&basket, &catalogue)?.stubs_list();

        assert_eq!(
            stubs,
            vec![
                PriceStub::new("orange", 2.0),
                PriceStub::new("orange", 2.0),
                PriceStub::new("apple", 1.0),
            ]
        );

        Ok(())
    }

    #[test]
    fn sub_total_is_sum_of_quantity_times_price() -> TestResult {
        let catalogue = Catalogue::with_products([("a", 1.0), ("b", 2.0)])?;

        for (contents, expected) in [
            (vec![], 0.0),
            (vec![("a", 1)], 1.0),
            (vec![("a", 2)], 2.0),
            (vec![("a", 1), ("b", 1)], 3.0),
        ] {
            let basket = Basket::with_contents(contents)?;

            assert_eq!(Pricer::new(&basket, &catalogue)?.sub_total(), expected);
        }

        Ok(())
    }

    #[test]
    fn no_offers_means_no_discount() -> TestResult {
        let basket = Basket::with_contents([("apple", 3), ("orange", 1)])?;
        let catalogue = fruit()?;
        let pricer = Pricer::new(&basket, &catalogue)?;

        assert_eq!(pricer.total(), pricer.sub_total());
        assert_eq!(pricer.discount(), 0.0);

        Ok(())
    }

    #[test]
    fn offers_grid() -> TestResult {
        let catalogue = fruit()?;
        let offers = fruit_offers()?;

        for (contents, sub_total, discount, total) in [
            (vec![], 0.0, 0.0, 0.0),
            (vec![("apple", 1)], 1.0, 0.0, 1.0),
            (vec![("apple", 2)], 2.0, 1.0, 1.0),
            (vec![("apple", 3)], 3.0, 1.0, 2.0),
            (vec![("orange", 1)], 2.0, 1.0, 1.0),
            (vec![("orange", 2)], 4.0, 2.0, 2.0),
            (vec![("apple", 1), ("orange", 1)], 3.0, 1.0, 2.0),
            (vec![("apple", 2), ("orange", 2)], 6.0, 3.0, 3.0),
        ] {
            let basket = Basket::with_contents(contents)?;
            let pricer = Pricer::with_offers(&basket, &catalogue, &offers)?;

            assert_eq!(pricer.sub_total(), sub_total, "sub-total for {basket}");
            assert_eq!(pricer.discount(), discount, "discount for {basket}");
            assert_eq!(pricer.total(), total, "total for {basket}");
        }

        Ok(())
    }

    #[test]
    fn negative_stub_prices_count_as_zero() -> TestResult {
        let basket = Basket::with_contents([("apple", 1), ("orange", 1)])?;
        let catalogue = fruit()?;
        let offers = vec![offer(AmountOff::new("5.00 off apples", "apple", 5.0)?)];

        let pricer = Pricer::with_offers(&basket, &catalogue, &offers)?;

        assert_eq!(pricer.total(), 2.0);
        assert_eq!(pricer.discount(), 1.0);

        let final_prices: Vec<f64> = pricer.final_stubs().iter().map(PriceStub::price).collect();
        assert_eq!(final_prices, vec![-4.0, 2.0]);

        Ok(())
    }

    #[test]
    fn offers_see_earlier_offers_output() -> TestResult {
        let basket = Basket::with_contents([("orange", 2)])?;
        let catalogue = fruit()?;

        let half_price = || PercentageOff::new("Half price oranges", "orange", 0.5);
        let one_off = || AmountOff::new("1.00 off oranges", "orange", 1.0);

        let half_first = vec![offer(half_price()?), offer(one_off()?)];
        let one_off_first = vec![offer(one_off()?), offer(half_price()?)];

        let half_first_total = Pricer::with_offers(&basket, &catalogue, &half_first)?.total();
        let one_off_first_total =
            Pricer::with_offers(&basket, &catalogue, &one_off_first)?.total();

        assert_eq!(half_first_total, 0.0);
        assert_eq!(one_off_first_total, 1.0);

        Ok(())
    }

    #[test]
    fn offer_may_introduce_products_outside_the_catalogue() -> TestResult {
        let basket = Basket::with_contents([("apple", 1)])?;
        let catalogue = fruit()?;
        let offers = vec![offer(FnOffer::new(
            "Free bag",
            |mut stubs: Vec<PriceStub>| {
                stubs.push(PriceStub::new("bag", 0.1));
                stubs
            },
        ))];

        let pricer = Pricer::with_offers(&basket, &catalogue, &offers)?;

        assert_eq!(pricer.final_stubs().len(), 2);
        assert!((pricer.total() - 1.1).abs() < f64::EPSILON);

        Ok(())
    }

    #[test]
    fn accessors_recompute_each_time() -> TestResult {
        let basket = Basket::with_contents([("apple", 2)])?;
        let catalogue = fruit()?;
        let offers = fruit_offers()?;
        let pricer = Pricer::with_offers(&basket, &catalogue, &offers)?;

        assert_eq!(pricer.total(), pricer.total());
        assert_eq!(pricer.stubs_list(), pricer.stubs_list());

        Ok(())
    }

    #[test]
    fn price_rises_give_a_negative_discount() -> TestResult {
        let basket = Basket::with_contents([("apple", 1), ("orange", 2)])?;
        let catalogue = fruit()?;
        let offers = vec![offer(FnOffer::new(
            "Double everything",
            |stubs: Vec<PriceStub>| {
                stubs
                    .into_iter()
                    .map(|stub| {
                        let price = stub.price() * 2.0;
                        stub.with_price(price)
                    })
                    .collect()
            },
        ))];

        let pricer = Pricer::with_offers(&basket, &catalogue, &offers)?;

        assert_eq!(pricer.sub_total(), 5.0);
        assert_eq!(pricer.total(), 10.0);
        assert_eq!(pricer.discount(), -pricer.sub_total());

        Ok(())
    }
}
