//! Offers
//!
//! An offer is a named transformation over the stubs of a basket. Offers run in
//! sequence, each one receiving the stubs produced by the offer before it.

use std::fmt;

use thiserror::Error;

use crate::stubs::PriceStub;

pub mod amount_off;
pub mod multi_buy;
pub mod percentage_off;

pub use amount_off::AmountOff;
pub use multi_buy::MultiBuy;
pub use percentage_off::PercentageOff;

/// Errors raised when configuring one of the built-in offers.
#[derive(Debug, Error, PartialEq)]
pub enum OfferError {
    /// Multi-buy must charge for fewer units than it groups.
    #[error("multi-buy must pay for fewer units than it groups (buy {buy}, pay {pay})")]
    InvalidMultiBuy {
        /// Units per group
        buy: usize,

        /// Units charged per group
        pay: usize,
    },

    /// Percentage was outside of `0.0..=1.0`.
    #[error("percentage must be between 0 and 1, got {0}")]
    InvalidPercentage(f64),

    /// Amount off must be a positive, finite value.
    #[error("amount off must be positive, got {0}")]
    InvalidAmount(f64),
}

/// A pricing transformation over a sequence of stubs.
///
/// Implementations should be deterministic and must cope with any input, including an
/// empty sequence and stubs already priced at zero or below. Returned stubs may differ
/// in number, order and price from the input; negative prices are floored by the pricer.
pub trait Offer: fmt::Debug {
    /// Human readable title, e.g. "Half price oranges".
    fn title(&self) -> &str;

    /// Transform the stubs.
    fn apply(&self, stubs: Vec<PriceStub>) -> Vec<PriceStub>;
}

/// Offer object held by pricers and fixtures.
pub type BoxedOffer = Box<dyn Offer>;

/// Box any offer implementation into an offer object.
pub fn offer<O>(offer: O) -> BoxedOffer
where
    O: Offer + 'static,
{
    Box::new(offer)
}

/// Offer backed by a plain function or closure.
pub struct FnOffer<F> {
    title: String,
    transform: F,
}

impl<F> FnOffer<F>
where
    F: Fn(Vec<PriceStub>) -> Vec<PriceStub>,
{
    /// Create a new offer from a title and a transform.
    pub fn new(title: impl Into<String>, transform: F) -> Self {
        Self {
            title: title.into(),
            transform,
        }
    }
}

impl<F> Offer for FnOffer<F>
where
    F: Fn(Vec<PriceStub>) -> Vec<PriceStub>,
{
    fn title(&self) -> &str {
        &self.title
    }

    fn apply(&self, stubs: Vec<PriceStub>) -> Vec<PriceStub> {
        (self.transform)(stubs)
    }
}

impl<F> fmt::Debug for FnOffer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOffer")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Fold the offers over the stubs, in order.
pub fn apply_all(offers: &[BoxedOffer], stubs: Vec<PriceStub>) -> Vec<PriceStub> {
    offers.iter().fold(stubs, |stubs, offer| {
        let before = stubs.len();
        let stubs = offer.apply(stubs);

        tracing::debug!(
            offer = offer.title(),
            stubs_in = before,
            stubs_out = stubs.len(),
            "applied offer"
        );

        stubs
    })
}

#[cfg(test)]
#[expect(clippy::float_cmp, reason = "offer arithmetic here is exact")]
mod tests {
    use super::*;

    fn double_everything() -> BoxedOffer {
        offer(FnOffer::new("Double", |stubs: Vec<PriceStub>| {
            stubs
                .into_iter()
                .map(|stub| {
                    let price = stub.price() * 2.0;
                    stub.with_price(price)
                })
                .collect()
        }))
    }

    fn everything_for_a_pound() -> BoxedOffer {
        offer(FnOffer::new("Everything 1.0", |stubs: Vec<PriceStub>| {
            stubs.into_iter().map(|stub| stub.with_price(1.0)).collect()
        }))
    }

    #[test]
    fn fn_offer_exposes_title_and_transform() {
        let offer = double_everything();

        let stubs = offer.apply(vec![PriceStub::new("a", 1.5)]);

        assert_eq!(offer.title(), "Double");
        assert_eq!(stubs, vec![PriceStub::new("a", 3.0)]);
    }

    #[test]
    fn fn_offer_debug_includes_title() {
        let rendered = format!("{:?}", double_everything());

        assert!(rendered.contains("FnOffer"), "got {rendered}");
        assert!(rendered.contains("Double"), "got {rendered}");
    }

    #[test]
    fn apply_all_without_offers_is_identity() {
        let stubs = vec![PriceStub::new("a", 1.0), PriceStub::new("b", 2.0)];

        assert_eq!(apply_all(&[], stubs.clone()), stubs);
    }

    #[test]
    fn apply_all_runs_offers_in_order() {
        let stubs = vec![PriceStub::new("a", 1.0), PriceStub::new("b", 2.0)];

        let double_first = apply_all(
            &[double_everything(), everything_for_a_pound()],
            stubs.clone(),
        );
        let double_last = apply_all(&[everything_for_a_pound(), double_everything()], stubs);

        assert_eq!(
            double_first,
            vec![PriceStub::new("a", 1.0), PriceStub::new("b", 1.0)]
        );
        assert_eq!(
            double_last,
            vec![PriceStub::new("a", 2.0), PriceStub::new("b", 2.0)]
        );
    }

    #[test]
    fn apply_all_handles_empty_input() {
        let result = apply_all(&[double_everything(), everything_for_a_pound()], Vec::new());

        assert!(result.is_empty());
        assert_eq!(result.iter().map(PriceStub::price).sum::<f64>(), 0.0);
    }
}
