//! Multi-buy Offers
//!
//! "Buy N, pay for M" on a single product: units are grouped in the order they
//! appear and every unit past the first `pay` in a group is free.

use crate::{
    offers::{Offer, OfferError},
    stubs::PriceStub,
};

/// Buy `buy` units of a product, pay for `pay` of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiBuy {
    title: String,
    product: String,
    buy: usize,
    pay: usize,
}

impl MultiBuy {
    /// Create a new multi-buy offer.
    ///
    /// # Errors
    ///
    /// Returns [`OfferError::InvalidMultiBuy`] unless `pay < buy`.
    pub fn new(
        title: impl Into<String>,
        product: impl Into<String>,
        buy: usize,
        pay: usize,
    ) -> Result<Self, OfferError> {
        if pay >= buy {
            return Err(OfferError::InvalidMultiBuy { buy, pay });
        }

        Ok(Self {
            title: title.into(),
            product: product.into(),
            buy,
            pay,
        })
    }

    /// Every second unit of the product is free.
    pub fn buy_one_get_one_free(title: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            product: product.into(),
            buy: 2,
            pay: 1,
        }
    }

    /// Targeted product
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Units per group
    pub fn buy(&self) -> usize {
        self.buy
    }

    /// Units charged per group
    pub fn pay(&self) -> usize {
        self.pay
    }
}

impl Offer for MultiBuy {
    fn title(&self) -> &str {
        &self.title
    }

    fn apply(&self, stubs: Vec<PriceStub>) -> Vec<PriceStub> {
        let mut seen = 0_usize;

        stubs
            .into_iter()
            .map(|stub| {
                if stub.name() != self.product {
                    return stub;
                }

                let position = seen % self.buy;
                seen += 1;

                if position < self.pay {
                    stub
                } else {
                    stub.with_price(0.0)
                }
            })
            .collect()
    }
}
