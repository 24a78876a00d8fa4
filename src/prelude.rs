//! Pricer prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Basket, BasketError},
    catalogue::{Catalogue, CatalogueError},
    fixtures::{Fixture, FixtureError},
    offers::{
        AmountOff, BoxedOffer, FnOffer, MultiBuy, Offer, OfferError, PercentageOff, offer,
    },
    pricer::Pricer,
    receipt::{Receipt, ReceiptError, ReceiptLine},
    stubs::PriceStub,
};
