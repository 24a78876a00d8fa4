//! Pricer
//!
//! Pricer prices a shopping basket against a product catalogue, folding an ordered
//! list of pluggable offers over the individual units in the basket.

pub mod basket;
pub mod catalogue;
pub mod fixtures;
pub mod offers;
pub mod prelude;
pub mod pricer;
pub mod receipt;
pub mod stubs;
pub mod utils;
