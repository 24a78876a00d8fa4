//! Offer Fixtures

use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    offers::{AmountOff, BoxedOffer, MultiBuy, PercentageOff, offer},
};

/// Wrapper for offers in YAML
#[derive(Debug, Deserialize)]
pub struct OffersFixture {
    /// Offers, in the order they are applied
    #[serde(default)]
    pub offers: Vec<OfferFixture>,
}

/// Offer fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OfferFixture {
    /// Buy `buy` units, pay for `pay`
    MultiBuy {
        /// Offer title
        title: Option<String>,

        /// Targeted product
        product: String,

        /// Units per group
        buy: usize,

        /// Units charged per group
        pay: usize,
    },

    /// Every second unit free
    BuyOneGetOneFree {
        /// Offer title
        title: Option<String>,

        /// Targeted product
        product: String,
    },

    /// Percentage off every unit
    PercentageOff {
        /// Offer title
        title: Option<String>,

        /// Targeted product
        product: String,

        /// Percentage off, either "50%" or 0.5
        percentage: PercentageFixture,
    },

    /// Fixed amount off every unit
    AmountOff {
        /// Offer title
        title: Option<String>,

        /// Targeted product
        product: String,

        /// Amount taken off each unit
        amount: f64,
    },
}

/// Percentage written either as a fraction or as a string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PercentageFixture {
    /// Fraction, e.g. `0.5`
    Fraction(f64),

    /// String, e.g. `"50%"` or `"0.5"`
    Text(String),
}

impl OfferFixture {
    /// Convert to an offer object
    ///
    /// # Errors
    ///
    /// Returns an error if the percentage can't be parsed or the offer configuration is
    /// invalid.
    pub fn try_into_offer(self) -> Result<BoxedOffer, FixtureError> {
        match self {
            OfferFixture::MultiBuy {
                title,
                product,
                buy,
                pay,
            } => {
                let title =
                    title.unwrap_or_else(|| format!("{product}: buy {buy}, pay for {pay}"));

                Ok(offer(MultiBuy::new(title, product, buy, pay)?))
            }
            OfferFixture::BuyOneGetOneFree { title, product } => {
                let title = title.unwrap_or_else(|| format!("Buy one {product} get one free"));

                Ok(offer(MultiBuy::buy_one_get_one_free(title, product)))
            }
            OfferFixture::PercentageOff {
                title,
                product,
                percentage,
            } => {
                let percentage = match percentage {
                    PercentageFixture::Fraction(value) => value,
                    PercentageFixture::Text(text) => parse_percentage(&text)?,
                };

                let title =
                    title.unwrap_or_else(|| format!("{}% off {product}", percentage * 100.0));

                Ok(offer(PercentageOff::new(title, product, percentage)?))
            }
            OfferFixture::AmountOff {
                title,
                product,
                amount,
            } => {
                let title = title.unwrap_or_else(|| format!("{amount:.2} off {product}"));

                Ok(offer(AmountOff::new(title, product, amount)?))
            }
        }
    }
}

/// Parse percentage string (e.g., "15%" or "0.15") into a fraction
///
/// Accepts two formats:
/// - Percentage format: "15%" for 15%
/// - Decimal format: "0.15" for 15%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed.
pub fn parse_percentage(s: &str) -> Result<f64, FixtureError> {
    let trimmed = s.trim();

    if let Some(percent_str) = trimmed.strip_suffix('%') {
        let value = percent_str
            .trim()
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        Ok(value / 100.0)
    } else {
        trimmed
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))
    }
}
