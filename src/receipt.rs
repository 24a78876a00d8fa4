//! Receipt

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::pricer::Pricer;

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// One unit on the receipt, after offers.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    /// Product name
    pub name: String,

    /// Catalogue price, if the product is in the catalogue
    pub base_price: Option<f64>,

    /// Price after all offers, before flooring at zero
    pub final_price: f64,
}

impl ReceiptLine {
    /// Amount saved on this unit, if the product has a catalogue price.
    pub fn savings(&self) -> Option<f64> {
        self.base_price
            .map(|base| base - self.final_price.max(0.0))
    }
}

/// Final receipt for a priced basket.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    lines: Vec<ReceiptLine>,
    sub_total: f64,
    discount: f64,
    total: f64,
}

impl Receipt {
    /// Build a receipt from a pricer.
    pub fn from_pricer(pricer: &Pricer<'_>) -> Self {
        let catalogue = pricer.catalogue();

        let lines = pricer
            .final_stubs()
            .into_iter()
            .map(|stub| ReceiptLine {
                base_price: catalogue.price(stub.name()).ok(),
                final_price: stub.price(),
                name: stub.name().to_string(),
            })
            .collect();

        Receipt {
            lines,
            sub_total: pricer.sub_total(),
            discount: pricer.discount(),
            total: pricer.total(),
        }
    }

    /// One line per unit, in the order the offers left them.
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Value of the basket before offers
    pub fn sub_total(&self) -> f64 {
        self.sub_total
    }

    /// Amount taken off by offers
    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Amount to pay
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Discount as a fraction of the sub-total.
    ///
    /// Zero when the sub-total is zero or the fraction is out of `Decimal` range.
    pub fn savings_percent(&self) -> Percentage {
        let (Some(discount), Some(sub_total)) = (
            Decimal::from_f64(self.discount),
            Decimal::from_f64(self.sub_total),
        ) else {
            return Percentage::from(0.0);
        };

        discount
            .checked_div(sub_total)
            .map_or_else(|| Percentage::from(0.0), Percentage::from)
    }

    /// Writes the receipt as a table followed by a summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Base Price", "Final Price", "Savings"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                line.base_price.map(format_price).unwrap_or_default(),
                format_price(line.final_price),
                line.savings().map(format_price).unwrap_or_default(),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Rows::first(), Alignment::center());
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}")?;

        let percent_points = percent_points_from_fractional_percentage(self.savings_percent());

        writeln!(out, " Sub-total: {:>10}", format_price(self.sub_total))?;
        writeln!(
            out,
            " Discount:  {:>10} ({percent_points:.2}%)",
            format_price(self.discount)
        )?;
        writeln!(out, " Total:     {:>10}", format_price(self.total))?;

        Ok(())
    }
}

fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

/// Converts a fractional percentage to percent points for display.
fn percent_points_from_fractional_percentage(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 to print percent points.
    (percentage * Decimal::ONE)
        .checked_mul(Decimal::ONE_HUNDRED)
        .map_or(Decimal::ZERO, |points| points.round_dp(2))
}

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "receipt values come from exactly representable prices"
)]
mod tests {
    use testresult::TestResult;

    use crate::{
        basket::Basket,
        catalogue::Catalogue,
        offers::{AmountOff, BoxedOffer, FnOffer, MultiBuy, PercentageOff, offer},
        stubs::PriceStub,
    };

    use super::*;

    fn fruit_offers() -> TestResult<Vec<BoxedOffer>> {
        Ok(vec![
            offer(MultiBuy::buy_one_get_one_free("BOGOF apples", "apple")),
            offer(PercentageOff::new("Half price oranges", "orange", 0.5)?),
        ])
    }

    fn priced_at(price: f64) -> BoxedOffer {
        offer(FnOffer::new("Surcharge", move |stubs: Vec<PriceStub>| {
            stubs
                .into_iter()
                .map(|stub| stub.with_price(price))
                .collect()
        }))
    }

    #[test]
    fn from_pricer_captures_lines_and_totals() -> TestResult {
        let basket = Basket::with_contents([("apple", 2), ("orange", 1)])?;
        let catalogue = Catalogue::with_products([("apple", 1.0), ("orange", 2.0)])?;
        let offers = fruit_offers()?;
        let pricer = Pricer::with_offers(&basket, &catalogue, &offers)?;

        let receipt = Receipt::from_pricer(&pricer);

        assert_eq!(receipt.sub_total(), 4.0);
        assert_eq!(receipt.discount(), 2.0);
        assert_eq!(receipt.total(), 2.0);

        let savings: Vec<Option<f64>> = receipt.lines().iter().map(ReceiptLine::savings).collect();
        assert_eq!(savings, vec![Some(0.0), Some(1.0), Some(1.0)]);

        Ok(())
    }

    #[test]
    fn lines_for_unknown_products_have_no_base_price() -> TestResult {
        let basket = Basket::new();
        let catalogue = Catalogue::new();
        let offers = vec![offer(FnOffer::new("Free bag", |mut stubs: Vec<PriceStub>| {
            stubs.push(PriceStub::new("bag", 0.0));
            stubs
        }))];
        let pricer = Pricer::with_offers(&basket, &catalogue, &offers)?;

        let receipt = Receipt::from_pricer(&pricer);

        assert_eq!(
            receipt.lines(),
            [ReceiptLine {
                name: "bag".to_string(),
                base_price: None,
                final_price: 0.0,
            }]
        );

        Ok(())
    }

    #[test]
    fn savings_on_negative_prices_stop_at_base_price() -> TestResult {
        let basket = Basket::with_contents([("apple", 1)])?;
        let catalogue = Catalogue::with_products([("apple", 1.0)])?;
        let offers = vec![offer(AmountOff::new("2.00 off apples", "apple", 2.0)?)];
        let pricer = Pricer::with_offers(&basket, &catalogue, &offers)?;

        let receipt = Receipt::from_pricer(&pricer);

        assert_eq!(
            receipt.lines().first().and_then(ReceiptLine::savings),
            Some(1.0)
        );

        Ok(())
    }

    #[test]
    fn savings_percent_is_zero_for_empty_basket() -> TestResult {
        let basket = Basket::new();
        let catalogue = Catalogue::new();
        let pricer = Pricer::new(&basket, &catalogue)?;

        let receipt = Receipt::from_pricer(&pricer);

        assert_eq!(receipt.savings_percent(), Percentage::from(0.0));

        Ok(())
    }

    #[test]
    fn savings_percent_is_relative_to_sub_total() -> TestResult {
        let basket = Basket::with_contents([("apple", 2), ("orange", 2)])?;
        let catalogue = Catalogue::with_products([("apple", 1.0), ("orange", 2.0)])?;
        let offers = fruit_offers()?;
        let pricer = Pricer::with_offers(&basket, &catalogue, &offers)?;

        let receipt = Receipt::from_pricer(&pricer);

        assert_eq!(
            percent_points_from_fractional_percentage(receipt.savings_percent()),
            Decimal::from(50)
        );

        Ok(())
    }

    #[test]
    fn write_to_renders_table_and_summary() -> TestResult {
        let basket = Basket::with_contents([("apple", 2)])?;
        let catalogue = Catalogue::with_products([("apple", 1.0)])?;
        let offers = fruit_offers()?;
        let pricer = Pricer::with_offers(&basket, &catalogue, &offers)?;

        let mut out = Vec::new();
        Receipt::from_pricer(&pricer).write_to(&mut out)?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("apple"), "got {rendered}");
        assert!(rendered.contains("Final Price"), "got {rendered}");
        assert!(rendered.contains("Sub-total:       2.00"), "got {rendered}");
        assert!(rendered.contains("Total:           1.00"), "got {rendered}");
        assert!(rendered.contains("(50.00%)"), "got {rendered}");

        Ok(())
    }

    #[test]
    fn savings_percent_is_negative_when_prices_rise() -> TestResult {
        let basket = Basket::with_contents([("apple", 2)])?;
        let catalogue = Catalogue::with_products([("apple", 1.0)])?;
        let offers = vec![priced_at(2.0)];
        let pricer = Pricer::with_offers(&basket, &catalogue, &offers)?;

        let receipt = Receipt::from_pricer(&pricer);

        assert_eq!(receipt.discount(), -2.0);
        assert_eq!(
            percent_points_from_fractional_percentage(receipt.savings_percent()),
            Decimal::from(-100)
        );

        Ok(())
    }

    #[test]
    fn out_of_range_savings_percent_renders_as_zero() -> TestResult {
        let basket = Basket::with_contents([("a", 1)])?;
        let catalogue = Catalogue::with_products([("a", 1e-20)])?;
        let offers = vec![priced_at(1e20)];
        let pricer = Pricer::with_offers(&basket, &catalogue, &offers)?;

        let receipt = Receipt::from_pricer(&pricer);

        assert!(receipt.discount() < 0.0, "discount {}", receipt.discount());
        assert_eq!(receipt.savings_percent(), Percentage::from(0.0));

        let mut out = Vec::new();
        receipt.write_to(&mut out)?;
        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("(0.00%)"), "got {rendered}");

        Ok(())
    }
}
