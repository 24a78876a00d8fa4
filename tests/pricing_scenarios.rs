//! End-to-end pricing scenarios for baskets of apples and oranges.
//!
//! Apples cost 1.0 and oranges 2.0. Apples are buy one get one free and oranges are
//! half price.

#![expect(
    clippy::float_cmp,
    reason = "every price in these scenarios is exactly representable"
)]

use testresult::TestResult;

use pricer::prelude::*;

fn buy_one_apple_get_one_free() -> BoxedOffer {
    offer(MultiBuy::buy_one_get_one_free(
        "Buy one apple get one free",
        "apple",
    ))
}

fn half_price_oranges() -> TestResult<BoxedOffer> {
    Ok(offer(PercentageOff::new("Half price oranges", "orange", 0.5)?))
}

fn assert_prices(pricer: &Pricer<'_>, sub_total: f64, discount: f64, total: f64) -> TestResult {
    assert_eq!(pricer.sub_total(), sub_total, "sub-total");
    assert_eq!(pricer.discount(), discount, "discount");
    assert_eq!(pricer.total(), total, "total");

    Ok(())
}

#[test]
fn empty_basket_costs_nothing() -> TestResult {
    let basket = Basket::new();
    let catalogue = Catalogue::new();

    assert_prices(&Pricer::new(&basket, &catalogue)?, 0.0, 0.0, 0.0)
}

#[test]
fn single_apple_without_offers() -> TestResult {
    let basket = Basket::with_contents([("apple", 1)])?;
    let catalogue = Catalogue::with_products([("apple", 1.0)])?;

    assert_prices(&Pricer::new(&basket, &catalogue)?, 1.0, 0.0, 1.0)
}

#[test]
fn two_apples_buy_one_get_one_free() -> TestResult {
    let basket = Basket::with_contents([("apple", 2)])?;
    let catalogue = Catalogue::with_products([("apple", 1.0)])?;
    let offers = vec![buy_one_apple_get_one_free()];

    assert_prices(
        &Pricer::with_offers(&basket, &catalogue, &offers)?,
        2.0,
        1.0,
        1.0,
    )
}

#[test]
fn two_half_price_oranges() -> TestResult {
    let basket = Basket::with_contents([("orange", 2)])?;
    let catalogue = Catalogue::with_products([("orange", 2.0)])?;
    let offers = vec![half_price_oranges()?];

    assert_prices(
        &Pricer::with_offers(&basket, &catalogue, &offers)?,
        4.0,
        2.0,
        2.0,
    )
}

#[test]
fn apples_and_oranges_with_both_offers() -> TestResult {
    let basket = Basket::with_contents([("apple", 2), ("orange", 2)])?;
    let catalogue = Catalogue::with_products([("apple", 1.0), ("orange", 2.0)])?;
    let offers = vec![buy_one_apple_get_one_free(), half_price_oranges()?];

    assert_prices(
        &Pricer::with_offers(&basket, &catalogue, &offers)?,
        6.0,
        3.0,
        3.0,
    )
}

#[test]
fn basket_product_missing_from_catalogue_is_rejected() -> TestResult {
    let basket = Basket::with_contents([("a", 1)])?;
    let catalogue = Catalogue::new();

    let result = Pricer::new(&basket, &catalogue);

    assert!(matches!(
        result,
        Err(CatalogueError::UnknownPrice { ref name, .. }) if name == "a"
    ));

    Ok(())
}

#[test]
fn offer_order_changes_the_total() -> TestResult {
    let basket = Basket::with_contents([("orange", 2)])?;
    let catalogue = Catalogue::with_products([("orange", 2.0)])?;

    let amount_then_percentage = vec![
        offer(AmountOff::new("1.50 off oranges", "orange", 1.5)?),
        half_price_oranges()?,
    ];
    let percentage_then_amount = vec![
        half_price_oranges()?,
        offer(AmountOff::new("1.50 off oranges", "orange", 1.5)?),
    ];

    let amount_first = Pricer::with_offers(&basket, &catalogue, &amount_then_percentage)?;
    let percent_first = Pricer::with_offers(&basket, &catalogue, &percentage_then_amount)?;

    // 2.0 - 1.5 = 0.5, halved to 0.25 per orange
    assert_eq!(amount_first.total(), 0.5);
    // 2.0 halved to 1.0, less 1.5 is -0.5, floored at zero
    assert_eq!(percent_first.total(), 0.0);
    assert_ne!(amount_first.total(), percent_first.total());

    Ok(())
}

#[test]
fn later_offers_see_units_already_made_free() -> TestResult {
    let basket = Basket::with_contents([("apple", 2)])?;
    let catalogue = Catalogue::with_products([("apple", 1.0)])?;
    let offers = vec![
        buy_one_apple_get_one_free(),
        offer(PercentageOff::new("Half price apples", "apple", 0.5)?),
    ];

    let pricer = Pricer::with_offers(&basket, &catalogue, &offers)?;

    assert_eq!(
        pricer.final_stubs(),
        vec![PriceStub::new("apple", 0.5), PriceStub::new("apple", 0.0)]
    );
    assert_eq!(pricer.total(), 0.5);

    Ok(())
}

#[test]
fn negative_prices_contribute_nothing() -> TestResult {
    let basket = Basket::with_contents([("apple", 1), ("orange", 1)])?;
    let catalogue = Catalogue::with_products([("apple", 1.0), ("orange", 2.0)])?;
    let offers = vec![offer(FnOffer::new(
        "Overly generous",
        |stubs: Vec<PriceStub>| {
            stubs
                .into_iter()
                .map(|stub| {
                    if stub.name() == "apple" {
                        stub.with_price(-10.0)
                    } else {
                        stub
                    }
                })
                .collect()
        },
    ))];

    let pricer = Pricer::with_offers(&basket, &catalogue, &offers)?;

    assert_prices(&pricer, 3.0, 1.0, 2.0)
}

#[test]
fn basket_changes_are_seen_by_new_pricers() -> TestResult {
    let mut basket = Basket::with_contents([("apple", 1)])?;
    let catalogue = Catalogue::with_products([("apple", 1.0)])?;
    let offers = vec![buy_one_apple_get_one_free()];

    assert_eq!(
        Pricer::with_offers(&basket, &catalogue, &offers)?.total(),
        1.0
    );

    basket.add("apple");
    basket.add("apple");

    assert_eq!(
        Pricer::with_offers(&basket, &catalogue, &offers)?.total(),
        2.0
    );

    basket.remove("apple")?;

    assert_prices(
        &Pricer::with_offers(&basket, &catalogue, &offers)?,
        2.0,
        1.0,
        1.0,
    )
}

#[test]
fn surcharges_make_the_discount_negative() -> TestResult {
    let basket = Basket::with_contents([("apple", 2), ("orange", 1)])?;
    let catalogue = Catalogue::with_products([("apple", 1.0), ("orange", 2.0)])?;
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

    assert_prices(
        &Pricer::with_offers(&basket, &catalogue, &offers)?,
        4.0,
        -4.0,
        8.0,
    )
}
