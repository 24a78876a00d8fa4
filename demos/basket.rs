//! Priced Basket Receipt Example
//!
//! Loads a fixture set (catalogue, basket and offers), prices the basket and prints
//! a receipt.
//!
//! Use `-f` to load a fixture set by name
//! Use `-b` to point at a different fixtures directory
//! Use `-l` (or `RUST_LOG`) to set the log level
//!
//! Run with: `cargo run --example basket -- -f grocery`

use std::{io, io::Write, time::Instant};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pricer::{fixtures::Fixture, receipt::Receipt, utils::ExampleBasketArgs};

/// Priced Basket Receipt Example
pub fn main() -> Result<()> {
    let args = ExampleBasketArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let fixture = Fixture::from_set_in(&args.fixture, &args.base_path)?;

    info!(
        fixture = %args.fixture,
        products = fixture.catalogue().len(),
        units = fixture.basket().count(),
        offers = fixture.offers().len(),
        "loaded fixture set"
    );

    let start = Instant::now();

    let pricer = fixture.pricer()?;
    let receipt = Receipt::from_pricer(&pricer);

    let elapsed = start.elapsed();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    receipt.write_to(&mut handle)?;

    writeln!(
        handle,
        "\n {} ({}s)",
        elapsed.human(Truncate::Nano),
        elapsed.as_secs_f32()
    )?;

    Ok(())
}
