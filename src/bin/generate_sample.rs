//! Write a synthetic imports/exports table with the full column set.
//!
//! Usage: `generate_sample [ROWS] [OUTPUT] [--seed N]`, defaults 15000 rows
//! to `Imports_Exports_Dataset.csv`. The output depends only on the row count
//! and the seed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

/// Same file the dashboard opens at startup.
const DEFAULT_OUTPUT: &str = "Imports_Exports_Dataset.csv";

/// Write a synthetic imports/exports CSV.
#[derive(Parser, Debug)]
#[command(name = "generate_sample", version, about)]
struct GenArgs {
    /// Number of transactions to write
    #[arg(default_value_t = 15_000)]
    rows: usize,

    /// Output CSV path
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Seed of the generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const COUNTRIES: &[&str] = &[
    "United States of America", "China", "Germany", "Japan", "India", "Brazil",
    "United Kingdom", "France", "Italy", "Canada", "Korea", "Mexico", "Spain",
    "Australia", "Netherlands", "Saudi Arabia", "Turkey", "Switzerland", "Poland",
    "Sweden", "Belgium", "Nigeria", "Argentina", "Norway", "South Africa", "Egypt",
    "Vietnam", "Chile", "Peru", "Ghana", "Kenya", "Pakistan", "Bangladesh",
    "Philippines", "Indonesia", "Thailand", "Malaysia", "Singapore", "New Zealand",
    "Holy See (Vatican City State)",
];
const PRODUCTS: &[&str] = &[
    "couple", "thing", "would", "table", "light", "voice", "machine", "engine",
    "shirt", "device", "chair", "paper",
];
const CATEGORIES: &[&str] = &["Electronics", "Clothing", "Furniture", "Toys", "Machinery"];
const PORTS: &[&str] = &[
    "Port Anthony", "New Lisa", "South Michael", "Lake Sarah", "East James",
    "West Kevin", "North Emily",
];
const SHIPPING: &[&str] = &["Air", "Sea", "Land"];
const PAYMENT_TERMS: &[&str] = &["Prepaid", "Net 30", "Net 60", "Cash on Delivery"];
const COMPANIES: &[&str] = &[
    "Garcia Ltd", "Smith-Jones", "Nguyen and Sons", "Patel Group", "Okafor PLC",
    "Müller GmbH", "Silva & Costa", "Tanaka Corp",
];

const HEADER: [&str; 16] = [
    "Transaction_ID",
    "Country",
    "Product",
    "Import_Export",
    "Quantity",
    "Value",
    "Date",
    "Category",
    "Port",
    "Customs_Code",
    "Weight",
    "Shipping_Method",
    "Supplier",
    "Customer",
    "Invoice_Number",
    "Payment_Terms",
];

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn main() -> Result<()> {
    let GenArgs { rows, output, seed } = GenArgs::parse();

    let mut rng = StdRng::seed_from_u64(seed);
    let first_day = NaiveDate::from_ymd_opt(2019, 9, 7).context("start date")?;

    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {}", output.display()))?;
    writer.write_record(HEADER)?;

    for i in 0..rows {
        let flow = if rng.random_bool(0.5) { "Import" } else { "Export" };
        let quantity: u32 = rng.random_range(1..10_000);
        let value: f64 = rng.random_range(100.0..10_000.0);
        let weight: f64 = rng.random_range(1.0..5_000.0);
        let date = first_day
            .checked_add_days(Days::new(rng.random_range(0..1_800)))
            .context("date out of range")?;

        writer.write_record([
            format!("{:08x}-{:04x}", rng.random::<u32>(), i % 0xffff),
            pick(&mut rng, COUNTRIES).to_string(),
            pick(&mut rng, PRODUCTS).to_string(),
            flow.to_string(),
            quantity.to_string(),
            format!("{value:.2}"),
            date.format("%d-%m-%Y").to_string(),
            pick(&mut rng, CATEGORIES).to_string(),
            pick(&mut rng, PORTS).to_string(),
            rng.random_range(100_000..1_000_000).to_string(),
            format!("{weight:.2}"),
            pick(&mut rng, SHIPPING).to_string(),
            pick(&mut rng, COMPANIES).to_string(),
            pick(&mut rng, COMPANIES).to_string(),
            rng.random_range(10_000_000..100_000_000).to_string(),
            pick(&mut rng, PAYMENT_TERMS).to_string(),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {rows} transactions to {}", output.display());
    Ok(())
}
