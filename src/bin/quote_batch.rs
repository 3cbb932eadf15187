//! Price a CSV batch of requests in parallel
//!
//! Usage: quote_batch requests.csv --output quotes.csv [--config pricing.json]
//!
//! Writes one output row per input row. Failed requests keep their row with
//! the error text and an empty premium.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use premium_engine::policy::load_requests;
use premium_engine::{PricingConfig, QuoteRunner};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "quote_batch", about = "Price a CSV batch of premium requests")]
struct Args {
    /// Input CSV of requests
    input: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "quote_output.csv")]
    output: PathBuf,

    /// JSON file overriding pricing limits and loadings
    #[arg(long)]
    config: Option<PathBuf>,
}

/// One priced row of the output file
#[derive(Debug, Serialize)]
struct OutputRow {
    row: usize,
    branch: String,
    coverage_type: String,
    coverage_amount: f64,
    premium: Option<f64>,
    period: Option<&'static str>,
    risk_factor: Option<f64>,
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PricingConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PricingConfig::default(),
    };

    let start = Instant::now();
    let requests = load_requests(&args.input)
        .with_context(|| format!("Failed to load requests from {}", args.input.display()))?;
    log::info!("Loaded {} requests in {:?}", requests.len(), start.elapsed());

    let runner = QuoteRunner::with_config(config);
    let quote_start = Instant::now();
    let results = runner.run_batch(&requests);
    log::info!("Priced {} requests in {:?}", results.len(), quote_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let mut failures = 0;
    for (idx, (request, result)) in requests.iter().zip(results).enumerate() {
        let mut row = OutputRow {
            row: idx + 1,
            branch: request.branch.to_string(),
            coverage_type: request.coverage_type.to_string(),
            coverage_amount: request.coverage_amount,
            premium: None,
            period: None,
            risk_factor: None,
            error: None,
        };
        match result {
            Ok(quote) => {
                row.premium = Some(quote.premium);
                row.period = Some(quote.period.as_str());
                row.risk_factor = Some(quote.risk_factor);
            }
            Err(err) => {
                log::warn!("Row {}: {}", idx + 1, err);
                row.error = Some(err.to_string());
                failures += 1;
            }
        }
        writer.serialize(&row)?;
    }
    writer.flush()?;

    println!(
        "Priced {} requests ({} failed) -> {} in {:?}",
        requests.len(),
        failures,
        args.output.display(),
        start.elapsed()
    );
    Ok(())
}
