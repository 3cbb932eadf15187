//! Premium Engine CLI
//!
//! ```bash
//! # Monthly term death premium for a 40-year-old smoker
//! premium_engine quote --branch life --coverage term_death --amount 100000 \
//!     --age 40 --term 20 --rate 1.5 --flag smoker --breakdown
//!
//! # Price a JSON request
//! premium_engine --format json quote --request request.json
//!
//! # Mortality curve
//! premium_engine table --from 60 --to 100
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use premium_engine::{
    Assumptions, Branch, CoverageType, MortalityTable, PolicyRequest, PremiumCalculator,
    PricingConfig, RatingFactors, RiskFlag,
};

/// Actuarial premium calculator
#[derive(Parser)]
#[command(name = "premium_engine")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// JSON file overriding pricing limits and loadings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a single request
    Quote(QuoteArgs),

    /// Print annual mortality rates for a range of ages
    Table(TableArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args)]
struct QuoteArgs {
    /// JSON request file; replaces the individual request flags
    #[arg(long, conflicts_with_all = ["branch", "coverage", "amount"])]
    request: Option<PathBuf>,

    /// life | non_life | mandatory (vie, non_vie, obligatoire also accepted)
    #[arg(long, required_unless_present = "request")]
    branch: Option<Branch>,

    /// Coverage type, e.g. term_death, whole_life, annuity, auto, auto_liability
    #[arg(long, required_unless_present = "request")]
    coverage: Option<CoverageType>,

    /// Capital, insured value or regulatory base
    #[arg(long, required_unless_present = "request")]
    amount: Option<f64>,

    #[arg(long, default_value_t = 40)]
    age: u32,

    /// Term in years
    #[arg(long, default_value_t = 20)]
    term: u32,

    /// Technical interest rate in percent
    #[arg(long, default_value_t = 1.5)]
    rate: f64,

    /// Risk flag, repeatable (smoker, diabetes, theft_cover, ...)
    #[arg(long = "flag")]
    flags: Vec<RiskFlag>,

    #[arg(long, default_value_t = 1.0)]
    risk_level: f64,

    #[arg(long, default_value_t = 1.0)]
    guarantee_level: f64,

    #[arg(long, default_value_t = 1.0)]
    risk_category: f64,

    #[arg(long, default_value_t = 1.0)]
    region: f64,

    /// Show base premium and surcharges
    #[arg(long)]
    breakdown: bool,
}

#[derive(Args)]
struct TableArgs {
    #[arg(long, default_value_t = 18)]
    from: u32,

    #[arg(long, default_value_t = 120)]
    to: u32,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PricingConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PricingConfig::default(),
    };
    let calculator = PremiumCalculator::new(Assumptions::default_pricing(), config);

    match cli.command {
        Commands::Quote(args) => quote(&calculator, args, cli.format),
        Commands::Table(args) => table(&calculator.assumptions().mortality, args, cli.format),
    }
}

fn build_request(args: &QuoteArgs) -> Result<PolicyRequest> {
    if let Some(path) = &args.request {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open request {}", path.display()))?;
        return serde_json::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("Invalid request JSON in {}", path.display()));
    }

    // clap enforces these when --request is absent
    let branch = args.branch.context("--branch is required")?;
    let coverage = args.coverage.context("--coverage is required")?;
    let amount = args.amount.context("--amount is required")?;

    let mut request = PolicyRequest::new(branch, coverage, amount)
        .with_age(args.age)
        .with_term(args.term)
        .with_interest_rate(args.rate)
        .with_rating(RatingFactors {
            risk_level: args.risk_level,
            guarantee_level: args.guarantee_level,
            risk_category: args.risk_category,
            region: args.region,
        });
    for flag in &args.flags {
        request.risk_profile.insert(*flag);
    }
    Ok(request)
}

fn quote(calculator: &PremiumCalculator, args: QuoteArgs, format: OutputFormat) -> Result<()> {
    let request = build_request(&args)?;

    if args.breakdown {
        let breakdown = calculator
            .breakdown(&request)
            .context("Premium calculation failed")?;
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&breakdown)?),
            OutputFormat::Table => {
                println!("{:<24} {:>14}", "Component", "Amount");
                println!("{}", "-".repeat(39));
                println!("{:<24} {:>14.2}", "base_premium", breakdown.base_premium);
                for surcharge in &breakdown.surcharges {
                    println!("{:<24} {:>14.2}", surcharge.name, surcharge.amount);
                }
                println!("{}", "-".repeat(39));
                println!(
                    "{:<24} {:>14.2}",
                    format!("total ({})", breakdown.period.as_str()),
                    breakdown.total_premium
                );
            }
        }
        return Ok(());
    }

    let result = calculator
        .calculate(&request)
        .context("Premium calculation failed")?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table => {
            println!("Branch:       {}", result.branch);
            println!("Coverage:     {}", result.coverage_type);
            println!("Risk factor:  {:.4}", result.risk_factor);
            println!("Premium:      {:.2} ({})", result.premium, result.period.as_str());
        }
    }
    Ok(())
}

fn table(mortality: &MortalityTable, args: TableArgs, format: OutputFormat) -> Result<()> {
    let rows: Vec<(u32, f64)> = (args.from..=args.to)
        .map(|age| (age, mortality.rate(age)))
        .collect();

    match format {
        OutputFormat::Json => {
            let json: Vec<_> = rows
                .iter()
                .map(|(age, rate)| serde_json::json!({ "age": age, "rate": rate }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            println!("{:>4} {:>10}", "Age", "q(x)");
            for (age, rate) in rows {
                println!("{:>4} {:>10.4}", age, rate);
            }
        }
    }
    Ok(())
}
