use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rent_vs_buy::amortization::DEFAULT_TENOR_MONTHS;
use rent_vs_buy::{
    amortization_schedule, break_even_table, compare, BreakEvenRow, BreakEvenTable,
    BreakEvenTerms, BuyVsRentScenario, InvestmentTerms, LoanTerms, RentTerms,
};

/// Buy vs rent projections
#[derive(Parser)]
#[command(
    name = "rent-vs-buy",
    version,
    about = "Compare buying a home on a loan against renting and investing"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log every computation to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a loan at a horizon
    Amortize(AmortizeArgs),
    /// Project rent with yearly inflation
    Rent(RentArgs),
    /// Project an investment with monthly contributions
    Invest(InvestArgs),
    /// Compare buying against renting and investing
    Compare(CompareArgs),
    /// Average monthly cost of owning across loan amounts
    BreakEven(BreakEvenArgs),
}

#[derive(Args)]
struct AmortizeArgs {
    /// Annual interest rate in percent
    #[arg(long)]
    rate: f64,
    /// Loan amount
    #[arg(long)]
    principal: f64,
    /// Month at which the loan is evaluated
    #[arg(long)]
    horizon: u32,
    /// Monthly HOA or other fixed cost
    #[arg(long, default_value_t = 0.0)]
    hoa: f64,
    /// Yearly maintenance, taxes and other costs
    #[arg(long, default_value_t = 0.0)]
    yearly_costs: f64,
    /// Loan tenor in months
    #[arg(long, default_value_t = DEFAULT_TENOR_MONTHS)]
    tenor: u32,
    /// Print every month instead of the totals
    #[arg(long)]
    schedule: bool,
}

#[derive(Args)]
struct RentArgs {
    /// Rent in the first month
    #[arg(long)]
    rent: f64,
    /// Yearly rent inflation in percent
    #[arg(long, default_value_t = 0.0)]
    inflation: f64,
    /// Months of rent
    #[arg(long)]
    horizon: u32,
}

#[derive(Args)]
struct InvestArgs {
    /// Initial deposit
    #[arg(long, default_value_t = 0.0)]
    deposit: f64,
    /// Monthly contribution; negative to withdraw
    #[arg(long, allow_negative_numbers = true)]
    contribution: f64,
    /// Annual return in percent
    #[arg(long = "return", allow_negative_numbers = true)]
    annual_return: f64,
    /// Months invested
    #[arg(long)]
    horizon: u32,
    /// Yearly change of the contribution in percent
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    contribution_growth: f64,
}

#[derive(Args)]
struct CompareArgs {
    /// JSON scenario file; the reference scenario is used when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,
}

#[derive(Args)]
struct BreakEvenArgs {
    /// Annual interest rate in percent
    #[arg(long)]
    rate: f64,
    /// Loan tenor in years
    #[arg(long, default_value_t = 30)]
    tenor_years: u32,
    /// Monthly HOA or other fixed cost
    #[arg(long, default_value_t = 0.0)]
    hoa: f64,
    /// Yearly maintenance, taxes and other costs
    #[arg(long, default_value_t = 0.0)]
    yearly_costs: f64,
    #[arg(long, default_value_t = 100_000.0)]
    min_loan: f64,
    #[arg(long, default_value_t = 1_200_000.0)]
    max_loan: f64,
    #[arg(long, default_value_t = 10_000.0)]
    loan_step: f64,
    /// Current monthly rent; reports the largest loan it covers
    #[arg(long)]
    rent: Option<Decimal>,
}

#[derive(Serialize)]
struct BreakEvenOutput<'a> {
    #[serde(flatten)]
    table: &'a BreakEvenTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    affordable: Option<&'a BreakEvenRow>,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_scenario(path: Option<PathBuf>) -> Result<BuyVsRentScenario> {
    let Some(path) = path else {
        info!("no scenario file given, using the reference scenario");
        return Ok(BuyVsRentScenario::default());
    };
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("reading scenario file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing scenario file {}", path.display()))
}

fn run(command: Commands) -> Result<serde_json::Value> {
    let value = match command {
        Commands::Amortize(args) => {
            let terms = LoanTerms {
                annual_interest_rate: args.rate,
                principal: args.principal,
                horizon_months: args.horizon,
                monthly_fixed_cost: args.hoa,
                annual_recurring_cost: args.yearly_costs,
                tenor_months: args.tenor,
            };
            if args.schedule {
                serde_json::to_value(amortization_schedule(&terms)?)?
            } else {
                serde_json::to_value(terms.evaluate()?)?
            }
        }
        Commands::Rent(args) => {
            let terms = RentTerms {
                initial_monthly_rent: args.rent,
                annual_inflation_pct: args.inflation,
                horizon_months: args.horizon,
            };
            serde_json::to_value(terms.evaluate()?)?
        }
        Commands::Invest(args) => {
            let terms = InvestmentTerms {
                initial_deposit: args.deposit,
                monthly_contribution: args.contribution,
                annual_return_pct: args.annual_return,
                horizon_months: args.horizon,
                annual_contribution_growth_pct: args.contribution_growth,
            };
            serde_json::to_value(terms.evaluate()?)?
        }
        Commands::Compare(args) => {
            let scenario = load_scenario(args.scenario)?;
            serde_json::to_value(compare(&scenario).context("comparing buy and rent")?)?
        }
        Commands::BreakEven(args) => {
            let terms = BreakEvenTerms {
                min_loan: args.min_loan,
                max_loan: args.max_loan,
                loan_step: args.loan_step,
                ..BreakEvenTerms::new(
                    args.rate,
                    args.tenor_years.saturating_mul(12),
                    args.hoa,
                    args.yearly_costs,
                )
            };
            let table = break_even_table(&terms)?;
            let affordable = args.rent.and_then(|rent| table.affordable_loan(rent));
            serde_json::to_value(BreakEvenOutput { table: &table, affordable })?
        }
    };
    Ok(value)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = run(cli.command).and_then(|value| Ok(serde_json::to_string_pretty(&value)?));
    match output {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
