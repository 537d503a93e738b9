mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::affordability::AffordabilityArgs;
use commands::fees::{FeesArgs, MortgageInsuranceArgs, StampDutyArgs};
use commands::loan::{MonthlyPaymentArgs, TotalLoanArgs};
use commands::plan::PlanArgs;
use commands::savings::SavingsArgs;

/// Property purchase cost and affordability calculations
#[derive(Parser)]
#[command(
    name = "pfc",
    version,
    about = "Property purchase cost and affordability calculations",
    long_about = "A CLI for costing a residential property purchase with decimal precision. \
                  Covers downpayment, agency and legal fees, stamp duty, mortgage insurance, \
                  the savings timeline to cover the up-front cash, and the mortgage stress \
                  test and debt-to-income checks."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log calculation details to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Break down every up-front cost of a purchase
    Fees(FeesArgs),
    /// Stamp duty and the band it falls in
    StampDuty(StampDutyArgs),
    /// Mortgage insurance premium for a tenor
    MortgageInsurance(MortgageInsuranceArgs),
    /// Bank loan plus mortgage insurance
    TotalLoan(TotalLoanArgs),
    /// Level monthly mortgage payment
    MonthlyPayment(MonthlyPaymentArgs),
    /// Months of saving needed to reach a cash target
    Savings(SavingsArgs),
    /// Stress test and debt-to-income checks
    Affordability(AffordabilityArgs),
    /// Full purchase plan: costs, savings timeline and affordability
    Plan(PlanArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries the result; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Fees(args) => commands::fees::run_fees(args),
        Commands::StampDuty(args) => commands::fees::run_stamp_duty(args),
        Commands::MortgageInsurance(args) => commands::fees::run_mortgage_insurance(args),
        Commands::TotalLoan(args) => commands::loan::run_total_loan(args),
        Commands::MonthlyPayment(args) => commands::loan::run_monthly_payment(args),
        Commands::Savings(args) => commands::savings::run_savings(args),
        Commands::Affordability(args) => commands::affordability::run_affordability(args),
        Commands::Plan(args) => commands::plan::run_plan(args),
        Commands::Version => {
            println!("pfc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
