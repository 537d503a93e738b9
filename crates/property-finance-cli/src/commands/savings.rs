use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use property_finance_core::savings::projection::{project_savings, SavingsProjectionInput};
use property_finance_core::types::Fraction;

use crate::commands::validate;
use crate::input;

/// Arguments for the savings timeline
#[derive(Args)]
pub struct SavingsArgs {
    /// Savings already held
    #[arg(long, default_value = "0")]
    pub initial_savings: Decimal,

    /// Monthly salary
    #[arg(long)]
    pub monthly_salary: Option<Decimal>,

    /// Share of salary saved each month as a fraction (0.3 = 30%)
    #[arg(long)]
    pub saving_percentage: Option<Fraction>,

    /// Annual return on savings as a fraction (0.05 = 5%); may be negative
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub annual_return: Fraction,

    /// Cash target to save towards
    #[arg(long)]
    pub target: Option<Decimal>,

    /// First month of saving (YYYY-MM-DD); dates the target month
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Include the month-by-month schedule in the output
    #[arg(long)]
    pub with_schedule: bool,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_savings(args: SavingsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let projection_input: SavingsProjectionInput = match input::load(args.input.as_deref())? {
        Some(req) => req,
        None => SavingsProjectionInput {
            initial_savings: args.initial_savings,
            monthly_salary: args
                .monthly_salary
                .ok_or("--monthly-salary is required (or provide --input)")?,
            saving_percentage: args
                .saving_percentage
                .ok_or("--saving-percentage is required (or provide --input)")?,
            annual_return: args.annual_return,
            expense_required: args.target.ok_or("--target is required (or provide --input)")?,
            start_date: args.start_date,
        },
    };

    validate::non_negative("initial-savings", projection_input.initial_savings)?;
    validate::non_negative("monthly-salary", projection_input.monthly_salary)?;
    validate::non_negative("target", projection_input.expense_required)?;

    let mut result = project_savings(&projection_input)?;
    if !args.with_schedule {
        result.result.schedule.clear();
    }
    Ok(serde_json::to_value(result)?)
}
