use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use property_finance_core::planner::purchase_plan::{plan_purchase, PurchasePlanInput, DEFAULT_TENOR_YEARS};
use property_finance_core::types::{Fraction, Tenor, WholePercent};

use crate::commands::validate;
use crate::input;

/// Arguments for the full purchase plan
#[derive(Args)]
pub struct PlanArgs {
    /// Agreed transaction price
    #[arg(long)]
    pub transaction_price: Option<Decimal>,

    /// Bank valuation of the property
    #[arg(long)]
    pub valuation_price: Option<Decimal>,

    /// Mortgage tenor in years
    #[arg(long, default_value_t = DEFAULT_TENOR_YEARS)]
    pub years: Tenor,

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

    /// Gross monthly income for the affordability checks (defaults to salary)
    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// Quoted mortgage rate as a whole percent
    #[arg(long)]
    pub rate: Option<WholePercent>,

    /// Bank cash rebate as a whole percent (0.5 to 2.5)
    #[arg(long)]
    pub rebate_percentage: Option<WholePercent>,

    /// First month of saving (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Include the month-by-month savings schedule in the output
    #[arg(long)]
    pub with_schedule: bool,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

fn from_flags(args: &PlanArgs) -> Result<PurchasePlanInput, Box<dyn std::error::Error>> {
    let monthly_salary = args
        .monthly_salary
        .ok_or("--monthly-salary is required (or provide --input)")?;

    Ok(PurchasePlanInput {
        transaction_price: args
            .transaction_price
            .ok_or("--transaction-price is required (or provide --input)")?,
        valuation_price: args
            .valuation_price
            .ok_or("--valuation-price is required (or provide --input)")?,
        tenor_years: args.years,
        initial_savings: args.initial_savings,
        monthly_salary,
        saving_percentage: args
            .saving_percentage
            .ok_or("--saving-percentage is required (or provide --input)")?,
        annual_return: args.annual_return,
        monthly_income: args.monthly_income.unwrap_or(monthly_salary),
        base_interest_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
        rebate_percentage: args.rebate_percentage,
        start_date: args.start_date,
    })
}

pub fn run_plan(args: PlanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan_input: PurchasePlanInput = match input::load(args.input.as_deref())? {
        Some(req) => req,
        None => from_flags(&args)?,
    };

    validate::prices(plan_input.transaction_price, plan_input.valuation_price)?;
    validate::tenor(plan_input.tenor_years)?;
    validate::interest_rate(plan_input.base_interest_rate)?;
    validate::non_negative("initial-savings", plan_input.initial_savings)?;
    validate::non_negative("monthly-salary", plan_input.monthly_salary)?;
    validate::non_negative("monthly-income", plan_input.monthly_income)?;
    if let Some(pct) = plan_input.rebate_percentage {
        validate::rebate_percentage(pct)?;
    }

    let mut result = plan_purchase(&plan_input)?;
    if !args.with_schedule {
        result.result.savings.schedule.clear();
    }
    Ok(serde_json::to_value(result)?)
}
