use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use property_finance_core::affordability::stress_test::{assess_affordability, AffordabilityAssessment};
use property_finance_core::loan::total::total_loan;
use property_finance_core::types::{Tenor, WholePercent};

use crate::commands::validate;

/// Arguments for the stress test and DTI checks
#[derive(Args)]
pub struct AffordabilityArgs {
    /// Amount financed; computed from the prices when omitted
    #[arg(long)]
    pub total_loan: Option<Decimal>,

    /// Agreed transaction price (used when --total-loan is omitted)
    #[arg(long)]
    pub transaction_price: Option<Decimal>,

    /// Bank valuation (used when --total-loan is omitted)
    #[arg(long)]
    pub valuation_price: Option<Decimal>,

    /// Gross monthly income
    #[arg(long)]
    pub monthly_income: Decimal,

    /// Quoted mortgage rate as a whole percent; the stress test adds 2
    #[arg(long)]
    pub rate: WholePercent,

    /// Mortgage tenor in years
    #[arg(long, default_value = "15")]
    pub years: Tenor,
}

#[derive(Debug, Serialize)]
struct AffordabilityOutput {
    total_loan: Decimal,
    #[serde(flatten)]
    assessment: AffordabilityAssessment,
    summary: &'static str,
}

pub fn run_affordability(args: AffordabilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let years = validate::tenor(args.years)?;
    let rate = validate::interest_rate(args.rate)?;
    let income = validate::non_negative("monthly-income", args.monthly_income)?;

    let loan = match args.total_loan {
        Some(loan) => validate::non_negative("total-loan", loan)?,
        None => {
            let (transaction, valuation) = validate::prices(
                args.transaction_price
                    .ok_or("--total-loan or --transaction-price is required")?,
                args.valuation_price
                    .ok_or("--valuation-price is required with --transaction-price")?,
            )?;
            total_loan(transaction, valuation, years)
        }
    };

    let assessment = assess_affordability(loan, income, years, rate)?;
    let output = AffordabilityOutput {
        total_loan: loan,
        summary: assessment.verdict.description(),
        assessment,
    };
    Ok(serde_json::to_value(output)?)
}
