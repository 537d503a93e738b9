use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use property_finance_core::fees::mortgage_insurance::mortgage_insurance;
use property_finance_core::fees::purchase::bank_loan;
use property_finance_core::loan::amortization::monthly_payment;
use property_finance_core::loan::total::total_loan;
use property_finance_core::types::{Money, Tenor, WholePercent, MONTHS_PER_YEAR};

use crate::commands::validate;

/// Arguments for the total financed amount
#[derive(Args)]
pub struct TotalLoanArgs {
    /// Agreed transaction price
    #[arg(long)]
    pub transaction_price: Decimal,

    /// Bank valuation of the property
    #[arg(long)]
    pub valuation_price: Decimal,

    /// Mortgage tenor in years
    #[arg(long, default_value = "15")]
    pub years: Tenor,
}

/// Arguments for the level monthly payment
#[derive(Args)]
pub struct MonthlyPaymentArgs {
    /// Loan principal
    #[arg(long)]
    pub loan: Decimal,

    /// Annual interest rate as a whole percent (e.g. 4.1 for 4.1%)
    #[arg(long)]
    pub rate: WholePercent,

    /// Mortgage tenor in years
    #[arg(long)]
    pub years: Tenor,
}

#[derive(Debug, Serialize)]
struct TotalLoanOutput {
    bank_loan: Money,
    mortgage_insurance: Money,
    total_loan: Money,
}

#[derive(Debug, Serialize)]
struct MonthlyPaymentOutput {
    monthly_payment: Money,
    months: u32,
    total_repaid: Money,
    total_interest: Money,
}

pub fn run_total_loan(args: TotalLoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (transaction, valuation) = validate::prices(args.transaction_price, args.valuation_price)?;
    let years = validate::tenor(args.years)?;

    let output = TotalLoanOutput {
        bank_loan: bank_loan(transaction, valuation),
        mortgage_insurance: mortgage_insurance(transaction, valuation, years),
        total_loan: total_loan(transaction, valuation, years),
    };
    Ok(serde_json::to_value(output)?)
}

pub fn run_monthly_payment(args: MonthlyPaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = validate::non_negative("loan", args.loan)?;
    let rate = validate::interest_rate(args.rate)?;
    let years = validate::tenor(args.years)?;

    let payment = monthly_payment(loan, rate, years)?;
    let months = years * MONTHS_PER_YEAR;
    let total_repaid = payment * Decimal::from(months);

    let output = MonthlyPaymentOutput {
        monthly_payment: payment,
        months,
        total_repaid,
        total_interest: total_repaid - loan,
    };
    Ok(serde_json::to_value(output)?)
}
