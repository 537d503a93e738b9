use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use property_finance_core::fees::mortgage_insurance::{
    mortgage_insurance, special_premium, special_premium_rate, BASE_PREMIUM_RATE,
};
use property_finance_core::fees::purchase::{bank_rebate, fee_breakdown, stamp_duty, FeeBreakdown};
use property_finance_core::fees::schedule::{BandFormula, STAMP_DUTY};
use property_finance_core::types::{Money, Rate, Tenor, WholePercent};

use crate::commands::validate;
use crate::input;

/// Arguments for the full fee breakdown
#[derive(Args)]
pub struct FeesArgs {
    /// Agreed transaction price
    #[arg(long)]
    pub transaction_price: Option<Decimal>,

    /// Bank valuation of the property
    #[arg(long)]
    pub valuation_price: Option<Decimal>,

    /// Mortgage tenor in years (drives the insurance premium)
    #[arg(long, default_value = "15")]
    pub years: Tenor,

    /// Bank cash rebate as a whole percent (0.5 to 2.5)
    #[arg(long)]
    pub rebate_percentage: Option<WholePercent>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for stamp duty
#[derive(Args)]
pub struct StampDutyArgs {
    /// Agreed transaction price
    #[arg(long)]
    pub transaction_price: Decimal,

    /// Bank valuation; duty is levied on the higher of the two prices
    #[arg(long)]
    pub valuation_price: Option<Decimal>,
}

/// Arguments for mortgage insurance
#[derive(Args)]
pub struct MortgageInsuranceArgs {
    /// Agreed transaction price
    #[arg(long)]
    pub transaction_price: Decimal,

    /// Bank valuation of the property
    #[arg(long)]
    pub valuation_price: Decimal,

    /// Mortgage tenor in years (10, 15, 20, 25 or 30 carry a special premium)
    #[arg(long, default_value = "15")]
    pub years: Tenor,
}

#[derive(Debug, Deserialize)]
struct FeesRequest {
    transaction_price: Money,
    valuation_price: Money,
    #[serde(default = "default_years")]
    tenor_years: Tenor,
    #[serde(default)]
    rebate_percentage: Option<WholePercent>,
}

fn default_years() -> Tenor {
    15
}

#[derive(Debug, Serialize)]
struct FeesOutput {
    #[serde(flatten)]
    breakdown: FeeBreakdown,
    upfront_cash: Money,
    bank_rebate: Money,
    total_expense: Money,
}

#[derive(Debug, Serialize)]
struct StampDutyOutput {
    stamp_duty_basis: Money,
    band: usize,
    formula: BandFormula,
    stamp_duty: Money,
}

#[derive(Debug, Serialize)]
struct MortgageInsuranceOutput {
    base_premium: Money,
    special_premium_rate: Option<Rate>,
    special_premium: Money,
    mortgage_insurance: Money,
}

pub fn run_fees(args: FeesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: FeesRequest = match input::load(args.input.as_deref())? {
        Some(req) => req,
        None => FeesRequest {
            transaction_price: args
                .transaction_price
                .ok_or("--transaction-price is required (or provide --input)")?,
            valuation_price: args
                .valuation_price
                .ok_or("--valuation-price is required (or provide --input)")?,
            tenor_years: args.years,
            rebate_percentage: args.rebate_percentage,
        },
    };

    let (transaction, valuation) = validate::prices(request.transaction_price, request.valuation_price)?;
    let years = validate::tenor(request.tenor_years)?;
    let rebate_pct = request.rebate_percentage.map(validate::rebate_percentage).transpose()?;

    let breakdown = fee_breakdown(transaction, valuation, years);
    let upfront_cash = breakdown.upfront_cash();
    let rebate = rebate_pct
        .map(|pct| bank_rebate(upfront_cash, pct))
        .unwrap_or(Decimal::ZERO);

    let output = FeesOutput {
        breakdown,
        upfront_cash,
        bank_rebate: rebate,
        total_expense: upfront_cash - rebate,
    };
    Ok(serde_json::to_value(output)?)
}

pub fn run_stamp_duty(args: StampDutyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (transaction, valuation) =
        validate::prices(args.transaction_price, args.valuation_price.unwrap_or(Decimal::ZERO))?;
    let basis = transaction.max(valuation);
    let (band, price_band) = STAMP_DUTY
        .band_for(basis)
        .ok_or_else(|| format!("No stamp duty band covers {basis}"))?;

    let output = StampDutyOutput {
        stamp_duty_basis: basis,
        band,
        formula: price_band.formula,
        stamp_duty: stamp_duty(transaction, valuation),
    };
    Ok(serde_json::to_value(output)?)
}

pub fn run_mortgage_insurance(args: MortgageInsuranceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (transaction, valuation) = validate::prices(args.transaction_price, args.valuation_price)?;
    let years = validate::tenor(args.years)?;

    let output = MortgageInsuranceOutput {
        base_premium: BASE_PREMIUM_RATE * valuation,
        special_premium_rate: special_premium_rate(transaction.min(valuation), years),
        special_premium: special_premium(transaction, valuation, years),
        mortgage_insurance: mortgage_insurance(transaction, valuation, years),
    };
    Ok(serde_json::to_value(output)?)
}
