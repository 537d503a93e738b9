use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::affordability::stress_test::{assess_affordability, AffordabilityAssessment};
use crate::error::PropertyFinanceError;
use crate::fees::mortgage_insurance::SUPPORTED_TENORS;
use crate::fees::purchase::{bank_rebate, fee_breakdown, is_valid_rebate_percentage, FeeBreakdown};
use crate::loan::total::total_loan;
use crate::savings::projection::{project_savings, SavingsProjectionInput, SavingsProjectionOutput};
use crate::types::{with_metadata, ComputationOutput, Fraction, Money, Tenor, WholePercent};
use crate::PropertyFinanceResult;

pub const DEFAULT_TENOR_YEARS: Tenor = 15;

fn default_tenor() -> Tenor {
    DEFAULT_TENOR_YEARS
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything needed to cost a purchase and test whether the buyer can carry it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasePlanInput {
    pub transaction_price: Money,
    pub valuation_price: Money,
    #[serde(default = "default_tenor")]
    pub tenor_years: Tenor,
    pub initial_savings: Money,
    pub monthly_salary: Money,
    /// Share of salary saved each month (0.30 = 30%).
    pub saving_percentage: Fraction,
    /// Annual return on savings (0.05 = 5%).
    pub annual_return: Fraction,
    /// Gross monthly income used for the stress-test and DTI checks.
    pub monthly_income: Money,
    /// Quoted mortgage rate (4 = 4%).
    pub base_interest_rate: WholePercent,
    /// Cash rebate offered by the lender (1.5 = 1.5%).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebate_percentage: Option<WholePercent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasePlanOutput {
    pub fees: FeeBreakdown,
    /// Deposit, fees, duty and insurance before any rebate.
    pub upfront_cash: Money,
    pub bank_rebate: Money,
    /// Cash the buyer must have saved: `upfront_cash - bank_rebate`.
    ///
    /// The bank loan is not part of it since the lender funds that share of
    /// the price; `total_expense + fees.bank_loan` is the whole outlay.
    pub total_expense: Money,
    pub total_loan: Money,
    pub savings: SavingsProjectionOutput,
    pub affordability: AffordabilityAssessment,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Cost a purchase, project the savings timeline and run the affordability checks.
pub fn plan_purchase(
    input: &PurchasePlanInput,
) -> PropertyFinanceResult<ComputationOutput<PurchasePlanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input, &mut warnings)?;

    let fees = fee_breakdown(input.transaction_price, input.valuation_price, input.tenor_years);
    let upfront_cash = fees.upfront_cash();

    let rebate = input
        .rebate_percentage
        .map(|pct| bank_rebate(upfront_cash, pct))
        .unwrap_or(Decimal::ZERO);
    let total_expense = upfront_cash - rebate;

    let savings = project_savings(&SavingsProjectionInput {
        initial_savings: input.initial_savings,
        monthly_salary: input.monthly_salary,
        saving_percentage: input.saving_percentage,
        annual_return: input.annual_return,
        expense_required: total_expense.max(Decimal::ZERO),
        start_date: input.start_date,
    })?;
    warnings.extend(savings.warnings);

    let loan = total_loan(input.transaction_price, input.valuation_price, input.tenor_years);
    let affordability = assess_affordability(
        loan,
        input.monthly_income,
        input.tenor_years,
        input.base_interest_rate,
    )?;

    tracing::debug!(
        %total_expense,
        %loan,
        months = ?savings.result.outcome.months(),
        verdict = ?affordability.verdict,
        "purchase plan computed"
    );

    let output = PurchasePlanOutput {
        fees,
        upfront_cash,
        bank_rebate: rebate,
        total_expense,
        total_loan: loan,
        savings: savings.result,
        affordability,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Property purchase cost, savings timeline and affordability",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &PurchasePlanInput, warnings: &mut Vec<String>) -> PropertyFinanceResult<()> {
    if input.tenor_years == 0 {
        return Err(PropertyFinanceError::InvalidInput {
            field: "tenor_years".into(),
            reason: "Loan tenor must be at least 1 year".into(),
        });
    }

    if !SUPPORTED_TENORS.contains(&input.tenor_years) {
        warnings.push(format!(
            "Tenor of {} years has no special-premium rate; mortgage insurance covers the base premium only",
            input.tenor_years
        ));
    }

    if input.valuation_price < input.transaction_price {
        warnings.push(format!(
            "Valuation is {} below the transaction price; the gap is paid in cash",
            input.transaction_price - input.valuation_price
        ));
    }

    if let Some(pct) = input.rebate_percentage {
        if !is_valid_rebate_percentage(pct) {
            warnings.push(format!(
                "Rebate percentage {pct} is outside the usual 0.5% to 2.5% range"
            ));
        }
    }

    Ok(())
}
