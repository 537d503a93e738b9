use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use property_finance_core::types::{Money, Tenor, WholePercent};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn default_tenor() -> Tenor {
    property_finance_core::planner::purchase_plan::DEFAULT_TENOR_YEARS
}

/// Prices shared by the per-fee calculators.
#[derive(Deserialize)]
struct PriceRequest {
    transaction_price: Money,
    #[serde(default)]
    valuation_price: Money,
    #[serde(default = "default_tenor")]
    tenor_years: Tenor,
}

#[derive(Serialize)]
struct AmountResponse {
    amount: Money,
}

fn amount_json(amount: Money) -> NapiResult<String> {
    serde_json::to_string(&AmountResponse { amount }).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

#[napi]
pub fn plan_purchase(input_json: String) -> NapiResult<String> {
    let input: property_finance_core::planner::purchase_plan::PurchasePlanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = property_finance_core::planner::purchase_plan::plan_purchase(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Savings
// ---------------------------------------------------------------------------

#[napi]
pub fn project_savings(input_json: String) -> NapiResult<String> {
    let input: property_finance_core::savings::projection::SavingsProjectionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = property_finance_core::savings::projection::project_savings(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

#[napi]
pub fn fee_breakdown(input_json: String) -> NapiResult<String> {
    let req: PriceRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = property_finance_core::fees::purchase::fee_breakdown(
        req.transaction_price,
        req.valuation_price,
        req.tenor_years,
    );
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn downpayment(input_json: String) -> NapiResult<String> {
    let req: PriceRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    amount_json(property_finance_core::fees::purchase::downpayment(
        req.transaction_price,
        req.valuation_price,
    ))
}

#[napi]
pub fn agency_fee(input_json: String) -> NapiResult<String> {
    let req: PriceRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    amount_json(property_finance_core::fees::purchase::agency_fee(req.transaction_price))
}

#[napi]
pub fn bank_loan(input_json: String) -> NapiResult<String> {
    let req: PriceRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    amount_json(property_finance_core::fees::purchase::bank_loan(
        req.transaction_price,
        req.valuation_price,
    ))
}

#[napi]
pub fn stamp_duty(input_json: String) -> NapiResult<String> {
    let req: PriceRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    amount_json(property_finance_core::fees::purchase::stamp_duty(
        req.transaction_price,
        req.valuation_price,
    ))
}

#[napi]
pub fn legal_fee(input_json: String) -> NapiResult<String> {
    let req: PriceRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    amount_json(property_finance_core::fees::purchase::legal_fee(req.transaction_price))
}

#[napi]
pub fn mortgage_insurance(input_json: String) -> NapiResult<String> {
    let req: PriceRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    amount_json(property_finance_core::fees::mortgage_insurance::mortgage_insurance(
        req.transaction_price,
        req.valuation_price,
        req.tenor_years,
    ))
}

#[napi]
pub fn total_loan(input_json: String) -> NapiResult<String> {
    let req: PriceRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    amount_json(property_finance_core::loan::total::total_loan(
        req.transaction_price,
        req.valuation_price,
        req.tenor_years,
    ))
}

#[derive(Deserialize)]
struct RebateRequest {
    expense: Money,
    rebate_percentage: WholePercent,
}

#[napi]
pub fn bank_rebate(input_json: String) -> NapiResult<String> {
    let req: RebateRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    if !property_finance_core::fees::purchase::is_valid_rebate_percentage(req.rebate_percentage) {
        return Err(to_napi_error(format!(
            "rebate_percentage {} must be between 0.5 and 2.5",
            req.rebate_percentage
        )));
    }
    amount_json(property_finance_core::fees::purchase::bank_rebate(
        req.expense,
        req.rebate_percentage,
    ))
}

// ---------------------------------------------------------------------------
// Loan and affordability
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PaymentRequest {
    loan: Money,
    interest_rate: WholePercent,
    tenor_years: Tenor,
}

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let req: PaymentRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment = property_finance_core::loan::amortization::monthly_payment(
        req.loan,
        req.interest_rate,
        req.tenor_years,
    )
    .map_err(to_napi_error)?;
    amount_json(payment)
}

#[derive(Deserialize)]
struct AffordabilityRequest {
    total_loan: Money,
    monthly_income: Money,
    #[serde(default = "default_tenor")]
    tenor_years: Tenor,
    base_interest_rate: WholePercent,
}

#[napi]
pub fn assess_affordability(input_json: String) -> NapiResult<String> {
    let req: AffordabilityRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    if req.monthly_income < Decimal::ZERO {
        return Err(to_napi_error("monthly_income must be non-negative"));
    }
    let output = property_finance_core::affordability::stress_test::assess_affordability(
        req.total_loan,
        req.monthly_income,
        req.tenor_years,
        req.base_interest_rate,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
