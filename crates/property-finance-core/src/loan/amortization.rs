use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::PropertyFinanceError;
use crate::types::{round_half_up, Money, Tenor, WholePercent, MONTHS_PER_YEAR};
use crate::PropertyFinanceResult;

/// Level monthly payment that repays `loan` over `months` at an annual
/// nominal rate, rounded to a whole unit.
///
/// `payment = loan * r / (1 - (1 + r)^-n)` with `r = rate / 100 / 12`; a zero
/// rate repays principal in equal instalments.
pub fn amortization_payment(
    loan: Money,
    annual_interest_rate: WholePercent,
    months: u32,
) -> PropertyFinanceResult<Money> {
    if months == 0 {
        return Err(PropertyFinanceError::InvalidInput {
            field: "months".into(),
            reason: "Number of payments must be > 0".into(),
        });
    }

    let n = Decimal::from(months);
    let monthly_rate = annual_interest_rate.value() / dec!(100) / Decimal::from(MONTHS_PER_YEAR);

    if monthly_rate.is_zero() {
        return Ok(round_half_up(loan / n));
    }

    // (1 + r)^n; multiplying through by it avoids the negative exponent
    let factor = (Decimal::ONE + monthly_rate)
        .checked_powu(u64::from(months))
        .ok_or_else(|| PropertyFinanceError::Overflow {
            context: format!("compounding {months} monthly periods"),
        })?;
    let denominator = factor - Decimal::ONE;

    if denominator.is_zero() {
        return Err(PropertyFinanceError::DivisionByZero {
            context: "amortization annuity factor".into(),
        });
    }

    loan.checked_mul(monthly_rate)
        .and_then(|interest| interest.checked_mul(factor))
        .and_then(|scaled| scaled.checked_div(denominator))
        .map(round_half_up)
        .ok_or_else(|| PropertyFinanceError::Overflow {
            context: format!("amortization payment over {months} months"),
        })
}

/// Monthly payment for a tenor quoted in years.
pub fn monthly_payment(
    loan: Money,
    annual_interest_rate: WholePercent,
    tenor_years: Tenor,
) -> PropertyFinanceResult<Money> {
    let months = tenor_years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| PropertyFinanceError::InvalidInput {
            field: "tenor_years".into(),
            reason: format!("Tenor of {tenor_years} years is out of range"),
        })?;
    amortization_payment(loan, annual_interest_rate, months)
}
