//! Input checks the engine leaves to its caller.

use rust_decimal::Decimal;

use property_finance_core::fees::purchase::{is_valid_rebate_percentage, REBATE_PERCENT_RANGE};
use property_finance_core::types::{Money, Tenor, WholePercent};

type CheckResult<T> = Result<T, Box<dyn std::error::Error>>;

pub fn non_negative(field: &str, value: Money) -> CheckResult<Money> {
    if value < Decimal::ZERO {
        return Err(format!("--{field} must not be negative (got {value})").into());
    }
    Ok(value)
}

pub fn tenor(years: Tenor) -> CheckResult<Tenor> {
    if years == 0 {
        return Err("--years must be at least 1".into());
    }
    Ok(years)
}

/// Rebate percentages outside the range banks offer are refused here rather
/// than silently computed.
pub fn rebate_percentage(pct: WholePercent) -> CheckResult<WholePercent> {
    if !is_valid_rebate_percentage(pct) {
        return Err(format!(
            "--rebate-percentage must be between {} and {} (got {})",
            REBATE_PERCENT_RANGE.start(),
            REBATE_PERCENT_RANGE.end(),
            pct.value()
        )
        .into());
    }
    Ok(pct)
}

/// Interest rates are quoted as whole percents; anything above 100 is almost
/// certainly a typo.
pub fn interest_rate(rate: WholePercent) -> CheckResult<WholePercent> {
    if rate.value() < Decimal::ZERO || rate.value() > Decimal::ONE_HUNDRED {
        return Err(format!("--rate must be between 0 and 100 percent (got {})", rate.value()).into());
    }
    Ok(rate)
}

/// Prices shared by most commands.
pub fn prices(transaction_price: Money, valuation_price: Money) -> CheckResult<(Money, Money)> {
    Ok((
        non_negative("transaction-price", transaction_price)?,
        non_negative("valuation-price", valuation_price)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rebate_bounds_inclusive() {
        assert!(rebate_percentage(WholePercent(dec!(0.5))).is_ok());
        assert!(rebate_percentage(WholePercent(dec!(2.5))).is_ok());
        assert!(rebate_percentage(WholePercent(dec!(3))).is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(prices(dec!(-1), dec!(100)).is_err());
        assert!(prices(dec!(100), dec!(0)).is_ok());
    }

    #[test]
    fn test_rate_and_tenor_bounds() {
        assert!(interest_rate(WholePercent(dec!(4.125))).is_ok());
        assert!(interest_rate(WholePercent(dec!(-0.1))).is_err());
        assert!(tenor(0).is_err());
        assert!(tenor(30).is_ok());
    }
}
