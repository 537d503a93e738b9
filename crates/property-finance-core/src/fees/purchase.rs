use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::mortgage_insurance::{mortgage_insurance, special_premium};
use super::schedule::{LEGAL_FEE, STAMP_DUTY};
use crate::types::{round_half_up, Money, Rate, Tenor, WholePercent};

pub const DOWNPAYMENT_RATE: Rate = dec!(0.10);
pub const AGENCY_FEE_RATE: Rate = dec!(0.01);
pub const LOAN_TO_VALUE: Rate = dec!(0.90);
pub const LEGAL_DISBURSEMENT: Money = dec!(3000);

/// Rebate percentages banks offer; enforced by callers, not by [`bank_rebate`].
pub const REBATE_PERCENT_RANGE: RangeInclusive<Decimal> = dec!(0.5)..=dec!(2.5);

// ---------------------------------------------------------------------------
// Individual line items
// ---------------------------------------------------------------------------

/// Cash deposit: 10% of the lower price plus any excess of the transaction
/// price over valuation, which the bank will not finance.
pub fn downpayment(transaction_price: Money, valuation_price: Money) -> Money {
    DOWNPAYMENT_RATE * transaction_price.min(valuation_price)
        + (transaction_price - valuation_price).max(Decimal::ZERO)
}

/// Agent's commission, rounded to a whole unit.
pub fn agency_fee(transaction_price: Money) -> Money {
    round_half_up(AGENCY_FEE_RATE * transaction_price)
}

/// Bracketed conveyancing fee plus the fixed disbursement.
pub fn legal_fee(transaction_price: Money) -> Money {
    LEGAL_DISBURSEMENT + LEGAL_FEE.fee(transaction_price)
}

/// Stamp duty on the higher of transaction and valuation price.
pub fn stamp_duty(transaction_price: Money, valuation_price: Money) -> Money {
    STAMP_DUTY.fee(transaction_price.max(valuation_price))
}

pub fn bank_loan(transaction_price: Money, valuation_price: Money) -> Money {
    round_half_up(LOAN_TO_VALUE * transaction_price.min(valuation_price))
}

/// Cash rebate on `expense` at a whole-number percentage.
///
/// The percentage is expected inside [`REBATE_PERCENT_RANGE`]; values outside
/// it are computed as given.
pub fn bank_rebate(expense: Money, rebate_percentage: WholePercent) -> Money {
    round_half_up(rebate_percentage.to_fraction().value() * expense)
}

pub fn is_valid_rebate_percentage(rebate_percentage: WholePercent) -> bool {
    REBATE_PERCENT_RANGE.contains(&rebate_percentage.value())
}

// ---------------------------------------------------------------------------
// Breakdown
// ---------------------------------------------------------------------------

/// Every purchase-cost line item for one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub transaction_price: Money,
    pub valuation_price: Money,
    pub tenor_years: Tenor,
    pub downpayment: Money,
    /// Portion of the downpayment caused by paying above valuation.
    pub valuation_gap: Money,
    pub agency_fee: Money,
    pub legal_fee: Money,
    /// Price the stamp duty was levied on.
    pub stamp_duty_basis: Money,
    pub stamp_duty: Money,
    /// Unrounded special premium included in `mortgage_insurance`.
    pub special_premium: Money,
    pub mortgage_insurance: Money,
    pub bank_loan: Money,
}

impl FeeBreakdown {
    /// Cash needed before completion: deposit, fees, duty and insurance.
    pub fn upfront_cash(&self) -> Money {
        self.downpayment + self.agency_fee + self.legal_fee + self.stamp_duty + self.mortgage_insurance
    }
}

pub fn fee_breakdown(transaction_price: Money, valuation_price: Money, years: Tenor) -> FeeBreakdown {
    let breakdown = FeeBreakdown {
        transaction_price,
        valuation_price,
        tenor_years: years,
        downpayment: downpayment(transaction_price, valuation_price),
        valuation_gap: (transaction_price - valuation_price).max(Decimal::ZERO),
        agency_fee: agency_fee(transaction_price),
        legal_fee: legal_fee(transaction_price),
        stamp_duty_basis: transaction_price.max(valuation_price),
        stamp_duty: stamp_duty(transaction_price, valuation_price),
        special_premium: special_premium(transaction_price, valuation_price, years),
        mortgage_insurance: mortgage_insurance(transaction_price, valuation_price, years),
        bank_loan: bank_loan(transaction_price, valuation_price),
    };

    tracing::debug!(
        transaction = %transaction_price,
        valuation = %valuation_price,
        years,
        stamp_duty = %breakdown.stamp_duty,
        mortgage_insurance = %breakdown.mortgage_insurance,
        "fee breakdown computed"
    );

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downpayment_below_valuation() {
        assert_eq!(downpayment(dec!(8_000_000), dec!(9_000_000)), dec!(800_000));
    }

    #[test]
    fn test_downpayment_includes_valuation_gap() {
        // 10% of 5M plus the 1M paid above valuation
        assert_eq!(downpayment(dec!(6_000_000), dec!(5_000_000)), dec!(1_500_000));
    }

    #[test]
    fn test_downpayment_zero_valuation_not_rejected() {
        assert_eq!(downpayment(dec!(1_000_000), Decimal::ZERO), dec!(1_000_000));
    }

    #[test]
    fn test_agency_fee_one_percent() {
        assert_eq!(agency_fee(dec!(7_250_000)), dec!(72_500));
        assert_eq!(agency_fee(dec!(1_234_550)), dec!(12_346));
    }

    #[test]
    fn test_legal_fee_brackets() {
        assert_eq!(legal_fee(dec!(2_999_999)), dec!(8000));
        assert_eq!(legal_fee(dec!(3_000_000)), dec!(9500));
        assert_eq!(legal_fee(dec!(6_000_000)), dec!(9500));
        assert_eq!(legal_fee(dec!(6_000_001)), dec!(11000));
        assert_eq!(legal_fee(dec!(9_999_999)), dec!(11000));
        assert_eq!(legal_fee(dec!(10_000_000)), dec!(13000));
    }

    #[test]
    fn test_stamp_duty_flat_band_unrounded() {
        assert_eq!(stamp_duty(dec!(2_999_999), Decimal::ZERO), dec!(100));
        assert_eq!(stamp_duty(dec!(3_000_000), Decimal::ZERO), dec!(100));
    }

    #[test]
    fn test_stamp_duty_uses_higher_price() {
        assert_eq!(stamp_duty(dec!(8_000_000), dec!(9_000_000)), dec!(270_000));
    }

    #[test]
    fn test_bank_loan_rounds() {
        assert_eq!(bank_loan(dec!(3_333_333), dec!(4_000_000)), dec!(3_000_000));
        assert_eq!(bank_loan(dec!(8_000_000), dec!(9_000_000)), dec!(7_200_000));
    }

    #[test]
    fn test_bank_rebate_whole_percent() {
        assert_eq!(bank_rebate(dec!(1_000_000), WholePercent(dec!(1.5))), dec!(15_000));
        assert_eq!(bank_rebate(dec!(333), WholePercent(dec!(0.5))), dec!(2));
    }

    #[test]
    fn test_rebate_range_check() {
        assert!(is_valid_rebate_percentage(WholePercent(dec!(0.5))));
        assert!(is_valid_rebate_percentage(WholePercent(dec!(2.5))));
        assert!(!is_valid_rebate_percentage(WholePercent(dec!(2.51))));
        assert!(!is_valid_rebate_percentage(WholePercent(dec!(0.4))));
    }

    #[test]
    fn test_breakdown_upfront_cash_excludes_bank_loan() {
        let b = fee_breakdown(dec!(8_000_000), dec!(9_000_000), 15);
        let expected = b.downpayment + b.agency_fee + b.legal_fee + b.stamp_duty + b.mortgage_insurance;
        assert_eq!(b.upfront_cash(), expected);
        assert_eq!(b.valuation_gap, Decimal::ZERO);
        assert_eq!(b.stamp_duty_basis, dec!(9_000_000));
    }
}
