use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::loan::amortization::monthly_payment;
use crate::types::{Money, Rate, Tenor, WholePercent};
use crate::PropertyFinanceResult;

/// Rate shock applied on top of the quoted mortgage rate.
pub const STRESS_RATE_BUFFER: WholePercent = WholePercent(dec!(2));

/// Highest share of monthly income the stressed payment may take.
pub const STRESS_PAYMENT_CAP: Rate = dec!(0.60);

/// Highest share of monthly income the payment may take at the quoted rate.
pub const DTI_PAYMENT_CAP: Rate = dec!(0.50);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AffordabilityVerdict {
    BothPass,
    StressOnlyPass,
    DtiOnlyPass,
    NeitherPass,
}

impl AffordabilityVerdict {
    pub fn from_checks(passes_stress: bool, passes_dti: bool) -> Self {
        match (passes_stress, passes_dti) {
            (true, true) => AffordabilityVerdict::BothPass,
            (true, false) => AffordabilityVerdict::StressOnlyPass,
            (false, true) => AffordabilityVerdict::DtiOnlyPass,
            (false, false) => AffordabilityVerdict::NeitherPass,
        }
    }

    pub fn passes_stress(self) -> bool {
        matches!(self, AffordabilityVerdict::BothPass | AffordabilityVerdict::StressOnlyPass)
    }

    pub fn passes_dti(self) -> bool {
        matches!(self, AffordabilityVerdict::BothPass | AffordabilityVerdict::DtiOnlyPass)
    }

    pub fn description(self) -> &'static str {
        match self {
            AffordabilityVerdict::BothPass => "Both the DTI ratio and the stress test are fulfilled.",
            AffordabilityVerdict::StressOnlyPass => {
                "The stress test is fulfilled but the DTI ratio is not fulfilled."
            }
            AffordabilityVerdict::DtiOnlyPass => {
                "The DTI ratio is fulfilled but the stress test is not fulfilled."
            }
            AffordabilityVerdict::NeitherPass => {
                "Neither the DTI ratio nor the stress test are fulfilled."
            }
        }
    }
}

/// Full result of the stress-test and DTI checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    pub verdict: AffordabilityVerdict,
    pub monthly_income: Money,
    pub base_rate: WholePercent,
    pub stressed_rate: WholePercent,
    pub payment_for_stress: Money,
    pub payment_for_dti: Money,
    /// Monthly income at which the stressed payment is exactly 60% of income.
    pub income_for_stress: Money,
    /// Monthly income at which the base payment is exactly 50% of income.
    pub income_for_dti: Money,
    /// Extra monthly income needed to pass the stress test (zero if passing).
    pub stress_shortfall: Money,
    /// Extra monthly income needed to pass the DTI check (zero if passing).
    pub dti_shortfall: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run both affordability checks for a loan at the quoted rate.
pub fn assess_affordability(
    total_loan: Money,
    monthly_income: Money,
    years: Tenor,
    base_rate: WholePercent,
) -> PropertyFinanceResult<AffordabilityAssessment> {
    let stressed_rate = base_rate + STRESS_RATE_BUFFER;

    let payment_for_stress = monthly_payment(total_loan, stressed_rate, years)?;
    let payment_for_dti = monthly_payment(total_loan, base_rate, years)?;

    let income_for_stress = payment_for_stress / STRESS_PAYMENT_CAP;
    let income_for_dti = payment_for_dti / DTI_PAYMENT_CAP;

    let verdict = AffordabilityVerdict::from_checks(
        monthly_income >= income_for_stress,
        monthly_income >= income_for_dti,
    );

    tracing::debug!(
        %total_loan,
        %monthly_income,
        %income_for_stress,
        %income_for_dti,
        ?verdict,
        "affordability assessed"
    );

    Ok(AffordabilityAssessment {
        verdict,
        monthly_income,
        base_rate,
        stressed_rate,
        payment_for_stress,
        payment_for_dti,
        income_for_stress,
        income_for_dti,
        stress_shortfall: (income_for_stress - monthly_income).max(Decimal::ZERO),
        dti_shortfall: (income_for_dti - monthly_income).max(Decimal::ZERO),
    })
}

/// Classify monthly income against the stress-test and DTI thresholds.
pub fn evaluate_affordability(
    total_loan: Money,
    monthly_income: Money,
    years: Tenor,
    base_rate: WholePercent,
) -> PropertyFinanceResult<AffordabilityVerdict> {
    assess_affordability(total_loan, monthly_income, years, base_rate).map(|a| a.verdict)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_incomes_follow_caps() {
        let a = assess_affordability(dec!(5_000_000), dec!(40_000), 30, WholePercent(dec!(4))).unwrap();
        assert_eq!(a.stressed_rate, WholePercent(dec!(6)));
        assert_eq!(a.income_for_stress, a.payment_for_stress / dec!(0.6));
        assert_eq!(a.income_for_dti, a.payment_for_dti * dec!(2));
        assert!(a.payment_for_stress > a.payment_for_dti);
    }

    #[test]
    fn test_high_income_passes_both() {
        let v = evaluate_affordability(dec!(5_000_000), dec!(1_000_000), 30, WholePercent(dec!(4))).unwrap();
        assert_eq!(v, AffordabilityVerdict::BothPass);
    }

    #[test]
    fn test_zero_income_fails_both() {
        let a = assess_affordability(dec!(5_000_000), Decimal::ZERO, 30, WholePercent(dec!(4))).unwrap();
        assert_eq!(a.verdict, AffordabilityVerdict::NeitherPass);
        assert_eq!(a.stress_shortfall, a.income_for_stress);
        assert_eq!(a.dti_shortfall, a.income_for_dti);
    }

    #[test]
    fn test_dti_only_on_long_tenor() {
        // At 30 years the +2% shock outweighs the looser 60% cap, so the
        // stress requirement is the higher of the two.
        let a = assess_affordability(dec!(5_000_000), Decimal::ZERO, 30, WholePercent(dec!(1))).unwrap();
        assert!(a.income_for_stress > a.income_for_dti);
        let v = evaluate_affordability(dec!(5_000_000), a.income_for_dti, 30, WholePercent(dec!(1))).unwrap();
        assert_eq!(v, AffordabilityVerdict::DtiOnlyPass);
    }

    #[test]
    fn test_verdict_flags() {
        assert!(AffordabilityVerdict::StressOnlyPass.passes_stress());
        assert!(!AffordabilityVerdict::StressOnlyPass.passes_dti());
        assert!(AffordabilityVerdict::DtiOnlyPass.passes_dti());
        assert!(!AffordabilityVerdict::NeitherPass.passes_stress());
        assert_eq!(AffordabilityVerdict::from_checks(true, true), AffordabilityVerdict::BothPass);
    }

    #[test]
    fn test_zero_tenor_is_error() {
        assert!(evaluate_affordability(dec!(1_000_000), dec!(50_000), 0, WholePercent(dec!(3))).is_err());
    }
}
