use property_finance_core::fees::mortgage_insurance::{mortgage_insurance, special_premium_rate, SUPPORTED_TENORS};
use property_finance_core::fees::purchase::{
    agency_fee, bank_loan, bank_rebate, downpayment, fee_breakdown, legal_fee, stamp_duty,
};
use property_finance_core::fees::schedule::STAMP_DUTY;
use property_finance_core::types::{round_half_up, WholePercent};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Simple line items
// ===========================================================================

#[test]
fn test_agency_fee_matches_rounded_one_percent() {
    for p in [dec!(0), dec!(1_234_567), dec!(3_000_000), dec!(48_000_000)] {
        assert_eq!(agency_fee(p), round_half_up(dec!(0.01) * p));
    }
}

#[test]
fn test_agency_fee_monotonic() {
    let prices = [dec!(1_000_000), dec!(2_500_000), dec!(2_500_001), dec!(9_000_000)];
    for w in prices.windows(2) {
        assert!(agency_fee(w[0]) <= agency_fee(w[1]));
    }
}

#[test]
fn test_legal_fee_step_function() {
    assert_eq!(legal_fee(dec!(2_999_999)), dec!(8000));
    assert_eq!(legal_fee(dec!(3_000_000)), dec!(9500));
    assert_eq!(legal_fee(dec!(6_000_000)), dec!(9500));
    assert_eq!(legal_fee(dec!(6_000_001)), dec!(11000));
    assert_eq!(legal_fee(dec!(10_000_000)), dec!(3000) + dec!(0.001) * dec!(10_000_000));
}

#[test]
fn test_bank_loan_ninety_percent_of_lower_price() {
    let cases = [
        (dec!(8_000_000), dec!(9_000_000)),
        (dec!(9_000_000), dec!(8_000_000)),
        (dec!(4_444_445), dec!(4_444_445)),
        (dec!(0), dec!(1_000_000)),
    ];
    for (t, v) in cases {
        assert_eq!(bank_loan(t, v), round_half_up(dec!(0.9) * t.min(v)));
    }
}

#[test]
fn test_bank_rebate_rounds_to_whole_unit() {
    // 2.5% of 1,234,567 = 30,864.175
    assert_eq!(bank_rebate(dec!(1_234_567), WholePercent(dec!(2.5))), dec!(30_864));
}

// ===========================================================================
// Stamp duty
// ===========================================================================

#[test]
fn test_stamp_duty_reference_points() {
    assert_eq!(stamp_duty(dec!(2_999_999), Decimal::ZERO), dec!(100));
    assert_eq!(stamp_duty(dec!(3_000_000), Decimal::ZERO), dec!(100));
    assert_eq!(
        stamp_duty(dec!(21_739_120), Decimal::ZERO),
        round_half_up(dec!(0.0425) * dec!(21_739_120))
    );
}

#[test]
fn test_stamp_duty_each_band() {
    let cases = [
        (dec!(3_200_000), dec!(20_100)),
        (dec!(4_000_000), dec!(60_000)),
        (dec!(4_600_000), dec!(77_500)),
        (dec!(5_000_000), dec!(112_500)),
        (dec!(6_500_000), dec!(185_000)),
        (dec!(8_000_000), dec!(240_000)),
        (dec!(9_500_000), dec!(320_000)),
        (dec!(15_000_000), dec!(562_500)),
        (dec!(21_000_000), dec!(850_000)),
        (dec!(30_000_000), dec!(1_275_000)),
    ];
    for (price, expected) in cases {
        assert_eq!(stamp_duty(price, Decimal::ZERO), expected, "price {price}");
    }
}

#[test]
fn test_stamp_duty_rounds_half_up() {
    // 0.015 * 3,528,241 = 52,923.615
    assert_eq!(stamp_duty(dec!(3_528_241), Decimal::ZERO), dec!(52_924));
}

#[test]
fn test_stamp_duty_bands_continuous_at_thresholds() {
    // Each band's formula evaluated at its own upper threshold must land
    // within one unit of the next band's formula there.
    for pair in STAMP_DUTY.bands.windows(2) {
        let threshold = match pair[0].upper {
            Some(property_finance_core::fees::schedule::UpperBound::Below(t)) => t,
            other => panic!("unexpected bound {other:?}"),
        };
        let below = pair[0].formula.apply(threshold);
        let above = pair[1].formula.apply(threshold);
        assert!(
            (below - above).abs() <= Decimal::ONE,
            "jump at {threshold}: {below} vs {above}"
        );
    }
}

// ===========================================================================
// Mortgage insurance
// ===========================================================================

#[test]
fn test_special_premium_rises_with_tenor() {
    for price in [dec!(5_000_000), dec!(12_000_000)] {
        let rates: Vec<Decimal> = SUPPORTED_TENORS
            .iter()
            .map(|&y| special_premium_rate(price, y).unwrap())
            .collect();
        assert!(rates.windows(2).all(|w| w[0] < w[1]), "{rates:?}");
    }
}

#[test]
fn test_mortgage_insurance_above_top_tier_is_base_only() {
    assert_eq!(
        mortgage_insurance(dec!(16_000_000), dec!(16_000_000), 20),
        dec!(3_200_000)
    );
}

#[test]
fn test_mortgage_insurance_upper_tier_thirty_years() {
    // 0.2 * 10M + 0.0238 * 10M
    assert_eq!(
        mortgage_insurance(dec!(10_000_000), dec!(10_000_000), 30),
        dec!(2_238_000)
    );
}

// ===========================================================================
// Scenario
// ===========================================================================

#[test]
fn test_scenario_below_valuation_purchase() {
    let t = dec!(8_000_000);
    let v = dec!(9_000_000);
    assert_eq!(downpayment(t, v), dec!(800_000));
    assert_eq!(bank_loan(t, v), dec!(7_200_000));
    assert_eq!(stamp_duty(t, v), dec!(270_000));

    let b = fee_breakdown(t, v, 15);
    assert_eq!(b.downpayment, dec!(800_000));
    assert_eq!(b.agency_fee, dec!(80_000));
    assert_eq!(b.legal_fee, dec!(11_000));
    // 0.2 * 9M + 0.016 * 8M
    assert_eq!(b.mortgage_insurance, dec!(1_928_000));
}
