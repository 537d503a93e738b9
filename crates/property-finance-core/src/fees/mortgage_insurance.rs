use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::types::{round_half_up, Money, Rate, Tenor};

/// Premium-pool charge levied on the valuation price.
pub const BASE_PREMIUM_RATE: Rate = dec!(0.20);

/// Tenors with a published special-premium rate.
pub const SUPPORTED_TENORS: [Tenor; 5] = [10, 15, 20, 25, 30];

/// Special-premium rates for one loan-size tier, indexed like
/// [`SUPPORTED_TENORS`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PremiumTier {
    /// Inclusive upper limit on `min(transaction, valuation)`.
    pub max_price: Money,
    pub rates: [Rate; 5],
}

pub const PREMIUM_TIERS: [PremiumTier; 2] = [
    PremiumTier {
        max_price: dec!(6_000_000),
        rates: [dec!(0.0116), dec!(0.0137), dec!(0.0170), dec!(0.0192), dec!(0.0205)],
    },
    PremiumTier {
        max_price: dec!(15_000_000),
        rates: [dec!(0.0135), dec!(0.0160), dec!(0.0198), dec!(0.0223), dec!(0.0238)],
    },
];

/// Special-premium rate for a tiered price and tenor.
///
/// `None` when the price is above the top tier or the tenor is not one of
/// [`SUPPORTED_TENORS`].
pub fn special_premium_rate(price: Money, years: Tenor) -> Option<Rate> {
    let tenor_idx = SUPPORTED_TENORS.iter().position(|&t| t == years)?;
    PREMIUM_TIERS
        .iter()
        .find(|tier| price <= tier.max_price)
        .map(|tier| tier.rates[tenor_idx])
}

/// Special premium (spp) before rounding, keyed on the lower of the two prices.
pub fn special_premium(transaction_price: Money, valuation_price: Money, years: Tenor) -> Money {
    let price = transaction_price.min(valuation_price);
    special_premium_rate(price, years)
        .map(|rate| rate * price)
        .unwrap_or(Decimal::ZERO)
}

/// Mortgage insurance: base premium on valuation plus the tiered special premium.
pub fn mortgage_insurance(transaction_price: Money, valuation_price: Money, years: Tenor) -> Money {
    let base = BASE_PREMIUM_RATE * valuation_price;
    let spp = special_premium(transaction_price, valuation_price, years);
    round_half_up(spp + base)
}
