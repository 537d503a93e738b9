use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Fixed tariff coefficients (0.0137 = 1.37%). Caller-supplied percentages use
/// [`Fraction`] or [`WholePercent`] instead.
pub type Rate = Decimal;

/// Loan term in whole years.
pub type Tenor = u32;

pub const MONTHS_PER_YEAR: u32 = 12;

/// A percentage expressed as a fraction (0.10 = 10%).
///
/// Used where the source figure is naturally a ratio: the share of salary put
/// aside each month, or an annual investment return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fraction(pub Decimal);

/// A percentage expressed as a whole number (10 = 10%).
///
/// Used for quoted rates: mortgage interest rates and the bank rebate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WholePercent(pub Decimal);

impl Fraction {
    pub const ZERO: Fraction = Fraction(Decimal::ZERO);

    pub fn value(self) -> Decimal {
        self.0
    }

    pub fn to_whole_percent(self) -> WholePercent {
        WholePercent(self.0 * dec!(100))
    }
}

impl WholePercent {
    pub const ZERO: WholePercent = WholePercent(Decimal::ZERO);

    pub fn value(self) -> Decimal {
        self.0
    }

    pub fn to_fraction(self) -> Fraction {
        Fraction(self.0 / dec!(100))
    }
}

impl std::ops::Add for WholePercent {
    type Output = WholePercent;

    fn add(self, rhs: WholePercent) -> WholePercent {
        WholePercent(self.0 + rhs.0)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for WholePercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl FromStr for Fraction {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Fraction)
    }
}

impl FromStr for WholePercent {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim_end_matches('%')).map(WholePercent)
    }
}

/// Round to the nearest whole unit, halves toward positive infinity.
///
/// `-2.5` rounds to `-2`, `2.5` rounds to `3`.
pub fn round_half_up(value: Decimal) -> Money {
    (value + dec!(0.5)).floor()
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
