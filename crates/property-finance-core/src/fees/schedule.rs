use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::types::{round_half_up, Money};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Upper edge of a price band. The lower edge is the previous band's upper
/// edge (or zero for the first band).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum UpperBound {
    /// Band covers prices strictly below the value.
    Below(Money),
    /// Band covers prices up to and including the value.
    AtMost(Money),
}

/// How the fee is derived from the price within a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BandFormula {
    /// A fixed amount regardless of price.
    Flat(Money),
    /// `base + rate * (price - threshold)`; smooths the jump into the next
    /// ad-valorem band.
    MarginalRelief {
        base: Money,
        rate: Decimal,
        threshold: Money,
    },
    /// A single rate applied to the whole price.
    AdValorem(Decimal),
}

impl BandFormula {
    pub fn apply(&self, price: Money) -> Money {
        match *self {
            BandFormula::Flat(fee) => fee,
            BandFormula::MarginalRelief {
                base,
                rate,
                threshold,
            } => base + rate * (price - threshold),
            BandFormula::AdValorem(rate) => rate * price,
        }
    }
}

/// One row of a progressive fee table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBand {
    /// `None` for the top, unbounded band.
    pub upper: Option<UpperBound>,
    pub formula: BandFormula,
    /// Whether the band result is rounded to a whole unit.
    pub rounded: bool,
}

impl PriceBand {
    pub fn contains(&self, price: Money) -> bool {
        match self.upper {
            None => true,
            Some(UpperBound::Below(limit)) => price < limit,
            Some(UpperBound::AtMost(limit)) => price <= limit,
        }
    }

    pub fn fee(&self, price: Money) -> Money {
        let raw = self.formula.apply(price);
        if self.rounded {
            round_half_up(raw)
        } else {
            raw
        }
    }
}

/// An ordered partition of the price axis `[0, ∞)`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BandSchedule {
    pub name: &'static str,
    pub bands: &'static [PriceBand],
}

impl BandSchedule {
    /// First band whose upper edge admits `price`, with its position.
    pub fn band_for(&self, price: Money) -> Option<(usize, &PriceBand)> {
        self.bands.iter().enumerate().find(|(_, b)| b.contains(price))
    }

    pub fn fee(&self, price: Money) -> Money {
        match self.band_for(price) {
            Some((index, band)) => {
                tracing::trace!(schedule = self.name, %price, band = index, "band selected");
                band.fee(price)
            }
            None => Decimal::ZERO,
        }
    }

    /// Prices at which one band hands over to the next.
    pub fn thresholds(&self) -> Vec<Money> {
        self.bands
            .iter()
            .filter_map(|b| match b.upper {
                Some(UpperBound::Below(limit)) | Some(UpperBound::AtMost(limit)) => Some(limit),
                None => None,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Jurisdiction tables
// ---------------------------------------------------------------------------

const fn relief(upper: Money, base: Money, threshold: Money) -> PriceBand {
    PriceBand {
        upper: Some(UpperBound::Below(upper)),
        formula: BandFormula::MarginalRelief {
            base,
            rate: dec!(0.1),
            threshold,
        },
        rounded: true,
    }
}

const fn ad_valorem(upper: Option<UpperBound>, rate: Decimal) -> PriceBand {
    PriceBand {
        upper,
        formula: BandFormula::AdValorem(rate),
        rounded: true,
    }
}

/// Progressive ad-valorem stamp duty. Marginal-relief bands alternate with
/// flat-rate bands; the first band is a nominal fee returned as-is.
pub const STAMP_DUTY: BandSchedule = BandSchedule {
    name: "stamp_duty",
    bands: &[
        PriceBand {
            upper: Some(UpperBound::Below(dec!(3_000_000))),
            formula: BandFormula::Flat(dec!(100)),
            rounded: false,
        },
        relief(dec!(3_528_240), dec!(100), dec!(3_000_000)),
        ad_valorem(Some(UpperBound::Below(dec!(4_500_000))), dec!(0.015)),
        relief(dec!(4_935_480), dec!(67_500), dec!(4_500_000)),
        ad_valorem(Some(UpperBound::Below(dec!(6_000_000))), dec!(0.0225)),
        relief(dec!(6_642_860), dec!(135_000), dec!(6_000_000)),
        ad_valorem(Some(UpperBound::Below(dec!(9_000_000))), dec!(0.03)),
        relief(dec!(10_080_000), dec!(270_000), dec!(9_000_000)),
        ad_valorem(Some(UpperBound::Below(dec!(20_000_000))), dec!(0.0375)),
        relief(dec!(21_739_120), dec!(750_000), dec!(20_000_000)),
        ad_valorem(None, dec!(0.0425)),
    ],
};

/// Conveyancing fee brackets, excluding the fixed disbursement.
pub const LEGAL_FEE: BandSchedule = BandSchedule {
    name: "legal_fee",
    bands: &[
        PriceBand {
            upper: Some(UpperBound::Below(dec!(3_000_000))),
            formula: BandFormula::Flat(dec!(5000)),
            rounded: false,
        },
        PriceBand {
            upper: Some(UpperBound::AtMost(dec!(6_000_000))),
            formula: BandFormula::Flat(dec!(6500)),
            rounded: false,
        },
        PriceBand {
            upper: Some(UpperBound::Below(dec!(10_000_000))),
            formula: BandFormula::Flat(dec!(8000)),
            rounded: false,
        },
        PriceBand {
            upper: None,
            formula: BandFormula::AdValorem(dec!(0.001)),
            rounded: false,
        },
    ],
};
