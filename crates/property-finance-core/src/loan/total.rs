use crate::fees::mortgage_insurance::mortgage_insurance;
use crate::fees::purchase::bank_loan;
use crate::types::{round_half_up, Money, Tenor};

/// Amount financed: bank loan plus the mortgage-insurance premium.
pub fn total_loan(transaction_price: Money, valuation_price: Money, years: Tenor) -> Money {
    round_half_up(
        bank_loan(transaction_price, valuation_price)
            + mortgage_insurance(transaction_price, valuation_price, years),
    )
}
