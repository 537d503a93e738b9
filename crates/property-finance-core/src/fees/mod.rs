pub mod mortgage_insurance;
pub mod purchase;
pub mod schedule;
