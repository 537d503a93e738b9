pub mod affordability;
pub mod fees;
pub mod loan;
pub mod plan;
pub mod savings;
pub mod validate;
