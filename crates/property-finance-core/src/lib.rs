pub mod error;
pub mod types;

#[cfg(feature = "fees")]
pub mod fees;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "savings")]
pub mod savings;

#[cfg(feature = "affordability")]
pub mod affordability;

#[cfg(feature = "planner")]
pub mod planner;

pub use error::PropertyFinanceError;
pub use types::*;

/// Standard result type for all property-finance operations
pub type PropertyFinanceResult<T> = Result<T, PropertyFinanceError>;
