pub mod amortization;
pub mod total;
