use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PropertyFinanceError;
use crate::types::{with_metadata, ComputationOutput, Fraction, Money, MONTHS_PER_YEAR};
use crate::PropertyFinanceResult;

/// Longest horizon simulated before a target is declared unreachable (100 years).
pub const MAX_PROJECTION_MONTHS: u32 = 1200;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Whether a savings target is met within [`MAX_PROJECTION_MONTHS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SavingsOutcome {
    Reached {
        months: u32,
    },
    Unreachable {
        months_simulated: u32,
        balance: Money,
        shortfall: Money,
    },
}

impl SavingsOutcome {
    pub fn months(&self) -> Option<u32> {
        match self {
            SavingsOutcome::Reached { months } => Some(*months),
            SavingsOutcome::Unreachable { .. } => None,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, SavingsOutcome::Reached { .. })
    }
}

/// Input parameters for a savings projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsProjectionInput {
    pub initial_savings: Money,
    pub monthly_salary: Money,
    /// Share of salary saved each month (0.30 = 30%).
    pub saving_percentage: Fraction,
    /// Annual return on savings, credited monthly at a twelfth.
    pub annual_return: Fraction,
    /// Cash target, usually the total purchase expense.
    pub expense_required: Money,
    /// First month of saving; used to date the target month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// One simulated month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsMonth {
    pub month: u32,
    pub opening_balance: Money,
    pub investment_return: Money,
    pub contribution: Money,
    pub closing_balance: Money,
}

/// Output of `project_savings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsProjectionOutput {
    pub outcome: SavingsOutcome,
    pub monthly_contribution: Money,
    pub total_contributions: Money,
    pub total_investment_return: Money,
    pub final_balance: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    pub schedule: Vec<SavingsMonth>,
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Step the balance month by month, reporting each month to `on_month`.
///
/// Return is credited on the opening balance before the contribution lands.
fn simulate(
    initial_savings: Money,
    monthly_contribution: Money,
    monthly_return: Decimal,
    expense_required: Money,
    mut on_month: impl FnMut(&SavingsMonth),
) -> PropertyFinanceResult<SavingsOutcome> {
    let mut balance = initial_savings;

    if balance >= expense_required {
        return Ok(SavingsOutcome::Reached { months: 0 });
    }

    // Nothing can raise the balance: no contribution and no positive growth.
    let stagnant = monthly_contribution <= Decimal::ZERO
        && (monthly_return <= Decimal::ZERO || balance <= Decimal::ZERO);
    if stagnant {
        return Ok(SavingsOutcome::Unreachable {
            months_simulated: 0,
            balance,
            shortfall: expense_required - balance,
        });
    }

    for month in 1..=MAX_PROJECTION_MONTHS {
        let opening = balance;
        let overflow = || PropertyFinanceError::Overflow {
            context: format!("savings balance in month {month}"),
        };
        let investment_return = opening.checked_mul(monthly_return).ok_or_else(overflow)?;
        balance = opening
            .checked_add(investment_return)
            .and_then(|b| b.checked_add(monthly_contribution))
            .ok_or_else(overflow)?;

        on_month(&SavingsMonth {
            month,
            opening_balance: opening,
            investment_return,
            contribution: monthly_contribution,
            closing_balance: balance,
        });

        if balance >= expense_required {
            return Ok(SavingsOutcome::Reached { months: month });
        }
    }

    Ok(SavingsOutcome::Unreachable {
        months_simulated: MAX_PROJECTION_MONTHS,
        balance,
        shortfall: expense_required - balance,
    })
}

/// Months of saving needed before `expense_required` is covered.
///
/// Fails with `Overflow` only when the balance leaves the `Decimal` range,
/// which takes an absurd return or salary.
pub fn months_needed(
    initial_savings: Money,
    monthly_salary: Money,
    saving_percentage: Fraction,
    annual_return: Fraction,
    expense_required: Money,
) -> PropertyFinanceResult<SavingsOutcome> {
    let contribution = monthly_contribution(monthly_salary, saving_percentage)?;
    let monthly_return = annual_return.value() / Decimal::from(MONTHS_PER_YEAR);

    let outcome = simulate(initial_savings, contribution, monthly_return, expense_required, |_| {})?;
    if let SavingsOutcome::Unreachable { months_simulated, shortfall, .. } = outcome {
        tracing::warn!(months_simulated, %shortfall, "savings target not reachable");
    }
    Ok(outcome)
}

fn checked_total(mut amounts: impl Iterator<Item = Money>, context: &str) -> PropertyFinanceResult<Money> {
    amounts
        .try_fold(Decimal::ZERO, |acc, m| acc.checked_add(m))
        .ok_or_else(|| PropertyFinanceError::Overflow {
            context: context.into(),
        })
}

fn monthly_contribution(monthly_salary: Money, saving_percentage: Fraction) -> PropertyFinanceResult<Money> {
    monthly_salary
        .checked_mul(saving_percentage.value())
        .ok_or_else(|| PropertyFinanceError::Overflow {
            context: "monthly contribution".into(),
        })
}

/// Month-by-month savings projection towards a purchase target.
pub fn project_savings(
    input: &SavingsProjectionInput,
) -> PropertyFinanceResult<ComputationOutput<SavingsProjectionOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.expense_required < Decimal::ZERO {
        return Err(PropertyFinanceError::InvalidInput {
            field: "expense_required".into(),
            reason: "Savings target cannot be negative".into(),
        });
    }

    let monthly_contribution = monthly_contribution(input.monthly_salary, input.saving_percentage)?;
    let monthly_return = input.annual_return.value() / Decimal::from(MONTHS_PER_YEAR);

    let mut schedule: Vec<SavingsMonth> = Vec::new();
    let outcome = simulate(
        input.initial_savings,
        monthly_contribution,
        monthly_return,
        input.expense_required,
        |m| schedule.push(m.clone()),
    )?;

    let total_contributions = checked_total(schedule.iter().map(|m| m.contribution), "total contributions")?;
    let total_investment_return =
        checked_total(schedule.iter().map(|m| m.investment_return), "total investment return")?;
    let final_balance = schedule
        .last()
        .map(|m| m.closing_balance)
        .unwrap_or(input.initial_savings);

    let target_date = match (outcome, input.start_date) {
        (SavingsOutcome::Reached { months }, Some(date)) => date.checked_add_months(Months::new(months)),
        _ => None,
    };

    match outcome {
        SavingsOutcome::Reached { months } => {
            tracing::debug!(months, %final_balance, "savings target reached");
            if months > 30 * MONTHS_PER_YEAR {
                warnings.push(format!(
                    "Target takes {months} months (over 30 years) to reach"
                ));
            }
        }
        SavingsOutcome::Unreachable { months_simulated, shortfall, .. } => {
            tracing::warn!(months_simulated, %shortfall, "savings target not reachable");
            warnings.push(format!(
                "Target not reached within {MAX_PROJECTION_MONTHS} months; shortfall {shortfall}"
            ));
        }
    }

    if input.saving_percentage.value() > Decimal::ONE {
        warnings.push(format!(
            "Saving percentage {} exceeds 100% of salary",
            input.saving_percentage
        ));
    }

    let output = SavingsProjectionOutput {
        outcome,
        monthly_contribution,
        total_contributions,
        total_investment_return,
        final_balance,
        target_date,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Monthly-compounded savings projection",
        input,
        warnings,
        elapsed,
        output,
    ))
}
