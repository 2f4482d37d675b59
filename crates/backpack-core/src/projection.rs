//! Savings projection for goals
//!
//! Given how much is left to save and when it is needed, works out the
//! monthly, weekly and daily amounts required to get there. Everything here
//! is a pure function of its inputs; the current date is passed in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Goal;

/// Months used when a goal has no target date
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

/// Days counted as one month when converting a date span to months
pub const DAYS_PER_MONTH: i64 = 30;

/// Weeks counted as one month for the weekly figure
pub const WEEKS_PER_MONTH: f64 = 4.0;

/// The parts of a goal the projection depends on
///
/// Callers take this from a single read of the goal so that the calculation
/// never sees a half-applied savings update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalSnapshot {
    pub target_amount: f64,
    pub saved_amount: f64,
    pub target_date: Option<NaiveDate>,
}

impl From<&Goal> for GoalSnapshot {
    fn from(goal: &Goal) -> Self {
        Self {
            target_amount: goal.target_amount,
            saved_amount: goal.saved_amount,
            target_date: goal.target_date,
        }
    }
}

/// Required saving schedule for a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Zero once the goal is complete, otherwise at least one
    pub months_remaining: u32,
    /// `None` when the goal has no target date
    pub days_remaining: Option<i64>,
    pub required_monthly: f64,
    pub required_weekly: f64,
    pub required_daily: f64,
    /// Monthly requirement as a share of the monthly budget, one decimal
    pub budget_percentage: f64,
    /// Set when no usable monthly budget was supplied; `budget_percentage`
    /// is then reported as 0
    pub budget_degraded: bool,
}

impl ProjectionResult {
    fn complete(has_date: bool) -> Self {
        Self {
            months_remaining: 0,
            days_remaining: has_date.then_some(0),
            required_monthly: 0.0,
            required_weekly: 0.0,
            required_daily: 0.0,
            budget_percentage: 0.0,
            budget_degraded: false,
        }
    }
}

/// Check the amounts of a goal before projecting it
pub fn validate_snapshot(goal: &GoalSnapshot) -> Result<()> {
    if !goal.target_amount.is_finite() || !goal.saved_amount.is_finite() {
        return Err(Error::InvalidGoalState(
            "amounts must be finite numbers".to_string(),
        ));
    }
    if goal.target_amount <= 0.0 {
        return Err(Error::InvalidGoalState(format!(
            "target amount must be positive, got {}",
            goal.target_amount
        )));
    }
    if goal.saved_amount < 0.0 {
        return Err(Error::InvalidGoalState(format!(
            "saved amount cannot be negative, got {}",
            goal.saved_amount
        )));
    }
    if goal.saved_amount > goal.target_amount {
        return Err(Error::InvalidGoalState(format!(
            "saved amount {} exceeds target {}",
            goal.saved_amount, goal.target_amount
        )));
    }
    Ok(())
}

/// Project the saving schedule for a goal as of `today`
///
/// A target date in the past still counts as one month so the whole
/// remaining amount becomes due immediately. A `monthly_budget` of zero or
/// less does not fail; the result is flagged with `budget_degraded`.
pub fn project(
    goal: &GoalSnapshot,
    today: NaiveDate,
    monthly_budget: f64,
) -> Result<ProjectionResult> {
    validate_snapshot(goal)?;

    let remaining = goal.target_amount - goal.saved_amount;
    if remaining <= 0.0 {
        return Ok(ProjectionResult::complete(goal.target_date.is_some()));
    }

    let (months_remaining, days_remaining) = match goal.target_date {
        Some(date) => {
            let days = (date - today).num_days().max(0);
            (months_for_days(days), Some(days))
        }
        None => (DEFAULT_HORIZON_MONTHS, None),
    };

    let required_monthly = (remaining / months_remaining as f64).ceil();
    let required_weekly = (required_monthly / WEEKS_PER_MONTH).ceil();
    let required_daily = (required_monthly / DAYS_PER_MONTH as f64).ceil();

    let budget_degraded = !(monthly_budget.is_finite() && monthly_budget > 0.0);
    let budget_percentage = if budget_degraded {
        0.0
    } else {
        round_one_decimal(required_monthly / monthly_budget * 100.0)
    };

    Ok(ProjectionResult {
        months_remaining,
        days_remaining,
        required_monthly,
        required_weekly,
        required_daily,
        budget_percentage,
        budget_degraded,
    })
}

/// Whole months needed to cover `days`, never less than one
fn months_for_days(days: i64) -> u32 {
    let months = (days + DAYS_PER_MONTH - 1) / DAYS_PER_MONTH;
    months.clamp(1, u32::MAX as i64) as u32
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
