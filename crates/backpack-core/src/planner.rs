//! Goal planning: projection plus feasibility for stored goals
//!
//! Joins a goal snapshot with the user's budget and savings capacity to
//! produce everything the wishboard shows for a goal, and aggregates the
//! wishboard totals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::feasibility::{score_feasibility, FeasibilityTier};
use crate::models::{Goal, GoalStatus, Settings};
use crate::projection::{project, GoalSnapshot, ProjectionResult, DAYS_PER_MONTH};

/// Fraction of the remaining amount offered as the quick-add suggestion
const SUGGESTION_RATE: f64 = 0.1;

/// A goal together with its projection and feasibility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalPlan {
    pub goal: Goal,
    pub status: GoalStatus,
    pub progress_percent: f64,
    pub remaining: f64,
    pub projection: ProjectionResult,
    pub feasibility: FeasibilityTier,
    /// Suggested amount for the next deposit
    pub suggested_savings: f64,
}

/// Projection and feasibility for a goal that has not been saved yet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanPreview {
    pub projection: ProjectionResult,
    pub feasibility: FeasibilityTier,
}

/// Build the plan for one goal
pub fn plan_goal(goal: &Goal, settings: &Settings, today: NaiveDate) -> Result<GoalPlan> {
    let projection = project(&GoalSnapshot::from(goal), today, settings.monthly_budget)?;
    let feasibility = score_feasibility(projection.required_monthly, settings.savings_capacity);

    Ok(GoalPlan {
        goal: goal.clone(),
        status: goal.status(),
        progress_percent: goal.progress_percent(),
        remaining: goal.remaining(),
        suggested_savings: suggested_savings(goal.target_amount, goal.saved_amount),
        projection,
        feasibility,
    })
}

/// Build plans for a list of goals, keeping their order
pub fn plan_goals(goals: &[Goal], settings: &Settings, today: NaiveDate) -> Result<Vec<GoalPlan>> {
    goals
        .iter()
        .map(|goal| plan_goal(goal, settings, today))
        .collect()
}

/// Preview the plan for a prospective goal
pub fn preview(
    snapshot: &GoalSnapshot,
    settings: &Settings,
    today: NaiveDate,
) -> Result<PlanPreview> {
    let projection = project(snapshot, today, settings.monthly_budget)?;
    let feasibility = score_feasibility(projection.required_monthly, settings.savings_capacity);
    Ok(PlanPreview {
        projection,
        feasibility,
    })
}

/// Suggested next deposit: a tenth of what is left, rounded up, never more
/// than what is left
pub fn suggested_savings(target_amount: f64, saved_amount: f64) -> f64 {
    let remaining = target_amount - saved_amount;
    if remaining <= 0.0 {
        return 0.0;
    }
    remaining.min((remaining * SUGGESTION_RATE).ceil())
}

/// Wishboard totals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WishboardStats {
    pub total_goals: usize,
    pub completed_goals: usize,
    pub total_target: f64,
    pub total_saved: f64,
    /// Total saved over total target, in percent
    pub average_progress: f64,
    /// Mean months left over active goals with a future target date
    pub average_months_to_complete: Option<u32>,
}

/// Aggregate the wishboard totals for a set of goals
pub fn wishboard_stats(goals: &[Goal], today: NaiveDate) -> WishboardStats {
    let total_target: f64 = goals.iter().map(|g| g.target_amount).sum();
    let total_saved: f64 = goals.iter().map(|g| g.saved_amount).sum();
    let completed_goals = goals.iter().filter(|g| g.is_complete()).count();

    let average_progress = if total_target > 0.0 {
        total_saved / total_target * 100.0
    } else {
        0.0
    };

    let months: Vec<i64> = goals
        .iter()
        .filter(|g| !g.is_complete())
        .filter_map(|g| g.target_date)
        .map(|date| {
            let days = (date - today).num_days();
            (days + DAYS_PER_MONTH - 1).div_euclid(DAYS_PER_MONTH)
        })
        .filter(|m| *m > 0)
        .collect();

    let average_months_to_complete = if months.is_empty() {
        None
    } else {
        let mean = months.iter().sum::<i64>() as f64 / months.len() as f64;
        Some(mean.round() as u32)
    };

    WishboardStats {
        total_goals: goals.len(),
        completed_goals,
        total_target,
        total_saved,
        average_progress,
        average_months_to_complete,
    }
}
