//! Goal handlers: wishboard, savings deposits and plan previews

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, SuccessResponse, AUDIT_ACTOR};
use backpack_core::models::{Goal, GoalUpdate, NewGoal};
use backpack_core::planner::{self, GoalPlan, PlanPreview, WishboardStats};
use backpack_core::GoalSnapshot;

/// Load a goal and build its plan against the current settings
fn plan_for(state: &AppState, goal: &Goal) -> Result<GoalPlan, AppError> {
    let settings = state.db.get_settings(&state.config.planner)?;
    Ok(planner::plan_goal(goal, &settings, state.today())?)
}

/// GET /api/goals - List goals with their plans, wishboard order
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GoalPlan>>, AppError> {
    let settings = state.db.get_settings(&state.config.planner)?;
    let goals = state.db.list_goals()?;
    let plans = planner::plan_goals(&goals, &settings, state.today())?;
    Ok(Json(plans))
}

/// GET /api/goals/stats - Wishboard totals
pub async fn goal_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WishboardStats>, AppError> {
    let goals = state.db.list_goals()?;
    Ok(Json(planner::wishboard_stats(&goals, state.today())))
}

/// POST /api/goals - Create a goal
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewGoal>,
) -> Result<(StatusCode, Json<GoalPlan>), AppError> {
    let goal = state.db.create_goal(&body)?;

    state.db.log_audit(
        AUDIT_ACTOR,
        "create_goal",
        Some("goal"),
        Some(goal.id),
        Some(&goal.name),
    )?;

    Ok((StatusCode::CREATED, Json(plan_for(&state, &goal)?)))
}

/// GET /api/goals/:id - Get a goal with its plan
pub async fn get_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<GoalPlan>, AppError> {
    let goal = state
        .db
        .get_goal(id)?
        .ok_or_else(|| AppError::not_found(&format!("Goal {} not found", id)))?;

    Ok(Json(plan_for(&state, &goal)?))
}

/// PATCH /api/goals/:id - Edit a goal
pub async fn update_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<GoalUpdate>,
) -> Result<Json<GoalPlan>, AppError> {
    let goal = state.db.update_goal(id, &body)?;

    state.db.log_audit(
        AUDIT_ACTOR,
        "update_goal",
        Some("goal"),
        Some(id),
        Some(&goal.name),
    )?;

    Ok(Json(plan_for(&state, &goal)?))
}

/// DELETE /api/goals/:id - Delete a goal
pub async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_goal(id)?;

    state
        .db
        .log_audit(AUDIT_ACTOR, "delete_goal", Some("goal"), Some(id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}

/// Request body for adding savings
#[derive(Debug, Deserialize)]
pub struct SavingsRequest {
    pub amount: f64,
}

/// Response for adding savings
#[derive(Serialize)]
pub struct SavingsResponse {
    pub plan: GoalPlan,
    /// Amount actually credited
    pub applied: f64,
    /// True when this deposit completed the goal
    pub completed: bool,
}

/// POST /api/goals/:id/savings - Add money to a goal
pub async fn add_savings(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<SavingsRequest>,
) -> Result<Json<SavingsResponse>, AppError> {
    let update = state.db.add_savings(id, body.amount)?;

    state.db.log_audit(
        AUDIT_ACTOR,
        "add_savings",
        Some("goal"),
        Some(id),
        Some(&format!("{:.2}", update.applied)),
    )?;

    Ok(Json(SavingsResponse {
        plan: plan_for(&state, &update.goal)?,
        applied: update.applied,
        completed: update.completed,
    }))
}

/// POST /api/goals/:id/purchase - Mark a completed goal as bought
///
/// Returns 409 while the goal is still short of its target.
pub async fn purchase_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Goal>, AppError> {
    let goal = state.db.mark_purchased(id)?;

    state.db.log_audit(
        AUDIT_ACTOR,
        "purchase_goal",
        Some("goal"),
        Some(id),
        Some(&goal.name),
    )?;

    Ok(Json(goal))
}

/// Request body for previewing a goal that is not stored yet
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub target_amount: f64,
    #[serde(default)]
    pub saved_amount: f64,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

/// POST /api/plan/preview - Projection and feasibility for a prospective goal
pub async fn preview_plan(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PreviewRequest>,
) -> Result<Json<PlanPreview>, AppError> {
    let settings = state.db.get_settings(&state.config.planner)?;
    let snapshot = GoalSnapshot {
        target_amount: body.target_amount,
        saved_amount: body.saved_amount,
        target_date: body.target_date,
    };

    Ok(Json(planner::preview(&snapshot, &settings, state.today())?))
}
