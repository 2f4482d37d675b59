//! Budget health handler

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::parse_month_param;
use crate::{AppError, AppState};
use backpack_core::budget::{budget_status, month_range, BudgetStatus};

/// Query parameters selecting a month
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// Month (YYYY-MM), defaults to the current month
    pub month: Option<String>,
}

/// Budget health for one month
#[derive(Serialize)]
pub struct BudgetResponse {
    /// First day of the month
    pub from: String,
    /// Last day of the month
    pub to: String,
    #[serde(flatten)]
    pub status: BudgetStatus,
    pub savings_capacity: f64,
}

/// GET /api/budget - Month-to-date spending against the monthly budget
pub async fn get_budget(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<BudgetResponse>, AppError> {
    let anchor = parse_month_param(params.month.as_deref(), state.today())?;
    let (from, to) = month_range(anchor);

    let settings = state.db.get_settings(&state.config.planner)?;
    let spent = state.db.total_spent(from, to)?;
    let status = budget_status(settings.monthly_budget, spent, &state.config.planner.budget);

    Ok(Json(BudgetResponse {
        from: from.to_string(),
        to: to.to_string(),
        status,
        savings_capacity: settings.savings_capacity,
    }))
}
