//! Report handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use super::{parse_month_param, MonthQuery};
use crate::{AppError, AppState};
use backpack_core::budget::{category_recommendations, month_range, CategoryRecommendation};

/// Category breakdown for one month
#[derive(Serialize)]
pub struct CategoryReport {
    pub from: String,
    pub to: String,
    pub total: f64,
    pub categories: Vec<CategoryRecommendation>,
}

/// GET /api/reports/categories - Spending per category against recommended shares
pub async fn category_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<CategoryReport>, AppError> {
    let anchor = parse_month_param(params.month.as_deref(), state.today())?;
    let (from, to) = month_range(anchor);

    let spending = state.db.spending_by_category(from, to)?;
    let total = spending.iter().map(|(_, amount)| amount).sum();
    let categories = category_recommendations(&spending, &state.config.planner);

    Ok(Json(CategoryReport {
        from: from.to_string(),
        to: to.to_string(),
        total,
        categories,
    }))
}
