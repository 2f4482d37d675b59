//! Settings handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{AppError, AppState, AUDIT_ACTOR};
use backpack_core::models::{Settings, SettingsUpdate};

/// GET /api/settings - Current settings with configured defaults filled in
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Result<Json<Settings>, AppError> {
    Ok(Json(state.db.get_settings(&state.config.planner)?))
}

/// PUT /api/settings - Update settings; omitted fields are left unchanged
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SettingsUpdate>,
) -> Result<Json<Settings>, AppError> {
    state.db.update_settings(&body)?;

    let mut changed = Vec::new();
    if body.display_name.is_some() {
        changed.push("display_name".to_string());
    }
    if body.campus.is_some() {
        changed.push("campus".to_string());
    }
    if let Some(budget) = body.monthly_budget {
        changed.push(format!("monthly_budget={}", budget));
    }
    if let Some(capacity) = body.savings_capacity {
        changed.push(format!("savings_capacity={}", capacity));
    }

    state.db.log_audit(
        AUDIT_ACTOR,
        "update_settings",
        Some("settings"),
        None,
        Some(&changed.join(", ")),
    )?;

    Ok(Json(state.db.get_settings(&state.config.planner)?))
}
