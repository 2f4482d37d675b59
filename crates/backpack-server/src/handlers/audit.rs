//! Audit log handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, MAX_PAGE_LIMIT};
use backpack_core::AuditEntry;

/// Query parameters for the history view
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: i64,
}

fn default_history_limit() -> i64 {
    100
}

/// GET /api/history - Recent changes, newest first
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<AuditEntry>>, AppError> {
    let limit = params.limit.max(1).min(MAX_PAGE_LIMIT);
    Ok(Json(state.db.list_audit_log(limit)?))
}
