//! Export and full backup/import handlers

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Response, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{parse_choice_param, parse_date_param};
use crate::{AppError, AppState, AUDIT_ACTOR};
use backpack_core::db::ExpenseFilter;
use backpack_core::export::{FullBackup, ImportStats};
use backpack_core::models::ExpenseCategory;

/// Query parameters for expense export
#[derive(Debug, Deserialize)]
pub struct ExpenseExportQuery {
    /// Start date (YYYY-MM-DD)
    pub from: Option<String>,
    /// End date (YYYY-MM-DD)
    pub to: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

/// GET /api/export/expenses - Export expenses to CSV
pub async fn export_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExpenseExportQuery>,
) -> Result<Response<Body>, AppError> {
    let filter = ExpenseFilter::new()
        .search(params.search.as_deref())
        .category(parse_choice_param::<ExpenseCategory>(params.category.as_deref())?)
        .date_range(
            parse_date_param(params.from.as_deref(), "from")?,
            parse_date_param(params.to.as_deref(), "to")?,
        );

    let csv = state.db.export_expenses_csv(&filter)?;
    let rows = csv.lines().count().saturating_sub(1);
    info!("Exported {} expenses to CSV", rows);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"expenses.csv\"",
        )
        .body(Body::from(csv))
        .map_err(|e| AppError::internal(&e.to_string()))
}

/// GET /api/export/full - Export full database backup as JSON
pub async fn export_full(State(state): State<Arc<AppState>>) -> Result<Response<Body>, AppError> {
    info!("Exporting full database backup");
    let backup = state.db.export_full_backup()?;

    let json =
        serde_json::to_string_pretty(&backup).map_err(|e| AppError::internal(&e.to_string()))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"backpack-backup-{}.json\"",
                state.today().format("%Y-%m-%d")
            ),
        )
        .body(Body::from(json))
        .map_err(|e| AppError::internal(&e.to_string()))
}

/// Query parameters for full import
#[derive(Debug, Deserialize)]
pub struct ImportFullQuery {
    /// Clear existing data before import
    #[serde(default)]
    pub clear: bool,
}

/// Response for full import
#[derive(Serialize)]
pub struct ImportFullResponse {
    pub success: bool,
    pub stats: ImportStats,
}

/// POST /api/import/full - Import full database backup from JSON
pub async fn import_full(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ImportFullQuery>,
    body: String,
) -> Result<Json<ImportFullResponse>, AppError> {
    let backup: FullBackup = serde_json::from_str(&body)
        .map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))?;

    info!(
        "Importing full backup: version={}, records={}",
        backup.metadata.version, backup.metadata.total_records
    );

    let stats = state.db.import_full_backup(&backup, params.clear)?;

    state.db.log_audit(
        AUDIT_ACTOR,
        "import_backup",
        None,
        None,
        Some(&format!(
            "clear={}, goals={}, expenses={}, settings={}",
            params.clear, stats.goals, stats.expenses, stats.settings
        )),
    )?;

    Ok(Json(ImportFullResponse {
        success: true,
        stats,
    }))
}
