//! Expense handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{parse_choice_param, parse_date_param};
use crate::{AppError, AppState, SuccessResponse, AUDIT_ACTOR, MAX_PAGE_LIMIT};
use backpack_core::db::{ExpenseFilter, ExpenseSort};
use backpack_core::exceeds_budget;
use backpack_core::models::{Expense, ExpenseCategory, Mood, NewExpense, PaymentMethod};

/// Query parameters for listing expenses
#[derive(Debug, Deserialize)]
pub struct ExpenseQuery {
    /// Search description, notes, category or amount
    pub search: Option<String>,
    pub category: Option<String>,
    /// Start date (YYYY-MM-DD)
    pub from: Option<String>,
    /// End date (YYYY-MM-DD)
    pub to: Option<String>,
    /// newest, oldest, highest, lowest
    pub sort: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// Expense list with the unpaginated total
#[derive(Serialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
    pub total: i64,
}

/// GET /api/expenses - List expenses
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExpenseQuery>,
) -> Result<Json<ExpenseListResponse>, AppError> {
    let limit = params.limit.max(1).min(MAX_PAGE_LIMIT);
    let category = parse_choice_param::<ExpenseCategory>(params.category.as_deref())?;
    let sort = parse_choice_param::<ExpenseSort>(params.sort.as_deref())?.unwrap_or_default();

    let filter = ExpenseFilter::new()
        .search(params.search.as_deref())
        .category(category)
        .date_range(
            parse_date_param(params.from.as_deref(), "from")?,
            parse_date_param(params.to.as_deref(), "to")?,
        )
        .sort(sort);

    let total = state.db.count_expenses(&filter)?;
    let expenses = state.db.list_expenses(&filter.limit(Some(limit)))?;

    Ok(Json(ExpenseListResponse { expenses, total }))
}

/// Request body for recording an expense
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub amount: f64,
    #[serde(default)]
    pub category: ExpenseCategory,
    pub description: String,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: Option<String>,
    /// Defaults to today
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Response for a recorded expense
#[derive(Serialize)]
pub struct CreateExpenseResponse {
    pub expense: Expense,
    /// True when this single expense is larger than the monthly budget
    pub exceeds_budget: bool,
}

/// POST /api/expenses - Record an expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<CreateExpenseResponse>), AppError> {
    let new_expense = NewExpense {
        amount: body.amount,
        category: body.category,
        description: body.description,
        mood: body.mood,
        payment_method: body.payment_method,
        notes: body.notes,
        date: body.date.unwrap_or_else(|| state.today()),
    };

    let settings = state.db.get_settings(&state.config.planner)?;
    let over_budget = exceeds_budget(new_expense.amount, settings.monthly_budget);

    let expense = state.db.add_expense(&new_expense)?;

    state.db.log_audit(
        AUDIT_ACTOR,
        "create_expense",
        Some("expense"),
        Some(expense.id),
        Some(&format!("{:.2} {}", expense.amount, expense.category)),
    )?;

    Ok((
        StatusCode::CREATED,
        Json(CreateExpenseResponse {
            expense,
            exceeds_budget: over_budget,
        }),
    ))
}

/// DELETE /api/expenses/:id - Delete an expense
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_expense(id)?;

    state
        .db
        .log_audit(AUDIT_ACTOR, "delete_expense", Some("expense"), Some(id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}
