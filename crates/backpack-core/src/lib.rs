//! Backpack Core Library
//!
//! Shared functionality for the Backpack student finance tracker:
//! - Savings projection for goals (monthly/weekly/daily requirements)
//! - Feasibility scoring against savings capacity
//! - Goal planning and wishboard statistics
//! - Budget health and category spending recommendations
//! - Database access and migrations
//! - Expense CSV export and full JSON backups
//! - Planner configuration

pub mod budget;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod feasibility;
pub mod models;
pub mod planner;
pub mod projection;

pub use budget::{
    budget_status, category_recommendations, exceeds_budget, month_range, BudgetHealth, BudgetStatus,
    CategoryRecommendation, RecommendationStatus,
};
pub use config::{BudgetThresholds, PlannerConfig};
pub use db::{AuditEntry, Database, ExpenseFilter, ExpenseSort};
pub use error::{Error, Result};
pub use export::{FullBackup, ImportStats};
pub use feasibility::{score_feasibility, FeasibilityTier};
pub use planner::{GoalPlan, PlanPreview, WishboardStats};
pub use projection::{project, GoalSnapshot, ProjectionResult};
