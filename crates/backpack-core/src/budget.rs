//! Budget health and per-category spending recommendations
//!
//! These are display heuristics over month-to-date spending. They use their
//! own thresholds from [`PlannerConfig`] and are independent of goal
//! feasibility scoring.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::{BudgetThresholds, PlannerConfig};
use crate::models::ExpenseCategory;
use crate::projection::round_one_decimal;

/// Share of the recommended percentage below which a category counts as under-used
const UNDER_RECOMMENDED_FACTOR: f64 = 0.5;

/// How month-to-date spending compares to the monthly budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    /// Very little of the budget used so far
    Excellent,
    OnTrack,
    Caution,
    Alert,
    /// No monthly budget configured
    Unset,
}

impl BudgetHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::OnTrack => "on_track",
            Self::Caution => "caution",
            Self::Alert => "alert",
            Self::Unset => "unset",
        }
    }
}

impl std::fmt::Display for BudgetHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Month-to-date budget summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub monthly_budget: f64,
    pub spent: f64,
    /// Negative when over budget
    pub remaining: f64,
    pub spent_percentage: f64,
    pub savings_rate: f64,
    pub health: BudgetHealth,
}

/// Summarize spending against the monthly budget
pub fn budget_status(monthly_budget: f64, spent: f64, thresholds: &BudgetThresholds) -> BudgetStatus {
    let remaining = monthly_budget - spent;

    if !(monthly_budget.is_finite() && monthly_budget > 0.0) {
        return BudgetStatus {
            monthly_budget,
            spent,
            remaining,
            spent_percentage: 0.0,
            savings_rate: 0.0,
            health: BudgetHealth::Unset,
        };
    }

    let spent_percentage = spent / monthly_budget * 100.0;
    let health = if spent_percentage > thresholds.alert_above {
        BudgetHealth::Alert
    } else if spent_percentage > thresholds.caution_above {
        BudgetHealth::Caution
    } else if spent_percentage < thresholds.excellent_below {
        BudgetHealth::Excellent
    } else {
        BudgetHealth::OnTrack
    };

    BudgetStatus {
        monthly_budget,
        spent,
        remaining,
        spent_percentage: round_one_decimal(spent_percentage),
        savings_rate: round_one_decimal(remaining / monthly_budget * 100.0),
        health,
    }
}

/// First and last day of the calendar month containing `date`
pub fn month_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next_month.and_then(|d| d.pred_opt()).unwrap_or(date);
    (first, last)
}

/// True when a single expense is larger than the whole monthly budget
pub fn exceeds_budget(amount: f64, monthly_budget: f64) -> bool {
    monthly_budget > 0.0 && amount > monthly_budget
}

/// Where a category sits relative to its recommended share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationStatus {
    Over,
    Good,
    Under,
}

impl RecommendationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Over => "over",
            Self::Good => "good",
            Self::Under => "under",
        }
    }
}

impl std::fmt::Display for RecommendationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending in one category compared with its recommended share
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecommendation {
    pub category: ExpenseCategory,
    pub spent: f64,
    /// Share of total spending, one decimal
    pub percentage: f64,
    pub recommended: f64,
    pub status: RecommendationStatus,
}

/// Compare each category's share of spending with the configured recommendations
///
/// Categories with no spending are left out. Results are ordered by amount
/// spent, largest first.
pub fn category_recommendations(
    spending: &[(ExpenseCategory, f64)],
    config: &PlannerConfig,
) -> Vec<CategoryRecommendation> {
    let total: f64 = spending.iter().map(|(_, amount)| amount).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut recommendations: Vec<CategoryRecommendation> = spending
        .iter()
        .filter(|(_, amount)| *amount > 0.0)
        .map(|(category, amount)| {
            let percentage = amount / total * 100.0;
            let recommended = config.recommended_percent(*category);
            let status = if percentage > recommended {
                RecommendationStatus::Over
            } else if percentage < recommended * UNDER_RECOMMENDED_FACTOR {
                RecommendationStatus::Under
            } else {
                RecommendationStatus::Good
            };

            CategoryRecommendation {
                category: *category,
                spent: *amount,
                percentage: round_one_decimal(percentage),
                recommended,
                status,
            }
        })
        .collect();

    recommendations.sort_by(|a, b| b.spent.total_cmp(&a.spent));
    recommendations
}
