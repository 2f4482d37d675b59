//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod audit;
pub mod budget;
pub mod expenses;
pub mod export;
pub mod goals;
pub mod reports;
pub mod settings;

// Re-export all handlers for use in router
pub use audit::*;
pub use budget::*;
pub use expenses::*;
pub use export::*;
pub use goals::*;
pub use reports::*;
pub use settings::*;

use chrono::NaiveDate;

use crate::AppError;

/// Parse an optional YYYY-MM-DD query parameter
pub(crate) fn parse_date_param(value: Option<&str>, name: &str) -> Result<Option<NaiveDate>, AppError> {
    value
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .map_err(|_| AppError::bad_request(&format!("Invalid '{}' date format (use YYYY-MM-DD)", name)))
}

/// Parse an optional YYYY-MM month parameter, falling back to `today`
pub(crate) fn parse_month_param(value: Option<&str>, today: NaiveDate) -> Result<NaiveDate, AppError> {
    match value {
        Some(month) => NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
            .map_err(|_| AppError::bad_request("Invalid 'month' format (use YYYY-MM)")),
        None => Ok(today),
    }
}

/// Parse an optional enum query parameter such as a category
pub(crate) fn parse_choice_param<T>(value: Option<&str>) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<T>())
        .transpose()
        .map_err(|e| AppError::bad_request(&e))
}
