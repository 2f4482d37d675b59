//! Expense filter builder for constructing dynamic SQL queries
//!
//! Shared by expense listing, counting and CSV export so the three never
//! disagree about which rows match.

use chrono::NaiveDate;

use crate::models::ExpenseCategory;

/// Sort order for expense listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseSort {
    #[default]
    Newest,
    Oldest,
    Highest,
    Lowest,
}

impl ExpenseSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Highest => "highest",
            Self::Lowest => "lowest",
        }
    }

    fn order_clause(&self) -> &'static str {
        match self {
            Self::Newest => "ORDER BY e.date DESC, e.id DESC",
            Self::Oldest => "ORDER BY e.date ASC, e.id ASC",
            Self::Highest => "ORDER BY e.amount DESC, e.id DESC",
            Self::Lowest => "ORDER BY e.amount ASC, e.id DESC",
        }
    }
}

impl std::str::FromStr for ExpenseSort {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" | "date-desc" => Ok(Self::Newest),
            "oldest" | "date-asc" => Ok(Self::Oldest),
            "highest" | "amount-desc" => Ok(Self::Highest),
            "lowest" | "amount-asc" => Ok(Self::Lowest),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

/// Builder for constructing expense query filters
///
/// The lifetime `'query` is how long the search text must stay valid.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter<'query> {
    pub search: Option<&'query str>,
    pub category: Option<ExpenseCategory>,
    /// Inclusive lower bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound (the whole day counts)
    pub to: Option<NaiveDate>,
    pub sort: ExpenseSort,
    pub limit: Option<i64>,
}

/// Result of building a filter - contains SQL components and parameters
pub struct FilterResult {
    /// WHERE clause including "WHERE" keyword (empty if no conditions)
    pub where_clause: String,
    /// ORDER BY clause including "ORDER BY" keyword
    pub order_clause: &'static str,
    /// LIMIT clause (empty if unlimited)
    pub limit_clause: String,
    /// Parameters for the query (boxed for rusqlite compatibility)
    pub params: Vec<Box<dyn rusqlite::ToSql>>,
}

impl<'query> ExpenseFilter<'query> {
    /// Create a new filter builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set search text (matches description, notes, category and amount)
    pub fn search(mut self, query: Option<&'query str>) -> Self {
        self.search = query;
        self
    }

    /// Set category filter
    pub fn category(mut self, category: Option<ExpenseCategory>) -> Self {
        self.category = category;
        self
    }

    /// Set date range filter, either end optional
    pub fn date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn sort(mut self, sort: ExpenseSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn limit(mut self, limit: Option<i64>) -> Self {
        self.limit = limit;
        self
    }

    /// Build the filter components
    pub fn build(&self) -> FilterResult {
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(q) = self.search {
            if !q.trim().is_empty() {
                conditions.push(
                    "(e.description LIKE ? COLLATE NOCASE OR e.notes LIKE ? COLLATE NOCASE \
                     OR e.category LIKE ? COLLATE NOCASE OR CAST(e.amount AS TEXT) LIKE ?)"
                        .to_string(),
                );
                let pattern = format!("%{}%", q.trim());
                for _ in 0..4 {
                    params.push(Box::new(pattern.clone()));
                }
            }
        }

        if let Some(category) = self.category {
            conditions.push("e.category = ?".to_string());
            params.push(Box::new(category.as_str()));
        }

        // Dates are stored as YYYY-MM-DD so string comparison is date order
        if let Some(from) = self.from {
            conditions.push("e.date >= ?".to_string());
            params.push(Box::new(from.to_string()));
        }
        if let Some(to) = self.to {
            conditions.push("e.date <= ?".to_string());
            params.push(Box::new(to.to_string()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit_clause = match self.limit {
            Some(limit) if limit > 0 => format!("LIMIT {}", limit),
            _ => String::new(),
        };

        FilterResult {
            where_clause,
            order_clause: self.sort.order_clause(),
            limit_clause,
            params,
        }
    }
}

impl FilterResult {
    /// Get parameter references for query execution
    pub fn params_refs(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}
