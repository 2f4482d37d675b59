//! Domain models for Backpack

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A savings goal ("wish") the student is saving towards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target_amount: f64,
    /// Never exceeds `target_amount`
    pub saved_amount: f64,
    /// Absent means the default twelve-month horizon
    pub target_date: Option<NaiveDate>,
    pub priority: Priority,
    pub category: GoalCategory,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Amount still to be saved (never negative)
    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.saved_amount).max(0.0)
    }

    /// Saved share of the target, 0-100
    pub fn progress_percent(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.saved_amount / self.target_amount * 100.0).min(100.0)
    }

    pub fn is_complete(&self) -> bool {
        self.saved_amount >= self.target_amount
    }

    pub fn status(&self) -> GoalStatus {
        if self.is_complete() {
            GoalStatus::Completed
        } else {
            GoalStatus::Active
        }
    }
}

/// Lifecycle state of a goal, derived from its amounts
///
/// `Active` becomes `Completed` once the saved amount reaches the target.
/// Savings are clamped so a completed goal never goes back to active unless
/// its target is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Completed,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// New goal for creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
    /// Initial amount already put aside
    #[serde(default)]
    pub saved_amount: f64,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: GoalCategory,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial edit of an existing goal
///
/// Saved progress is not editable here; use the savings operation instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub target_amount: Option<f64>,
    pub target_date: Option<NaiveDate>,
    /// Drop the target date and fall back to the default horizon
    pub clear_target_date: bool,
    pub priority: Option<Priority>,
    pub category: Option<GoalCategory>,
    pub description: Option<String>,
}

/// Outcome of adding savings to a goal
#[derive(Debug, Clone, Serialize)]
pub struct SavingsUpdate {
    pub goal: Goal,
    /// Amount actually credited after clamping to the target
    pub applied: f64,
    /// True when this deposit moved the goal from active to completed
    pub completed: bool,
}

/// Goal priority, used for ordering the wishboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Sort weight, higher first
    pub fn weight(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a goal is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Electronics,
    Travel,
    Education,
    Fashion,
    Health,
    Vehicle,
    Entertainment,
    #[default]
    Other,
}

impl GoalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Travel => "travel",
            Self::Education => "education",
            Self::Fashion => "fashion",
            Self::Health => "health",
            Self::Vehicle => "vehicle",
            Self::Entertainment => "entertainment",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for GoalCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "electronics" => Ok(Self::Electronics),
            "travel" => Ok(Self::Travel),
            "education" => Ok(Self::Education),
            "fashion" => Ok(Self::Fashion),
            "health" => Ok(Self::Health),
            "vehicle" => Ok(Self::Vehicle),
            "entertainment" => Ok(Self::Entertainment),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown goal category: {}", s)),
        }
    }
}

impl std::fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recorded expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub description: String,
    pub mood: Mood,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// New expense for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
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
    pub date: NaiveDate,
}

/// Spending category for expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Entertainment,
    Education,
    Shopping,
    Clothing,
    Healthcare,
    Utilities,
    #[default]
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 9] = [
        Self::Food,
        Self::Transport,
        Self::Entertainment,
        Self::Education,
        Self::Shopping,
        Self::Clothing,
        Self::Healthcare,
        Self::Utilities,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Entertainment => "entertainment",
            Self::Education => "education",
            Self::Shopping => "shopping",
            Self::Clothing => "clothing",
            Self::Healthcare => "healthcare",
            Self::Utilities => "utilities",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "transport" => Ok(Self::Transport),
            "entertainment" => Ok(Self::Entertainment),
            "education" => Ok(Self::Education),
            "shopping" => Ok(Self::Shopping),
            "clothing" => Ok(Self::Clothing),
            "healthcare" => Ok(Self::Healthcare),
            "utilities" => Ok(Self::Utilities),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown expense category: {}", s)),
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the student felt about a purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    #[default]
    Neutral,
    Sad,
    Excited,
    Confident,
    Worried,
    Regretful,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Sad => "sad",
            Self::Excited => "excited",
            Self::Confident => "confident",
            Self::Worried => "worried",
            Self::Regretful => "regretful",
        }
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "happy" => Ok(Self::Happy),
            "neutral" => Ok(Self::Neutral),
            "sad" => Ok(Self::Sad),
            "excited" => Ok(Self::Excited),
            "confident" => Ok(Self::Confident),
            "worried" => Ok(Self::Worried),
            "regretful" => Ok(Self::Regretful),
            _ => Err(format!("Unknown mood: {}", s)),
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method used for an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Upi,
    Card,
    Cash,
    NetBanking,
    Wallet,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upi => "upi",
            Self::Card => "card",
            Self::Cash => "cash",
            Self::NetBanking => "net_banking",
            Self::Wallet => "wallet",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upi" => Ok(Self::Upi),
            "card" | "debit" | "credit" => Ok(Self::Card),
            "cash" => Ok(Self::Cash),
            "net_banking" | "netbanking" => Ok(Self::NetBanking),
            "wallet" => Ok(Self::Wallet),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown payment method: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-user profile and money settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub display_name: Option<String>,
    pub campus: Option<String>,
    pub monthly_budget: f64,
    /// How much the student can realistically put aside each month
    pub savings_capacity: f64,
}

/// Partial settings update; `None` leaves a value unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsUpdate {
    pub display_name: Option<String>,
    pub campus: Option<String>,
    pub monthly_budget: Option<f64>,
    pub savings_capacity: Option<f64>,
}
