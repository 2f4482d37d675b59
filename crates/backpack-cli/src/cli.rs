//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Backpack - Plan savings goals and keep student spending in check
#[derive(Parser)]
#[command(name = "backpack")]
#[command(about = "Student savings planner and expense tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, env = "BACKPACK_DB", default_value = "backpack.db", global = true)]
    pub db: PathBuf,

    /// Planner config file (defaults to the user config, then built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Show wishboard and this month's budget at a glance
    Status,

    /// Manage savings goals (list, add, save, edit, delete, purchase, show)
    Goals {
        #[command(subcommand)]
        action: Option<GoalsAction>,
    },

    /// Preview what a goal would take without saving it
    Plan {
        /// Target amount
        #[arg(short, long)]
        target: f64,

        /// Amount already saved
        #[arg(short, long, default_value = "0")]
        saved: f64,

        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Manage expenses (list, add, delete)
    Expenses {
        #[command(subcommand)]
        action: Option<ExpensesAction>,
    },

    /// Show or change the monthly budget and savings capacity
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },

    /// Generate reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Export data (expenses as CSV or full backup)
    Export {
        #[command(subcommand)]
        export_type: ExportType,
    },

    /// Import a full JSON backup
    ImportFull {
        /// JSON backup file to import
        #[arg(short, long)]
        file: PathBuf,

        /// Clear all existing data before import
        #[arg(long)]
        clear: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show recent changes from the audit log
    History {
        /// Maximum number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Reset the database (clear data)
    Reset {
        /// Soft reset: clear goals, expenses and history but keep settings
        /// Without this flag, performs a hard reset (deletes DB file and re-initializes)
        #[arg(long)]
        soft: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory with static frontend files
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum GoalsAction {
    /// List goals with their savings plans
    List,

    /// Add a new goal
    Add(AddGoalArgs),

    /// Add money to a goal
    Save {
        /// Goal ID
        id: i64,

        /// Amount to add
        amount: f64,
    },

    /// Edit an existing goal
    Edit(EditGoalArgs),

    /// Delete a goal
    Delete {
        /// Goal ID
        id: i64,
    },

    /// Mark a completed goal as purchased (removes it from the wishboard)
    Purchase {
        /// Goal ID
        id: i64,
    },

    /// Show one goal with its full plan
    Show {
        /// Goal ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ExpensesAction {
    /// List expenses
    List(ListExpensesArgs),

    /// Record an expense
    Add(AddExpenseArgs),

    /// Delete an expense
    Delete {
        /// Expense ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Show this month's budget health
    Show,

    /// Update budget settings
    Set {
        /// Monthly budget
        #[arg(short, long)]
        budget: Option<f64>,

        /// Amount you can put aside each month
        #[arg(short, long)]
        capacity: Option<f64>,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Campus
        #[arg(long)]
        campus: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Category spending compared with recommended shares
    Categories {
        /// Month to report on (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ExportType {
    /// Export expenses to CSV
    Expenses {
        /// Output file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Only this category
        #[arg(short, long)]
        category: Option<String>,

        /// Search description, notes, category or amount
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Export a full JSON backup
    Full {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Arguments for adding a goal
#[derive(Args, Debug, Clone)]
pub struct AddGoalArgs {
    /// Goal name
    pub name: String,

    /// Target amount
    #[arg(short, long)]
    pub target: f64,

    /// Amount already saved
    #[arg(short, long, default_value = "0")]
    pub saved: f64,

    /// Target date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Priority: high, medium, low
    #[arg(short, long, default_value = "medium")]
    pub priority: String,

    /// Category: electronics, travel, education, fashion, health, vehicle, entertainment, other
    #[arg(short, long, default_value = "other")]
    pub category: String,

    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,
}

/// Arguments for editing a goal
#[derive(Args, Debug, Clone)]
pub struct EditGoalArgs {
    /// Goal ID
    pub id: i64,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New target amount
    #[arg(short, long)]
    pub target: Option<f64>,

    /// New target date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Remove the target date
    #[arg(long, conflicts_with = "date")]
    pub clear_date: bool,

    /// New priority
    #[arg(short, long)]
    pub priority: Option<String>,

    /// New category
    #[arg(short, long)]
    pub category: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,
}

/// Filters for listing expenses
#[derive(Args, Debug, Clone)]
pub struct ListExpensesArgs {
    /// Maximum number of expenses to show
    #[arg(short, long, default_value = "20")]
    pub limit: i64,

    /// Search description, notes, category or amount
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Sort: newest, oldest, highest, lowest
    #[arg(long, default_value = "newest")]
    pub sort: String,
}

/// Arguments for recording an expense
#[derive(Args, Debug, Clone)]
pub struct AddExpenseArgs {
    /// Amount spent
    pub amount: f64,

    /// What it was for
    pub description: String,

    /// Category: food, transport, entertainment, education, shopping, clothing, healthcare, utilities, other
    #[arg(short, long, default_value = "other")]
    pub category: String,

    /// Mood: happy, neutral, sad, excited, confident, worried, regretful
    #[arg(short, long, default_value = "neutral")]
    pub mood: String,

    /// Payment method: upi, card, cash, net_banking, wallet, other
    #[arg(short, long, default_value = "upi")]
    pub payment: String,

    /// Extra notes
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Date (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,
}
