//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` / `load_config` - Shared utilities to open the database and planner config
//! - Argument parsing helpers for dates and enum values
//! - `cmd_init` - Initialize the database

use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use backpack_core::{db::Database, PlannerConfig};
use chrono::NaiveDate;
use tracing::debug;

/// Actor recorded in the audit log for CLI changes
pub const AUDIT_ACTOR: &str = "cli";

pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

/// Load the planner config from `--config`, the user config, or the built-in defaults
pub fn load_config(config_path: Option<&Path>) -> Result<PlannerConfig> {
    debug!(?config_path, "Loading planner config");
    PlannerConfig::load(config_path).context("Failed to load planner config")
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a YYYY-MM-DD argument
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

pub fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    value.map(parse_date).transpose()
}

/// Parse an enum argument that uses string errors (categories, moods, etc.)
pub fn parse_choice<T>(value: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    value.parse::<T>().map_err(|e| anyhow::anyhow!(e))
}

/// Ask a yes/no question on stdin, defaulting to no
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Format an amount with the rupee sign and two decimals
pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-₹{:.2}", amount.abs())
    } else {
        format!("₹{:.2}", amount)
    }
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let goals = db.count_goals().context("Failed to read goals")?;
    println!("   Tables ready ({} existing goals)", goals);

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Set your budget: backpack budget set --budget 20000 --capacity 3000");
    println!("  2. Add a goal: backpack goals add \"Laptop\" --target 50000 --date 2025-06-01");
    println!("  3. Track spending: backpack expenses add 120 \"Lunch\" --category food");

    Ok(())
}
