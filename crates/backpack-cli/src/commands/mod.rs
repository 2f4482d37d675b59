//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `budget` - Budget health and settings commands
//! - `core` - Init and shared utilities (open_db, argument parsing)
//! - `expenses` - Expense commands (list, add, delete)
//! - `export` - Expense CSV export and full backup export/import
//! - `goals` - Goal commands and plan previews
//! - `reports` - Report generation commands
//! - `serve` - Web server command
//! - `status` - Status/history/reset commands

pub mod budget;
pub mod core;
pub mod expenses;
pub mod export;
pub mod goals;
pub mod reports;
pub mod serve;
pub mod status;

// Re-export command functions for main.rs
pub use budget::*;
pub use core::*;
pub use expenses::*;
pub use export::*;
pub use goals::*;
pub use reports::*;
pub use serve::*;
pub use status::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
