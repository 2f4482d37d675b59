//! Status, history and reset commands

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use backpack_core::budget::{budget_status, month_range};
use backpack_core::db::{Database, ExpenseFilter};
use backpack_core::planner::wishboard_stats;
use backpack_core::PlannerConfig;
use chrono::NaiveDate;

use super::{confirm, money, open_db, truncate};

pub fn cmd_status(db_path: &Path, config: &PlannerConfig, today: NaiveDate) -> Result<()> {
    println!();
    println!("🎒 Backpack Status");
    println!("   ─────────────────────────────────────────────────────────────");

    println!("   Database: {}", db_path.display());

    if !db_path.exists() {
        println!("   Size: (database not initialized)");
        println!();
        println!("   Run 'backpack init' to get started.");
        println!();
        return Ok(());
    }

    if let Ok(metadata) = fs::metadata(db_path) {
        let size_kb = metadata.len() as f64 / 1024.0;
        if size_kb < 1024.0 {
            println!("   Size: {:.1} KB", size_kb);
        } else {
            println!("   Size: {:.1} MB", size_kb / 1024.0);
        }
    }

    match open_db(db_path) {
        Ok(db) => print_summary(&db, config, today)?,
        Err(e) => {
            println!();
            println!("   ❌ Error opening database: {}", e);
        }
    }

    println!();
    Ok(())
}

fn print_summary(db: &Database, config: &PlannerConfig, today: NaiveDate) -> Result<()> {
    let settings = db.get_settings(config)?;
    let goals = db.list_goals()?;
    let stats = wishboard_stats(&goals, today);

    if let Some(ref name) = settings.display_name {
        println!("   Hi, {}!", name);
    }

    println!();
    println!(
        "   🎯 Goals: {} ({} complete)",
        stats.total_goals, stats.completed_goals
    );
    println!(
        "      Saved {} of {} ({:.1}%)",
        money(stats.total_saved),
        money(stats.total_target),
        stats.average_progress
    );

    let (from, to) = month_range(today);
    let spent = db.total_spent(from, to)?;
    let budget = budget_status(settings.monthly_budget, spent, &config.budget);
    let expenses = db.count_expenses(&ExpenseFilter::new().date_range(Some(from), Some(to)))?;

    println!();
    println!("   💸 This month: {} expenses, {} spent", expenses, money(spent));
    println!(
        "      Budget {} ({} remaining, {})",
        money(budget.monthly_budget),
        money(budget.remaining),
        budget.health
    );

    Ok(())
}

/// Show recent audit log entries
pub fn cmd_history(db: &Database, limit: i64) -> Result<()> {
    let entries = db.list_audit_log(limit)?;

    if entries.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    println!("🕘 Recent changes");
    println!();
    println!(
        "{:19} │ {:5} │ {:16} │ {:12} │ Details",
        "When", "Actor", "Action", "Entity"
    );
    println!("{}", "─".repeat(80));

    for entry in &entries {
        let entity = match (&entry.entity_type, entry.entity_id) {
            (Some(kind), Some(id)) => format!("{} #{}", kind, id),
            (Some(kind), None) => kind.clone(),
            _ => "-".to_string(),
        };
        println!(
            "{:19} │ {:5} │ {:16} │ {:12} │ {}",
            entry.timestamp,
            entry.actor,
            entry.action,
            entity,
            truncate(entry.details.as_deref().unwrap_or(""), 30)
        );
    }

    Ok(())
}

/// Path of a SQLite sidecar file (`-wal`, `-shm`, `-journal`)
fn sidecar_path(db_path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(db_path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

pub fn cmd_reset(db_path: &Path, soft: bool, yes: bool) -> Result<()> {
    if soft {
        if !db_path.exists() {
            anyhow::bail!("Database not found: {}", db_path.display());
        }

        if !yes {
            println!("⚠️  This will delete all goals, expenses and history.");
            println!("   Your budget and profile settings will be preserved.");
            println!();
            if !confirm("Are you sure?")? {
                println!("Cancelled.");
                return Ok(());
            }
        }

        let db = open_db(db_path)?;
        db.soft_reset()?;

        println!("✅ Database soft reset complete.");
        println!("   Cleared: goals, expenses, history");
        println!("   Preserved: settings");
    } else {
        if !yes {
            println!("⚠️  This will DELETE the entire database and start fresh.");
            println!("   All data including settings will be lost.");
            println!();
            if !confirm("Are you sure?")? {
                println!("Cancelled.");
                return Ok(());
            }
        }

        if db_path.exists() {
            fs::remove_file(db_path)
                .with_context(|| format!("Failed to delete database: {}", db_path.display()))?;
            for suffix in ["-wal", "-shm", "-journal"] {
                let _ = fs::remove_file(sidecar_path(db_path, suffix));
            }
        }

        super::cmd_init(db_path)?;

        println!("\n✅ Database hard reset complete.");
    }

    Ok(())
}
