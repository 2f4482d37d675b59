//! Budget commands (show health, update settings)

use anyhow::Result;
use backpack_core::budget::{budget_status, month_range, BudgetHealth};
use backpack_core::db::Database;
use backpack_core::models::SettingsUpdate;
use backpack_core::PlannerConfig;
use chrono::NaiveDate;

use super::{money, AUDIT_ACTOR};

fn health_label(health: BudgetHealth) -> &'static str {
    match health {
        BudgetHealth::Excellent => "🟢 Excellent",
        BudgetHealth::OnTrack => "🟡 On track",
        BudgetHealth::Caution => "🟠 Caution",
        BudgetHealth::Alert => "🔴 Alert",
        BudgetHealth::Unset => "⚪ No budget set",
    }
}

pub fn cmd_budget_show(db: &Database, config: &PlannerConfig, today: NaiveDate) -> Result<()> {
    let settings = db.get_settings(config)?;
    let (from, to) = month_range(today);
    let spent = db.total_spent(from, to)?;
    let status = budget_status(settings.monthly_budget, spent, &config.budget);

    println!("📊 Budget for {}", from.format("%B %Y"));
    println!("─────────────────────────────────────────");
    println!("   Monthly budget:    {}", money(status.monthly_budget));
    println!("   Spent so far:      {}", money(status.spent));
    println!("   Remaining:         {}", money(status.remaining));
    if status.health != BudgetHealth::Unset {
        println!("   Used:              {:.1}%", status.spent_percentage);
        println!("   Savings rate:      {:.1}%", status.savings_rate);
    }
    println!("   Health:            {}", health_label(status.health));
    println!();
    println!("   Savings capacity:  {} per month", money(settings.savings_capacity));
    if let Some(ref name) = settings.display_name {
        println!("   Name:              {}", name);
    }
    if let Some(ref campus) = settings.campus {
        println!("   Campus:            {}", campus);
    }

    Ok(())
}

pub fn cmd_budget_set(db: &Database, update: &SettingsUpdate) -> Result<()> {
    if update.monthly_budget.is_none()
        && update.savings_capacity.is_none()
        && update.display_name.is_none()
        && update.campus.is_none()
    {
        anyhow::bail!("Nothing to update. Pass --budget, --capacity, --name or --campus");
    }

    db.update_settings(update)?;

    let mut changed = Vec::new();
    if let Some(budget) = update.monthly_budget {
        changed.push(format!("monthly_budget={}", budget));
        println!("✅ Monthly budget set to {}", money(budget));
    }
    if let Some(capacity) = update.savings_capacity {
        changed.push(format!("savings_capacity={}", capacity));
        println!("✅ Savings capacity set to {}", money(capacity));
    }
    if let Some(ref name) = update.display_name {
        changed.push("display_name".to_string());
        println!("✅ Name set to {}", name.trim());
    }
    if let Some(ref campus) = update.campus {
        changed.push("campus".to_string());
        println!("✅ Campus set to {}", campus.trim());
    }

    db.log_audit(
        AUDIT_ACTOR,
        "update_settings",
        Some("settings"),
        None,
        Some(&changed.join(", ")),
    )?;

    Ok(())
}
