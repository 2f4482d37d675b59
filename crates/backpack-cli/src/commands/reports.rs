//! Report commands

use anyhow::{Context, Result};
use backpack_core::budget::{category_recommendations, month_range, RecommendationStatus};
use backpack_core::db::Database;
use backpack_core::PlannerConfig;
use chrono::NaiveDate;

use super::money;

/// Parse a YYYY-MM argument into the first day of that month
pub fn parse_month(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", value))
}

pub fn cmd_report_categories(
    db: &Database,
    config: &PlannerConfig,
    today: NaiveDate,
    month: Option<&str>,
) -> Result<()> {
    let anchor = match month {
        Some(value) => parse_month(value)?,
        None => today,
    };
    let (from, to) = month_range(anchor);
    let spending = db.spending_by_category(from, to)?;
    let recommendations = category_recommendations(&spending, config);

    println!("🧾 Category breakdown for {}", from.format("%B %Y"));
    println!();

    if recommendations.is_empty() {
        println!("No spending recorded for this month.");
        return Ok(());
    }

    println!(
        "{:13} │ {:>11} │ {:>7} │ {:>11} │ Status",
        "Category", "Spent", "Share", "Recommended"
    );
    println!("{}", "─".repeat(64));

    for rec in &recommendations {
        let status = match rec.status {
            RecommendationStatus::Over => "🔺 over",
            RecommendationStatus::Good => "✅ good",
            RecommendationStatus::Under => "🔻 under",
        };
        println!(
            "{:13} │ {:>11} │ {:>6.1}% │ {:>10.0}% │ {}",
            rec.category.as_str(),
            money(rec.spent),
            rec.percentage,
            rec.recommended,
            status
        );
    }

    let total: f64 = recommendations.iter().map(|r| r.spent).sum();
    println!("{}", "─".repeat(64));
    println!("{:13} │ {:>11}", "Total", money(total));

    Ok(())
}
