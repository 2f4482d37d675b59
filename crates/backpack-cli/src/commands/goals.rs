//! Goal commands: the wishboard, savings deposits and plan previews

use anyhow::{Context, Result};
use backpack_core::db::Database;
use backpack_core::models::{GoalCategory, GoalUpdate, NewGoal, Priority};
use backpack_core::planner::{self, GoalPlan};
use backpack_core::{GoalSnapshot, PlannerConfig, ProjectionResult};
use chrono::NaiveDate;

use super::{money, parse_choice, parse_optional_date, truncate, AUDIT_ACTOR};
use crate::cli::{AddGoalArgs, EditGoalArgs};

fn print_projection(projection: &ProjectionResult) {
    match projection.days_remaining {
        Some(days) if days > 0 => println!(
            "   Time left:      {} days ({} months)",
            days, projection.months_remaining
        ),
        Some(_) => println!("   Time left:      due now"),
        None => println!(
            "   Time left:      no date set ({} month horizon)",
            projection.months_remaining
        ),
    }
    println!("   Per month:      {}", money(projection.required_monthly));
    println!("   Per week:       {}", money(projection.required_weekly));
    println!("   Per day:        {}", money(projection.required_daily));
    if projection.budget_degraded {
        println!("   Of budget:      n/a (no monthly budget set)");
    } else {
        println!("   Of budget:      {:.1}%", projection.budget_percentage);
    }
}

fn print_plan(plan: &GoalPlan) {
    let goal = &plan.goal;
    println!("🎯 {} (#{})", goal.name, goal.id);
    println!("─────────────────────────────────────────");
    println!(
        "   Saved:          {} of {} ({:.1}%)",
        money(goal.saved_amount),
        money(goal.target_amount),
        plan.progress_percent
    );
    println!("   Remaining:      {}", money(plan.remaining));
    println!("   Priority:       {}", goal.priority);
    println!("   Category:       {}", goal.category);
    if let Some(date) = goal.target_date {
        println!("   Target date:    {}", date);
    }
    if let Some(ref description) = goal.description {
        println!("   Notes:          {}", description);
    }
    println!();
    print_projection(&plan.projection);
    println!("   Feasibility:    {}", plan.feasibility.label());
    if plan.suggested_savings > 0.0 {
        println!();
        println!(
            "   💡 Quick add: backpack goals save {} {:.0}",
            goal.id, plan.suggested_savings
        );
    } else {
        println!();
        println!(
            "   🎉 Goal reached! Mark it bought: backpack goals purchase {}",
            goal.id
        );
    }
}

pub fn cmd_goals_list(db: &Database, config: &PlannerConfig, today: NaiveDate) -> Result<()> {
    let settings = db.get_settings(config)?;
    let goals = db.list_goals()?;

    if goals.is_empty() {
        println!("No goals yet. Add one with: backpack goals add \"Laptop\" --target 50000");
        return Ok(());
    }

    let plans = planner::plan_goals(&goals, &settings, today)?;
    let stats = planner::wishboard_stats(&goals, today);

    println!("🎯 Wishboard ({} goals, {} complete)", stats.total_goals, stats.completed_goals);
    println!();
    println!(
        "{:>4} │ {:20} │ {:>12} │ {:>12} │ {:>6} │ {:>10} │ Feasibility",
        "ID", "Goal", "Saved", "Target", "Done", "Per month"
    );
    println!("{}", "─".repeat(96));

    for plan in &plans {
        println!(
            "{:>4} │ {:20} │ {:>12} │ {:>12} │ {:>5.1}% │ {:>10} │ {}",
            plan.goal.id,
            truncate(&plan.goal.name, 20),
            money(plan.goal.saved_amount),
            money(plan.goal.target_amount),
            plan.progress_percent,
            money(plan.projection.required_monthly),
            plan.feasibility.label()
        );
    }

    println!();
    println!(
        "Total saved: {} of {} ({:.1}%)",
        money(stats.total_saved),
        money(stats.total_target),
        stats.average_progress
    );
    if let Some(months) = stats.average_months_to_complete {
        println!("Average time to go: {} months", months);
    }

    Ok(())
}

pub fn cmd_goals_add(
    db: &Database,
    config: &PlannerConfig,
    today: NaiveDate,
    args: &AddGoalArgs,
) -> Result<()> {
    let new_goal = NewGoal {
        name: args.name.clone(),
        target_amount: args.target,
        saved_amount: args.saved,
        target_date: parse_optional_date(args.date.as_deref())?,
        priority: parse_choice::<Priority>(&args.priority)?,
        category: parse_choice::<GoalCategory>(&args.category)?,
        description: args.description.clone(),
    };

    let goal = db.create_goal(&new_goal)?;
    db.log_audit(
        AUDIT_ACTOR,
        "create_goal",
        Some("goal"),
        Some(goal.id),
        Some(&goal.name),
    )?;

    println!("✅ Added goal #{}: {}", goal.id, goal.name);
    println!();

    let settings = db.get_settings(config)?;
    let plan = planner::plan_goal(&goal, &settings, today)?;
    print_projection(&plan.projection);
    println!("   Feasibility:    {}", plan.feasibility.label());

    Ok(())
}

pub fn cmd_goals_save(db: &Database, id: i64, amount: f64) -> Result<()> {
    let update = db.add_savings(id, amount)?;
    if update.applied == 0.0 {
        println!(
            "✅ {} is already fully saved ({}), nothing added",
            update.goal.name,
            money(update.goal.target_amount)
        );
        println!("   Mark it bought with: backpack goals purchase {}", id);
        return Ok(());
    }

    db.log_audit(
        AUDIT_ACTOR,
        "add_savings",
        Some("goal"),
        Some(id),
        Some(&format!("{:.2}", update.applied)),
    )?;

    println!(
        "💰 Added {} to {} ({} of {}, {:.1}%)",
        money(update.applied),
        update.goal.name,
        money(update.goal.saved_amount),
        money(update.goal.target_amount),
        update.goal.progress_percent()
    );
    if update.applied < amount {
        println!(
            "   Only {} was needed to reach the target",
            money(update.applied)
        );
    }
    if update.completed {
        println!("🎉 Goal complete! Mark it bought with: backpack goals purchase {}", id);
    }

    Ok(())
}

pub fn cmd_goals_edit(db: &Database, args: &EditGoalArgs) -> Result<()> {
    let update = GoalUpdate {
        name: args.name.clone(),
        target_amount: args.target,
        target_date: parse_optional_date(args.date.as_deref())?,
        clear_target_date: args.clear_date,
        priority: args.priority.as_deref().map(parse_choice).transpose()?,
        category: args.category.as_deref().map(parse_choice).transpose()?,
        description: args.description.clone(),
    };

    let goal = db.update_goal(args.id, &update)?;
    db.log_audit(
        AUDIT_ACTOR,
        "update_goal",
        Some("goal"),
        Some(goal.id),
        Some(&goal.name),
    )?;

    println!("✅ Updated goal #{}: {}", goal.id, goal.name);
    println!(
        "   {} of {} saved",
        money(goal.saved_amount),
        money(goal.target_amount)
    );

    Ok(())
}

pub fn cmd_goals_delete(db: &Database, id: i64) -> Result<()> {
    let goal = db
        .get_goal(id)?
        .with_context(|| format!("Goal {} not found", id))?;

    db.delete_goal(id)?;
    db.log_audit(AUDIT_ACTOR, "delete_goal", Some("goal"), Some(id), Some(&goal.name))?;

    println!("🗑️  Deleted goal #{}: {}", id, goal.name);
    Ok(())
}

pub fn cmd_goals_purchase(db: &Database, id: i64) -> Result<()> {
    let goal = db.mark_purchased(id)?;
    db.log_audit(
        AUDIT_ACTOR,
        "purchase_goal",
        Some("goal"),
        Some(id),
        Some(&goal.name),
    )?;

    println!("🛍️  Enjoy your {}! It has been removed from the wishboard.", goal.name);
    Ok(())
}

pub fn cmd_goals_show(
    db: &Database,
    config: &PlannerConfig,
    today: NaiveDate,
    id: i64,
) -> Result<()> {
    let goal = db
        .get_goal(id)?
        .with_context(|| format!("Goal {} not found", id))?;
    let settings = db.get_settings(config)?;
    let plan = planner::plan_goal(&goal, &settings, today)?;

    print_plan(&plan);
    Ok(())
}

/// Preview a prospective goal without storing it
pub fn cmd_plan(
    db: &Database,
    config: &PlannerConfig,
    today: NaiveDate,
    target: f64,
    saved: f64,
    date: Option<&str>,
) -> Result<()> {
    let snapshot = GoalSnapshot {
        target_amount: target,
        saved_amount: saved,
        target_date: parse_optional_date(date)?,
    };
    let settings = db.get_settings(config)?;
    let preview = planner::preview(&snapshot, &settings, today)?;

    println!("📐 Plan for {} (saved {})", money(target), money(saved));
    println!("─────────────────────────────────────────");
    print_projection(&preview.projection);
    println!("   Feasibility:    {}", preview.feasibility.label());
    if settings.savings_capacity > 0.0 {
        println!(
            "   Capacity:       {} per month",
            money(settings.savings_capacity)
        );
    } else {
        println!("   💡 Set a savings capacity to score feasibility: backpack budget set --capacity 3000");
    }

    Ok(())
}
