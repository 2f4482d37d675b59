//! Expense commands (list, add, delete)

use anyhow::Result;
use backpack_core::db::{Database, ExpenseFilter, ExpenseSort};
use backpack_core::models::{ExpenseCategory, Mood, NewExpense, PaymentMethod};
use backpack_core::{exceeds_budget, PlannerConfig};
use chrono::NaiveDate;

use super::{money, parse_choice, parse_date, parse_optional_date, truncate, AUDIT_ACTOR};
use crate::cli::{AddExpenseArgs, ListExpensesArgs};

pub fn cmd_expenses_list(db: &Database, args: &ListExpensesArgs) -> Result<()> {
    let category = args
        .category
        .as_deref()
        .map(parse_choice::<ExpenseCategory>)
        .transpose()?;
    let sort = parse_choice::<ExpenseSort>(&args.sort)?;

    let filter = ExpenseFilter::new()
        .search(args.search.as_deref())
        .category(category)
        .date_range(
            parse_optional_date(args.from.as_deref())?,
            parse_optional_date(args.to.as_deref())?,
        )
        .sort(sort)
        .limit(Some(args.limit));

    let expenses = db.list_expenses(&filter)?;
    let total = db.count_expenses(&filter.clone().limit(None))?;

    if expenses.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }

    println!("💸 Expenses (showing {} of {})", expenses.len(), total);
    println!();
    println!(
        "{:>5} │ {:10} │ {:28} │ {:>10} │ {:13} │ {:9}",
        "ID", "Date", "Description", "Amount", "Category", "Mood"
    );
    println!("{}", "─".repeat(90));

    for expense in &expenses {
        println!(
            "{:>5} │ {:10} │ {:28} │ {:>10} │ {:13} │ {:9}",
            expense.id,
            expense.date,
            truncate(&expense.description, 28),
            money(expense.amount),
            expense.category,
            expense.mood
        );
    }

    let shown: f64 = expenses.iter().map(|e| e.amount).sum();
    println!();
    println!("Total shown: {}", money(shown));

    Ok(())
}

pub fn cmd_expenses_add(
    db: &Database,
    config: &PlannerConfig,
    today: NaiveDate,
    args: &AddExpenseArgs,
) -> Result<()> {
    let date = match args.date.as_deref() {
        Some(value) => parse_date(value)?,
        None => today,
    };
    let expense = NewExpense {
        amount: args.amount,
        category: parse_choice::<ExpenseCategory>(&args.category)?,
        description: args.description.clone(),
        mood: parse_choice::<Mood>(&args.mood)?,
        payment_method: parse_choice::<PaymentMethod>(&args.payment)?,
        notes: args.notes.clone(),
        date,
    };

    let settings = db.get_settings(config)?;
    if exceeds_budget(expense.amount, settings.monthly_budget) {
        println!(
            "⚠️  {} is more than your whole monthly budget of {}",
            money(expense.amount),
            money(settings.monthly_budget)
        );
    }

    let expense = db.add_expense(&expense)?;
    db.log_audit(
        AUDIT_ACTOR,
        "create_expense",
        Some("expense"),
        Some(expense.id),
        Some(&format!("{:.2} {}", expense.amount, expense.category)),
    )?;

    println!(
        "✅ Recorded #{}: {} on {} ({}, {})",
        expense.id,
        money(expense.amount),
        expense.description,
        expense.category,
        expense.date
    );

    Ok(())
}

pub fn cmd_expenses_delete(db: &Database, id: i64) -> Result<()> {
    db.delete_expense(id)?;
    db.log_audit(AUDIT_ACTOR, "delete_expense", Some("expense"), Some(id), None)?;

    println!("🗑️  Deleted expense #{}", id);
    Ok(())
}
