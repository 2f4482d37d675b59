//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use backpack_core::db::{Database, ExpenseFilter};
use backpack_core::models::{NewGoal, SettingsUpdate};
use backpack_core::PlannerConfig;
use chrono::NaiveDate;

use crate::cli::{AddExpenseArgs, AddGoalArgs, EditGoalArgs, ListExpensesArgs};
use crate::commands::{self, truncate};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn config() -> PlannerConfig {
    PlannerConfig::builtin().unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
}

fn goal_args(name: &str, target: f64) -> AddGoalArgs {
    AddGoalArgs {
        name: name.to_string(),
        target,
        saved: 0.0,
        date: Some("2024-10-15".to_string()),
        priority: "high".to_string(),
        category: "electronics".to_string(),
        description: None,
    }
}

fn expense_args(amount: f64, description: &str, category: &str) -> AddExpenseArgs {
    AddExpenseArgs {
        amount,
        description: description.to_string(),
        category: category.to_string(),
        mood: "neutral".to_string(),
        payment: "upi".to_string(),
        notes: None,
        date: Some("2024-07-10".to_string()),
    }
}

fn list_args() -> ListExpensesArgs {
    ListExpensesArgs {
        limit: 20,
        search: None,
        category: None,
        from: None,
        to: None,
        sort: "newest".to_string(),
    }
}

// ========== Goal Command Tests ==========

#[test]
fn test_cmd_goals_list_empty() {
    let db = setup_test_db();
    let result = commands::cmd_goals_list(&db, &config(), today());
    assert!(result.is_ok());
}

#[test]
fn test_cmd_goals_add() {
    let db = setup_test_db();
    let result = commands::cmd_goals_add(&db, &config(), today(), &goal_args("Laptop", 45000.0));
    assert!(result.is_ok());

    let goals = db.list_goals().unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].name, "Laptop");
    assert_eq!(goals[0].target_amount, 45000.0);

    let history = db.list_audit_log(10).unwrap();
    assert_eq!(history[0].action, "create_goal");
    assert_eq!(history[0].actor, "cli");
}

#[test]
fn test_cmd_goals_add_rejects_bad_input() {
    let db = setup_test_db();

    let mut args = goal_args("Laptop", 45000.0);
    args.priority = "urgent".to_string();
    assert!(commands::cmd_goals_add(&db, &config(), today(), &args).is_err());

    let mut args = goal_args("Laptop", 45000.0);
    args.date = Some("15/10/2024".to_string());
    assert!(commands::cmd_goals_add(&db, &config(), today(), &args).is_err());

    assert!(commands::cmd_goals_add(&db, &config(), today(), &goal_args("Laptop", 0.0)).is_err());
    assert_eq!(db.count_goals().unwrap(), 0);
}

#[test]
fn test_cmd_goals_save_and_purchase() {
    let db = setup_test_db();
    commands::cmd_goals_add(&db, &config(), today(), &goal_args("Headphones", 3000.0)).unwrap();
    let id = db.list_goals().unwrap()[0].id;

    // Not purchasable yet
    assert!(commands::cmd_goals_purchase(&db, id).is_err());

    assert!(commands::cmd_goals_save(&db, id, 1000.0).is_ok());
    assert_eq!(db.get_goal(id).unwrap().unwrap().saved_amount, 1000.0);

    // Overshoot is clamped to the target
    assert!(commands::cmd_goals_save(&db, id, 5000.0).is_ok());
    assert_eq!(db.get_goal(id).unwrap().unwrap().saved_amount, 3000.0);

    assert!(commands::cmd_goals_purchase(&db, id).is_ok());
    assert!(db.get_goal(id).unwrap().is_none());

    let actions: Vec<String> = db
        .list_audit_log(10)
        .unwrap()
        .into_iter()
        .map(|e| e.action)
        .collect();
    assert!(actions.contains(&"purchase_goal".to_string()));
}

#[test]
fn test_cmd_goals_save_into_complete_goal_adds_nothing() {
    let db = setup_test_db();
    commands::cmd_goals_add(&db, &config(), today(), &goal_args("Kettle", 1200.0)).unwrap();
    let id = db.list_goals().unwrap()[0].id;
    commands::cmd_goals_save(&db, id, 1200.0).unwrap();

    assert!(commands::cmd_goals_save(&db, id, 300.0).is_ok());
    assert_eq!(db.get_goal(id).unwrap().unwrap().saved_amount, 1200.0);

    let deposits = db
        .list_audit_log(10)
        .unwrap()
        .into_iter()
        .filter(|e| e.action == "add_savings")
        .count();
    assert_eq!(deposits, 1);
}

#[test]
fn test_cmd_goals_save_rejects_non_positive() {
    let db = setup_test_db();
    commands::cmd_goals_add(&db, &config(), today(), &goal_args("Bike", 8000.0)).unwrap();
    let id = db.list_goals().unwrap()[0].id;

    assert!(commands::cmd_goals_save(&db, id, 0.0).is_err());
    assert!(commands::cmd_goals_save(&db, id, -10.0).is_err());
    assert!(commands::cmd_goals_save(&db, 9999, 10.0).is_err());
}

#[test]
fn test_cmd_goals_edit() {
    let db = setup_test_db();
    commands::cmd_goals_add(&db, &config(), today(), &goal_args("Phone", 20000.0)).unwrap();
    let id = db.list_goals().unwrap()[0].id;

    let args = EditGoalArgs {
        id,
        name: Some("New phone".to_string()),
        target: Some(18000.0),
        date: None,
        clear_date: true,
        priority: Some("low".to_string()),
        category: None,
        description: None,
    };
    assert!(commands::cmd_goals_edit(&db, &args).is_ok());

    let goal = db.get_goal(id).unwrap().unwrap();
    assert_eq!(goal.name, "New phone");
    assert_eq!(goal.target_amount, 18000.0);
    assert!(goal.target_date.is_none());
    assert_eq!(goal.priority.as_str(), "low");
}

#[test]
fn test_cmd_goals_delete() {
    let db = setup_test_db();
    commands::cmd_goals_add(&db, &config(), today(), &goal_args("Trip", 10000.0)).unwrap();
    let id = db.list_goals().unwrap()[0].id;

    assert!(commands::cmd_goals_delete(&db, id).is_ok());
    assert_eq!(db.count_goals().unwrap(), 0);
    assert!(commands::cmd_goals_delete(&db, id).is_err());
}

#[test]
fn test_cmd_goals_show_and_list() {
    let db = setup_test_db();
    db.create_goal(&NewGoal {
        name: "A very long goal name that needs truncating".to_string(),
        target_amount: 5000.0,
        saved_amount: 5000.0,
        ..Default::default()
    })
    .unwrap();
    let id = db.list_goals().unwrap()[0].id;

    assert!(commands::cmd_goals_show(&db, &config(), today(), id).is_ok());
    assert!(commands::cmd_goals_show(&db, &config(), today(), id + 1).is_err());
    assert!(commands::cmd_goals_list(&db, &config(), today()).is_ok());
}

#[test]
fn test_cmd_plan() {
    let db = setup_test_db();
    assert!(commands::cmd_plan(&db, &config(), today(), 12000.0, 0.0, Some("2024-10-13")).is_ok());
    assert!(commands::cmd_plan(&db, &config(), today(), 12000.0, 2000.0, None).is_ok());

    // Invalid goal state surfaces as an error
    assert!(commands::cmd_plan(&db, &config(), today(), 1000.0, 2000.0, None).is_err());
    assert!(commands::cmd_plan(&db, &config(), today(), -5.0, 0.0, None).is_err());
}

// ========== Expense Command Tests ==========

#[test]
fn test_cmd_expenses_add_and_list() {
    let db = setup_test_db();
    assert!(commands::cmd_expenses_add(&db, &config(), today(), &expense_args(120.0, "Lunch", "food")).is_ok());
    assert!(commands::cmd_expenses_add(&db, &config(), today(), &expense_args(40.0, "Bus", "transport")).is_ok());

    assert_eq!(db.count_expenses(&ExpenseFilter::new()).unwrap(), 2);
    assert!(commands::cmd_expenses_list(&db, &list_args()).is_ok());

    let mut args = list_args();
    args.category = Some("food".to_string());
    args.sort = "highest".to_string();
    assert!(commands::cmd_expenses_list(&db, &args).is_ok());
}

#[test]
fn test_cmd_expenses_add_defaults_to_today() {
    let db = setup_test_db();
    let mut args = expense_args(75.0, "Chai", "food");
    args.date = None;
    commands::cmd_expenses_add(&db, &config(), today(), &args).unwrap();

    let expenses = db.list_expenses(&ExpenseFilter::new()).unwrap();
    assert_eq!(expenses[0].date, today());
}

#[test]
fn test_cmd_expenses_add_rejects_bad_input() {
    let db = setup_test_db();
    assert!(commands::cmd_expenses_add(&db, &config(), today(), &expense_args(0.0, "Nothing", "food")).is_err());
    assert!(commands::cmd_expenses_add(&db, &config(), today(), &expense_args(10.0, "Snack", "snacks")).is_err());

    let mut args = expense_args(10.0, "Snack", "food");
    args.mood = "hangry".to_string();
    assert!(commands::cmd_expenses_add(&db, &config(), today(), &args).is_err());

    assert_eq!(db.count_expenses(&ExpenseFilter::new()).unwrap(), 0);
}

#[test]
fn test_cmd_expenses_add_over_budget_still_records() {
    let db = setup_test_db();
    db.update_settings(&SettingsUpdate {
        monthly_budget: Some(1000.0),
        ..Default::default()
    })
    .unwrap();

    let result = commands::cmd_expenses_add(&db, &config(), today(), &expense_args(5000.0, "Laptop repair", "other"));
    assert!(result.is_ok());
    assert_eq!(db.count_expenses(&ExpenseFilter::new()).unwrap(), 1);
}

#[test]
fn test_cmd_expenses_list_bad_sort() {
    let db = setup_test_db();
    let mut args = list_args();
    args.sort = "random".to_string();
    assert!(commands::cmd_expenses_list(&db, &args).is_err());
}

#[test]
fn test_cmd_expenses_delete() {
    let db = setup_test_db();
    commands::cmd_expenses_add(&db, &config(), today(), &expense_args(120.0, "Lunch", "food")).unwrap();
    let id = db.list_expenses(&ExpenseFilter::new()).unwrap()[0].id;

    assert!(commands::cmd_expenses_delete(&db, id).is_ok());
    assert!(commands::cmd_expenses_delete(&db, id).is_err());
}

// ========== Budget and Report Command Tests ==========

#[test]
fn test_cmd_budget_set_and_show() {
    let db = setup_test_db();
    let update = SettingsUpdate {
        monthly_budget: Some(15000.0),
        savings_capacity: Some(2500.0),
        display_name: Some("Asha".to_string()),
        campus: None,
    };
    assert!(commands::cmd_budget_set(&db, &update).is_ok());

    let settings = db.get_settings(&config()).unwrap();
    assert_eq!(settings.monthly_budget, 15000.0);
    assert_eq!(settings.savings_capacity, 2500.0);
    assert_eq!(settings.display_name.as_deref(), Some("Asha"));

    assert!(commands::cmd_budget_show(&db, &config(), today()).is_ok());
}

#[test]
fn test_cmd_budget_set_validation() {
    let db = setup_test_db();
    assert!(commands::cmd_budget_set(&db, &SettingsUpdate::default()).is_err());
    assert!(commands::cmd_budget_set(
        &db,
        &SettingsUpdate {
            monthly_budget: Some(-1.0),
            ..Default::default()
        }
    )
    .is_err());
}

#[test]
fn test_cmd_report_categories() {
    let db = setup_test_db();
    commands::cmd_expenses_add(&db, &config(), today(), &expense_args(600.0, "Mess", "food")).unwrap();
    commands::cmd_expenses_add(&db, &config(), today(), &expense_args(400.0, "Books", "education")).unwrap();

    assert!(commands::cmd_report_categories(&db, &config(), today(), None).is_ok());
    assert!(commands::cmd_report_categories(&db, &config(), today(), Some("2024-06")).is_ok());
    assert!(commands::cmd_report_categories(&db, &config(), today(), Some("June")).is_err());
}

#[test]
fn test_parse_month() {
    assert_eq!(
        commands::parse_month("2024-02").unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    );
    assert!(commands::parse_month("2024-13").is_err());
}

// ========== Export / Import Command Tests ==========

#[test]
fn test_cmd_export_expenses_to_file() {
    let db = setup_test_db();
    commands::cmd_expenses_add(&db, &config(), today(), &expense_args(120.0, "Lunch", "food")).unwrap();
    commands::cmd_expenses_add(&db, &config(), today(), &expense_args(40.0, "Bus", "transport")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    let result = commands::cmd_export_expenses(&db, Some(&path), None, None, Some("food"), None);
    assert!(result.is_ok());

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.contains("Lunch"));
    assert!(!content.contains("Bus"));
}

#[test]
fn test_cmd_export_import_full_round_trip() {
    let source = setup_test_db();
    commands::cmd_goals_add(&source, &config(), today(), &goal_args("Laptop", 45000.0)).unwrap();
    commands::cmd_expenses_add(&source, &config(), today(), &expense_args(120.0, "Lunch", "food")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.json");
    assert!(commands::cmd_export_full(&source, &path).is_ok());

    // Refuses to overwrite
    assert!(commands::cmd_export_full(&source, &path).is_err());

    let target = setup_test_db();
    assert!(commands::cmd_import_full(&target, &path, true, true).is_ok());
    assert_eq!(target.count_goals().unwrap(), 1);
    assert_eq!(target.count_expenses(&ExpenseFilter::new()).unwrap(), 1);
}

#[test]
fn test_cmd_import_full_missing_file() {
    let db = setup_test_db();
    let dir = tempfile::tempdir().unwrap();
    let result = commands::cmd_import_full(&db, &dir.path().join("missing.json"), false, true);
    assert!(result.is_err());
}

// ========== Status / History / Reset Tests ==========

#[test]
fn test_cmd_history() {
    let db = setup_test_db();
    assert!(commands::cmd_history(&db, 10).is_ok());
    commands::cmd_goals_add(&db, &config(), today(), &goal_args("Laptop", 45000.0)).unwrap();
    assert!(commands::cmd_history(&db, 10).is_ok());
}

#[test]
fn test_cmd_status_and_resets_on_file_db() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backpack.db");

    // Status before init does not fail
    assert!(commands::cmd_status(&path, &config(), today()).is_ok());

    assert!(commands::cmd_init(&path).is_ok());
    {
        let db = commands::open_db(&path).unwrap();
        commands::cmd_goals_add(&db, &config(), today(), &goal_args("Laptop", 45000.0)).unwrap();
        commands::cmd_budget_set(
            &db,
            &SettingsUpdate {
                monthly_budget: Some(12000.0),
                ..Default::default()
            },
        )
        .unwrap();
    }
    assert!(commands::cmd_status(&path, &config(), today()).is_ok());

    // Soft reset keeps settings
    assert!(commands::cmd_reset(&path, true, true).is_ok());
    {
        let db = commands::open_db(&path).unwrap();
        assert_eq!(db.count_goals().unwrap(), 0);
        assert_eq!(db.get_settings(&config()).unwrap().monthly_budget, 12000.0);
    }

    // Hard reset starts fresh
    assert!(commands::cmd_reset(&path, false, true).is_ok());
    let db = commands::open_db(&path).unwrap();
    assert_eq!(
        db.get_settings(&config()).unwrap().monthly_budget,
        config().default_monthly_budget
    );
}

#[test]
fn test_soft_reset_missing_db() {
    let dir = tempfile::tempdir().unwrap();
    assert!(commands::cmd_reset(&dir.path().join("nope.db"), true, true).is_err());
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly ten", 11), "exactly ten");
    assert_eq!(truncate("this is a long description", 10), "this is...");
    assert_eq!(truncate("चाय और समोसा", 6), "चाय...");
}

#[test]
fn test_money_formatting() {
    assert_eq!(commands::money(1234.5), "₹1234.50");
    assert_eq!(commands::money(-20.0), "-₹20.00");
}
