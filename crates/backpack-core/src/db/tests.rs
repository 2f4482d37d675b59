//! Database tests

use super::*;
use crate::config::PlannerConfig;
use crate::error::Error;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_goal(name: &str, target: f64, priority: Priority) -> NewGoal {
        NewGoal {
            name: name.to_string(),
            target_amount: target,
            priority,
            ..Default::default()
        }
    }

    fn new_expense(amount: f64, category: ExpenseCategory, description: &str, day: u32) -> NewExpense {
        NewExpense {
            amount,
            category,
            description: description.to_string(),
            mood: Mood::default(),
            payment_method: PaymentMethod::default(),
            notes: None,
            date: date(2024, 5, day),
        }
    }

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        assert!(db.list_goals().unwrap().is_empty());
        assert_eq!(db.count_goals().unwrap(), 0);
    }

    #[test]
    fn test_schema_exists() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        let result: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('goals') WHERE name IN ('id', 'name', 'target_amount', 'saved_amount', 'target_date', 'priority', 'category', 'description', 'created_at')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(result, 9, "goals table should have 9 expected columns");

        let result: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('expenses', 'settings', 'audit_log')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(result, 3);
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backpack.db");
        let path = path.to_str().unwrap();

        let db = Database::new(path).unwrap();
        db.create_goal(&new_goal("Bike", 8000.0, Priority::Low)).unwrap();
        drop(db);

        let db = Database::new(path).unwrap();
        assert_eq!(db.list_goals().unwrap().len(), 1);
    }

    #[test]
    fn test_goal_crud() {
        let db = Database::in_memory().unwrap();

        let goal = db
            .create_goal(&NewGoal {
                name: "  Laptop ".to_string(),
                target_amount: 60000.0,
                saved_amount: 5000.0,
                target_date: Some(date(2025, 1, 1)),
                priority: Priority::High,
                category: GoalCategory::Electronics,
                description: Some("For coding".to_string()),
            })
            .unwrap();
        assert!(goal.id > 0);
        assert_eq!(goal.name, "Laptop");
        assert_eq!(goal.saved_amount, 5000.0);
        assert_eq!(goal.target_date, Some(date(2025, 1, 1)));
        assert_eq!(goal.category, GoalCategory::Electronics);

        let fetched = db.get_goal(goal.id).unwrap().unwrap();
        assert_eq!(fetched.priority, Priority::High);
        assert_eq!(fetched.description.as_deref(), Some("For coding"));

        db.delete_goal(goal.id).unwrap();
        assert!(db.get_goal(goal.id).unwrap().is_none());
        assert!(matches!(db.delete_goal(goal.id), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_create_goal_validation() {
        let db = Database::in_memory().unwrap();

        assert!(matches!(
            db.create_goal(&new_goal("   ", 100.0, Priority::Medium)),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            db.create_goal(&new_goal("Phone", 0.0, Priority::Medium)),
            Err(Error::InvalidGoalState(_))
        ));

        let mut negative = new_goal("Phone", 100.0, Priority::Medium);
        negative.saved_amount = -5.0;
        assert!(matches!(
            db.create_goal(&negative),
            Err(Error::InvalidGoalState(_))
        ));
        assert_eq!(db.count_goals().unwrap(), 0);
    }

    #[test]
    fn test_initial_savings_clamped_to_target() {
        let db = Database::in_memory().unwrap();
        let mut goal = new_goal("Headphones", 3000.0, Priority::Medium);
        goal.saved_amount = 4500.0;

        let goal = db.create_goal(&goal).unwrap();
        assert_eq!(goal.saved_amount, 3000.0);
        assert_eq!(goal.status(), GoalStatus::Completed);
    }

    #[test]
    fn test_list_goals_sorted_by_priority_then_newest() {
        let db = Database::in_memory().unwrap();
        let low = db.create_goal(&new_goal("Low", 100.0, Priority::Low)).unwrap();
        let high_old = db.create_goal(&new_goal("High old", 100.0, Priority::High)).unwrap();
        let medium = db.create_goal(&new_goal("Medium", 100.0, Priority::Medium)).unwrap();
        let high_new = db.create_goal(&new_goal("High new", 100.0, Priority::High)).unwrap();

        let ids: Vec<i64> = db.list_goals().unwrap().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![high_new.id, high_old.id, medium.id, low.id]);
    }

    #[test]
    fn test_add_savings_clamps_and_completes() {
        let db = Database::in_memory().unwrap();
        let goal = db.create_goal(&new_goal("Console", 1000.0, Priority::Medium)).unwrap();

        let update = db.add_savings(goal.id, 400.0).unwrap();
        assert_eq!(update.goal.saved_amount, 400.0);
        assert_eq!(update.applied, 400.0);
        assert!(!update.completed);

        let update = db.add_savings(goal.id, 900.0).unwrap();
        assert_eq!(update.goal.saved_amount, 1000.0);
        assert_eq!(update.applied, 600.0);
        assert!(update.completed);
        assert_eq!(update.goal.status(), GoalStatus::Completed);

        // Already complete: nothing more is applied
        let update = db.add_savings(goal.id, 50.0).unwrap();
        assert_eq!(update.goal.saved_amount, 1000.0);
        assert_eq!(update.applied, 0.0);
        assert!(!update.completed);
    }

    #[test]
    fn test_add_savings_rejects_bad_amounts() {
        let db = Database::in_memory().unwrap();
        let goal = db.create_goal(&new_goal("Shoes", 2000.0, Priority::Low)).unwrap();

        for amount in [0.0, -10.0, f64::NAN] {
            assert!(matches!(
                db.add_savings(goal.id, amount),
                Err(Error::InvalidData(_))
            ));
        }
        assert!(matches!(db.add_savings(9999, 10.0), Err(Error::NotFound(_))));
        assert_eq!(db.get_goal(goal.id).unwrap().unwrap().saved_amount, 0.0);
    }

    #[test]
    fn test_concurrent_savings_are_all_applied() {
        let db = Database::in_memory().unwrap();
        let goal = db.create_goal(&new_goal("Camera", 10000.0, Priority::High)).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let db = db.clone();
                std::thread::spawn(move || {
                    (0..10)
                        .map(|_| db.add_savings(goal.id, 40.0).unwrap().applied)
                        .sum::<f64>()
                })
            })
            .collect();
        let applied: f64 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(applied, 1600.0);
        let goal = db.get_goal(goal.id).unwrap().unwrap();
        assert_eq!(goal.saved_amount, applied);
    }

    #[test]
    fn test_concurrent_savings_clamp_at_target() {
        let db = Database::in_memory().unwrap();
        let goal = db.create_goal(&new_goal("Headphones", 1000.0, Priority::High)).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let db = db.clone();
                std::thread::spawn(move || {
                    (0..10)
                        .map(|_| db.add_savings(goal.id, 40.0).unwrap().applied)
                        .sum::<f64>()
                })
            })
            .collect();
        let applied: f64 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(applied, 1000.0);
        let goal = db.get_goal(goal.id).unwrap().unwrap();
        assert_eq!(goal.saved_amount, 1000.0);
    }

    #[test]
    fn test_edits_do_not_lose_concurrent_deposits() {
        let db = Database::in_memory().unwrap();
        let goal = db.create_goal(&new_goal("Bike", 100000.0, Priority::Medium)).unwrap();

        let saver = {
            let db = db.clone();
            std::thread::spawn(move || {
                for _ in 0..300 {
                    db.add_savings(goal.id, 1.0).unwrap();
                }
            })
        };
        let editor = {
            let db = db.clone();
            std::thread::spawn(move || {
                for i in 0..300 {
                    let update = GoalUpdate {
                        name: Some(format!("Bike {}", i)),
                        ..Default::default()
                    };
                    db.update_goal(goal.id, &update).unwrap();
                }
            })
        };
        saver.join().unwrap();
        editor.join().unwrap();

        let goal = db.get_goal(goal.id).unwrap().unwrap();
        assert_eq!(goal.saved_amount, 300.0);
        assert_eq!(goal.name, "Bike 299");
    }

    #[test]
    fn test_purchase_after_raising_target_is_refused() {
        let db = Database::in_memory().unwrap();
        let goal = db.create_goal(&new_goal("Watch", 3000.0, Priority::Low)).unwrap();
        db.add_savings(goal.id, 3000.0).unwrap();

        let update = GoalUpdate {
            target_amount: Some(4500.0),
            ..Default::default()
        };
        let raised = db.update_goal(goal.id, &update).unwrap();
        assert_eq!(raised.saved_amount, 3000.0);

        assert!(matches!(
            db.mark_purchased(goal.id),
            Err(Error::GoalNotComplete(_))
        ));
        assert!(db.get_goal(goal.id).unwrap().is_some());
        assert!(matches!(db.mark_purchased(777), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_update_goal() {
        let db = Database::in_memory().unwrap();
        let goal = db.create_goal(&new_goal("Trip", 10000.0, Priority::Medium)).unwrap();
        db.add_savings(goal.id, 6000.0).unwrap();

        let updated = db
            .update_goal(
                goal.id,
                &GoalUpdate {
                    name: Some("Goa trip".to_string()),
                    target_date: Some(date(2024, 12, 1)),
                    priority: Some(Priority::High),
                    category: Some(GoalCategory::Travel),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Goa trip");
        assert_eq!(updated.target_amount, 10000.0);
        assert_eq!(updated.saved_amount, 6000.0);
        assert_eq!(updated.target_date, Some(date(2024, 12, 1)));

        // Lowering the target below savings clamps savings
        let updated = db
            .update_goal(
                goal.id,
                &GoalUpdate {
                    target_amount: Some(5000.0),
                    clear_target_date: true,
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.target_amount, 5000.0);
        assert_eq!(updated.saved_amount, 5000.0);
        assert_eq!(updated.target_date, None);

        let stored = db.get_goal(goal.id).unwrap().unwrap();
        assert_eq!(stored.saved_amount, 5000.0);
        assert_eq!(stored.priority, Priority::High);
    }

    #[test]
    fn test_update_goal_validation() {
        let db = Database::in_memory().unwrap();
        let goal = db.create_goal(&new_goal("Watch", 4000.0, Priority::Low)).unwrap();

        let result = db.update_goal(
            goal.id,
            &GoalUpdate {
                target_amount: Some(0.0),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(Error::InvalidGoalState(_))));

        let result = db.update_goal(
            goal.id,
            &GoalUpdate {
                name: Some(String::new()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(Error::InvalidData(_))));

        let result = db.update_goal(404, &GoalUpdate::default());
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_mark_purchased_requires_completion() {
        let db = Database::in_memory().unwrap();
        let goal = db.create_goal(&new_goal("Guitar", 5000.0, Priority::Medium)).unwrap();
        db.add_savings(goal.id, 4999.0).unwrap();

        assert!(matches!(
            db.mark_purchased(goal.id),
            Err(Error::GoalNotComplete(id)) if id == goal.id
        ));
        assert!(db.get_goal(goal.id).unwrap().is_some());

        db.add_savings(goal.id, 1.0).unwrap();
        let purchased = db.mark_purchased(goal.id).unwrap();
        assert_eq!(purchased.name, "Guitar");
        assert!(db.get_goal(goal.id).unwrap().is_none());
    }

    #[test]
    fn test_expense_crud_and_validation() {
        let db = Database::in_memory().unwrap();

        let expense = db
            .add_expense(&NewExpense {
                notes: Some("  with friends ".to_string()),
                mood: Mood::Happy,
                payment_method: PaymentMethod::Cash,
                ..new_expense(250.0, ExpenseCategory::Food, "Pizza", 3)
            })
            .unwrap();
        assert!(expense.id > 0);
        assert_eq!(expense.notes.as_deref(), Some("with friends"));
        assert_eq!(expense.mood, Mood::Happy);
        assert_eq!(expense.payment_method, PaymentMethod::Cash);
        assert_eq!(expense.date, date(2024, 5, 3));

        assert!(matches!(
            db.add_expense(&new_expense(0.0, ExpenseCategory::Food, "Free", 3)),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            db.add_expense(&new_expense(10.0, ExpenseCategory::Food, " ", 3)),
            Err(Error::InvalidData(_))
        ));

        db.delete_expense(expense.id).unwrap();
        assert!(db.get_expense(expense.id).unwrap().is_none());
        assert!(matches!(db.delete_expense(expense.id), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_list_expenses_with_filters() {
        let db = Database::in_memory().unwrap();
        db.add_expense(&new_expense(120.0, ExpenseCategory::Food, "Coffee and snacks", 1)).unwrap();
        db.add_expense(&new_expense(40.0, ExpenseCategory::Transport, "Metro card", 5)).unwrap();
        db.add_expense(&new_expense(900.0, ExpenseCategory::Education, "Textbook", 10)).unwrap();
        db.add_expense(&NewExpense {
            notes: Some("late night coffee".to_string()),
            ..new_expense(80.0, ExpenseCategory::Food, "Canteen", 20)
        })
        .unwrap();

        // Newest first by default
        let all = db.list_expenses(&ExpenseFilter::new()).unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].description, "Canteen");

        // Search covers description and notes, case-insensitive
        let coffee = db.list_expenses(&ExpenseFilter::new().search(Some("COFFEE"))).unwrap();
        assert_eq!(coffee.len(), 2);

        // Search covers the amount
        let by_amount = db.list_expenses(&ExpenseFilter::new().search(Some("900"))).unwrap();
        assert_eq!(by_amount.len(), 1);

        let food = db
            .list_expenses(&ExpenseFilter::new().category(Some(ExpenseCategory::Food)))
            .unwrap();
        assert_eq!(food.len(), 2);

        // Both ends inclusive
        let range = db
            .list_expenses(
                &ExpenseFilter::new().date_range(Some(date(2024, 5, 5)), Some(date(2024, 5, 10))),
            )
            .unwrap();
        assert_eq!(range.len(), 2);

        let highest = db
            .list_expenses(&ExpenseFilter::new().sort(ExpenseSort::Highest).limit(Some(1)))
            .unwrap();
        assert_eq!(highest.len(), 1);
        assert_eq!(highest[0].description, "Textbook");

        let oldest = db
            .list_expenses(&ExpenseFilter::new().sort(ExpenseSort::Oldest))
            .unwrap();
        assert_eq!(oldest[0].description, "Coffee and snacks");

        let count = db
            .count_expenses(&ExpenseFilter::new().category(Some(ExpenseCategory::Food)).limit(Some(1)))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_spending_totals() {
        let db = Database::in_memory().unwrap();
        db.add_expense(&new_expense(100.0, ExpenseCategory::Food, "Lunch", 2)).unwrap();
        db.add_expense(&new_expense(300.0, ExpenseCategory::Food, "Groceries", 12)).unwrap();
        db.add_expense(&new_expense(50.0, ExpenseCategory::Transport, "Bus", 12)).unwrap();
        db.add_expense(&new_expense(75.0, ExpenseCategory::Shopping, "Outside range", 31)).unwrap();

        let from = date(2024, 5, 1);
        let to = date(2024, 5, 30);
        assert_eq!(db.total_spent(from, to).unwrap(), 450.0);
        assert_eq!(db.total_spent(date(2023, 1, 1), date(2023, 1, 31)).unwrap(), 0.0);

        let by_category = db.spending_by_category(from, to).unwrap();
        assert_eq!(
            by_category,
            vec![
                (ExpenseCategory::Food, 400.0),
                (ExpenseCategory::Transport, 50.0)
            ]
        );
    }

    #[test]
    fn test_settings_defaults_and_updates() {
        let db = Database::in_memory().unwrap();
        let config = PlannerConfig::default();

        let settings = db.get_settings(&config).unwrap();
        assert_eq!(settings.monthly_budget, 20000.0);
        assert_eq!(settings.savings_capacity, 3000.0);
        assert!(settings.display_name.is_none());

        db.update_settings(&SettingsUpdate {
            display_name: Some("Asha".to_string()),
            monthly_budget: Some(15000.0),
            savings_capacity: Some(0.0),
            ..Default::default()
        })
        .unwrap();

        let settings = db.get_settings(&config).unwrap();
        assert_eq!(settings.display_name.as_deref(), Some("Asha"));
        assert_eq!(settings.monthly_budget, 15000.0);
        assert_eq!(settings.savings_capacity, 0.0);

        assert!(matches!(
            db.update_settings(&SettingsUpdate {
                monthly_budget: Some(-1.0),
                ..Default::default()
            }),
            Err(Error::InvalidData(_))
        ));
        // Rejected update leaves everything untouched
        assert_eq!(db.get_settings(&config).unwrap().monthly_budget, 15000.0);
    }

    #[test]
    fn test_audit_log() {
        let db = Database::in_memory().unwrap();
        db.log_audit("cli", "create", Some("goal"), Some(1), Some("Laptop"))
            .unwrap();
        db.log_audit("api", "delete", Some("expense"), Some(7), None)
            .unwrap();

        let entries = db.list_audit_log(10).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, "delete");
        assert_eq!(entries[0].actor, "api");
        assert_eq!(entries[1].details.as_deref(), Some("Laptop"));

        assert_eq!(db.list_audit_log(1).unwrap().len(), 1);
    }

    #[test]
    fn test_soft_reset_keeps_settings() {
        let db = Database::in_memory().unwrap();
        db.create_goal(&new_goal("Bag", 1500.0, Priority::Low)).unwrap();
        db.add_expense(&new_expense(20.0, ExpenseCategory::Other, "Pen", 1)).unwrap();
        db.log_audit("cli", "create", None, None, None).unwrap();
        db.update_settings(&SettingsUpdate {
            monthly_budget: Some(9000.0),
            ..Default::default()
        })
        .unwrap();

        db.soft_reset().unwrap();

        assert_eq!(db.count_goals().unwrap(), 0);
        assert_eq!(db.count_expenses(&ExpenseFilter::new()).unwrap(), 0);
        assert!(db.list_audit_log(10).unwrap().is_empty());
        assert_eq!(
            db.get_settings(&PlannerConfig::default()).unwrap().monthly_budget,
            9000.0
        );
    }
}
