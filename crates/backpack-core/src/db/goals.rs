//! Savings goal operations
//!
//! Every write keeps `saved_amount <= target_amount`; amounts above the
//! target are clamped rather than rejected.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::{parse_date, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Goal, GoalUpdate, NewGoal, SavingsUpdate};

const GOAL_COLUMNS: &str = "id, name, target_amount, saved_amount, target_date, priority, category, description, created_at";

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidData("Goal name cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_target(target_amount: f64) -> Result<()> {
    if !target_amount.is_finite() || target_amount <= 0.0 {
        return Err(Error::InvalidGoalState(format!(
            "Target amount must be positive, got {}",
            target_amount
        )));
    }
    Ok(())
}

/// Run `f` inside a `BEGIN IMMEDIATE` transaction
///
/// Holding the write lock from the first read keeps a read-modify-write on a
/// goal from interleaving with another writer.
fn with_write_lock<T>(conn: &Connection, f: impl FnOnce() -> Result<T>) -> Result<T> {
    conn.execute_batch("BEGIN IMMEDIATE")?;
    match f() {
        Ok(value) => {
            conn.execute_batch("COMMIT")?;
            Ok(value)
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}

fn select_goal(conn: &Connection, id: i64) -> Result<Goal> {
    conn.query_row(
        &format!("SELECT {} FROM goals WHERE id = ?", GOAL_COLUMNS),
        params![id],
        |row| Database::row_to_goal(row),
    )
    .optional()?
    .ok_or_else(|| Error::NotFound(format!("Goal {}", id)))
}

impl Database {
    /// Create a new goal
    pub fn create_goal(&self, goal: &NewGoal) -> Result<Goal> {
        validate_name(&goal.name)?;
        validate_target(goal.target_amount)?;
        if !goal.saved_amount.is_finite() || goal.saved_amount < 0.0 {
            return Err(Error::InvalidGoalState(format!(
                "Initial savings cannot be negative, got {}",
                goal.saved_amount
            )));
        }
        let saved_amount = goal.saved_amount.min(goal.target_amount);

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO goals (name, target_amount, saved_amount, target_date, priority, category, description)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                goal.name.trim(),
                goal.target_amount,
                saved_amount,
                goal.target_date.map(|d| d.to_string()),
                goal.priority.as_str(),
                goal.category.as_str(),
                goal.description.as_deref(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        info!(goal_id = id, "Created goal '{}'", goal.name.trim());

        self.get_goal(id)?
            .ok_or_else(|| Error::NotFound(format!("Goal {}", id)))
    }

    /// List all goals: highest priority first, then newest first
    pub fn list_goals(&self) -> Result<Vec<Goal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {}
            FROM goals
            ORDER BY CASE priority WHEN 'high' THEN 3 WHEN 'medium' THEN 2 ELSE 1 END DESC,
                     created_at DESC, id DESC
            "#,
            GOAL_COLUMNS
        ))?;

        let goals = stmt
            .query_map([], |row| Self::row_to_goal(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(goals)
    }

    /// Get a single goal by ID
    pub fn get_goal(&self, id: i64) -> Result<Option<Goal>> {
        let conn = self.conn()?;
        let goal = conn
            .query_row(
                &format!("SELECT {} FROM goals WHERE id = ?", GOAL_COLUMNS),
                params![id],
                |row| Self::row_to_goal(row),
            )
            .optional()?;
        Ok(goal)
    }

    /// Add money to a goal, clamping the total at the target
    pub fn add_savings(&self, id: i64, amount: f64) -> Result<SavingsUpdate> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Savings amount must be positive, got {}",
                amount
            )));
        }

        let conn = self.conn()?;
        let (before, goal) = with_write_lock(&conn, || {
            let current = select_goal(&conn, id)?;
            conn.execute(
                "UPDATE goals SET saved_amount = MIN(saved_amount + ?, target_amount) WHERE id = ?",
                params![amount, id],
            )?;
            Ok((current.saved_amount, select_goal(&conn, id)?))
        })?;

        let applied = goal.saved_amount - before;
        let completed = before < goal.target_amount && goal.is_complete();
        debug!(goal_id = id, applied, completed, "Added savings");

        Ok(SavingsUpdate {
            applied,
            completed,
            goal,
        })
    }

    /// Edit a goal's details or target
    ///
    /// Lowering the target below the saved amount clamps the saved amount
    /// down to the new target. The saved amount is never written from a
    /// previously read value.
    pub fn update_goal(&self, id: i64, update: &GoalUpdate) -> Result<Goal> {
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(target) = update.target_amount {
            validate_target(target)?;
        }

        let conn = self.conn()?;
        with_write_lock(&conn, || {
            let mut goal = select_goal(&conn, id)?;

            if let Some(name) = &update.name {
                goal.name = name.trim().to_string();
            }
            if let Some(target) = update.target_amount {
                goal.target_amount = target;
            }
            if update.clear_target_date {
                goal.target_date = None;
            } else if let Some(date) = update.target_date {
                goal.target_date = Some(date);
            }
            if let Some(priority) = update.priority {
                goal.priority = priority;
            }
            if let Some(category) = update.category {
                goal.category = category;
            }
            if let Some(description) = &update.description {
                goal.description = if description.trim().is_empty() {
                    None
                } else {
                    Some(description.clone())
                };
            }

            let changed = conn.execute(
                r#"
                UPDATE goals
                SET name = ?1, target_amount = ?2, saved_amount = MIN(saved_amount, ?2),
                    target_date = ?3, priority = ?4, category = ?5, description = ?6
                WHERE id = ?7
                "#,
                params![
                    goal.name,
                    goal.target_amount,
                    goal.target_date.map(|d| d.to_string()),
                    goal.priority.as_str(),
                    goal.category.as_str(),
                    goal.description.as_deref(),
                    id,
                ],
            )?;
            if changed == 0 {
                return Err(Error::NotFound(format!("Goal {}", id)));
            }

            select_goal(&conn, id)
        })
    }

    /// Delete a goal regardless of progress
    pub fn delete_goal(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM goals WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Goal {}", id)));
        }
        info!(goal_id = id, "Deleted goal");
        Ok(())
    }

    /// Remove a completed goal once the item has been bought
    ///
    /// Returns the goal as it was just before removal.
    pub fn mark_purchased(&self, id: i64) -> Result<Goal> {
        let conn = self.conn()?;
        let goal = with_write_lock(&conn, || {
            let goal = select_goal(&conn, id)?;
            let deleted = conn.execute(
                "DELETE FROM goals WHERE id = ? AND saved_amount >= target_amount",
                params![id],
            )?;
            if deleted == 0 {
                return Err(Error::GoalNotComplete(id));
            }
            Ok(goal)
        })?;

        info!(goal_id = id, "Goal '{}' purchased", goal.name);
        Ok(goal)
    }

    /// Count goals
    pub fn count_goals(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM goals", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Helper to convert a row to Goal
    /// Column order: id, name, target_amount, saved_amount, target_date, priority,
    ///               category, description, created_at
    pub(crate) fn row_to_goal(row: &rusqlite::Row) -> rusqlite::Result<Goal> {
        let target_date_str: Option<String> = row.get(4)?;
        let priority_str: String = row.get(5)?;
        let category_str: String = row.get(6)?;
        let created_at_str: String = row.get(8)?;

        Ok(Goal {
            id: row.get(0)?,
            name: row.get(1)?,
            target_amount: row.get(2)?,
            saved_amount: row.get(3)?,
            target_date: target_date_str.as_deref().and_then(parse_date),
            priority: priority_str.parse().unwrap_or_default(),
            category: category_str.parse().unwrap_or_default(),
            description: row.get(7)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}
