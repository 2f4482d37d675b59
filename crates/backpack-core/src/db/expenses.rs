//! Expense operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::{parse_date, parse_datetime, Database, ExpenseFilter};
use crate::error::{Error, Result};
use crate::models::{Expense, ExpenseCategory, NewExpense};

const EXPENSE_COLUMNS: &str =
    "e.id, e.amount, e.category, e.description, e.mood, e.payment_method, e.notes, e.date, e.created_at";

pub(crate) fn validate_expense(amount: f64, description: &str) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidData(format!(
            "Expense amount must be positive, got {}",
            amount
        )));
    }
    if description.trim().is_empty() {
        return Err(Error::InvalidData(
            "Expense description cannot be empty".to_string(),
        ));
    }
    Ok(())
}

impl Database {
    /// Record a new expense
    pub fn add_expense(&self, expense: &NewExpense) -> Result<Expense> {
        validate_expense(expense.amount, &expense.description)?;
        let notes = expense
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO expenses (amount, category, description, mood, payment_method, notes, date)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                expense.amount,
                expense.category.as_str(),
                expense.description.trim(),
                expense.mood.as_str(),
                expense.payment_method.as_str(),
                notes,
                expense.date.to_string(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        info!(expense_id = id, "Recorded expense of {:.2}", expense.amount);

        self.get_expense(id)?
            .ok_or_else(|| Error::NotFound(format!("Expense {}", id)))
    }

    /// Get a single expense by ID
    pub fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;
        let expense = conn
            .query_row(
                &format!("SELECT {} FROM expenses e WHERE e.id = ?", EXPENSE_COLUMNS),
                params![id],
                |row| Self::row_to_expense(row),
            )
            .optional()?;
        Ok(expense)
    }

    /// List expenses matching a filter
    pub fn list_expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let built = filter.build();
        let sql = format!(
            "SELECT {} FROM expenses e {} {} {}",
            EXPENSE_COLUMNS, built.where_clause, built.order_clause, built.limit_clause
        );

        let mut stmt = conn.prepare(&sql)?;
        let expenses = stmt
            .query_map(built.params_refs().as_slice(), |row| Self::row_to_expense(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Count expenses matching a filter (ignores the limit)
    pub fn count_expenses(&self, filter: &ExpenseFilter) -> Result<i64> {
        let conn = self.conn()?;
        let built = filter.build();
        let sql = format!("SELECT COUNT(*) FROM expenses e {}", built.where_clause);

        let count: i64 = conn.query_row(&sql, built.params_refs().as_slice(), |row| row.get(0))?;
        Ok(count)
    }

    /// Delete an expense
    pub fn delete_expense(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Expense {}", id)));
        }
        info!(expense_id = id, "Deleted expense");
        Ok(())
    }

    /// Total spent between two dates (inclusive)
    pub fn total_spent(&self, from: NaiveDate, to: NaiveDate) -> Result<f64> {
        let conn = self.conn()?;
        let total: f64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE date >= ? AND date <= ?",
            params![from.to_string(), to.to_string()],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Spending per category between two dates (inclusive), largest first
    pub fn spending_by_category(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<(ExpenseCategory, f64)>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT category, SUM(amount) AS total
            FROM expenses
            WHERE date >= ? AND date <= ?
            GROUP BY category
            ORDER BY total DESC
            "#,
        )?;

        let rows = stmt
            .query_map(params![from.to_string(), to.to_string()], |row| {
                let category: String = row.get(0)?;
                let total: f64 = row.get(1)?;
                Ok((category, total))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        // Unrecognised stored categories fold into Other
        let mut totals: Vec<(ExpenseCategory, f64)> = Vec::new();
        for (category, total) in rows {
            let category: ExpenseCategory = category.parse().unwrap_or_default();
            match totals.iter_mut().find(|(c, _)| *c == category) {
                Some((_, sum)) => *sum += total,
                None => totals.push((category, total)),
            }
        }
        totals.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(totals)
    }

    /// Helper to convert a row to Expense
    /// Column order: id, amount, category, description, mood, payment_method, notes, date, created_at
    pub(crate) fn row_to_expense(row: &rusqlite::Row) -> rusqlite::Result<Expense> {
        let category_str: String = row.get(2)?;
        let mood_str: String = row.get(4)?;
        let payment_str: String = row.get(5)?;
        let date_str: String = row.get(7)?;
        let created_at_str: String = row.get(8)?;

        Ok(Expense {
            id: row.get(0)?,
            amount: row.get(1)?,
            category: category_str.parse().unwrap_or_default(),
            description: row.get(3)?,
            mood: mood_str.parse().unwrap_or_default(),
            payment_method: payment_str.parse().unwrap_or_default(),
            notes: row.get(6)?,
            date: parse_date(&date_str).unwrap_or_default(),
            created_at: parse_datetime(&created_at_str),
        })
    }
}
