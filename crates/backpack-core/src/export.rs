//! Export functionality for expenses and full database backups
//!
//! Supports:
//! - Expense CSV export with the same filters as the expense listing
//! - Full JSON backup export/import of goals, expenses and settings

use chrono::Utc;
use rusqlite::params;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::{validate_expense, Database, ExpenseFilter};
use crate::error::{Error, Result};
use crate::models::{Expense, Goal};

/// Header row of the expense CSV export
pub const EXPENSE_CSV_HEADER: [&str; 7] = [
    "Date",
    "Description",
    "Amount",
    "Category",
    "Mood",
    "Payment Method",
    "Notes",
];

/// Backup format version, bumped when the layout changes
pub const BACKUP_VERSION: u32 = 1;

/// Backup metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupMetadata {
    pub version: u32,
    /// Crate version that created the backup
    pub app_version: String,
    pub created_at: String,
    pub total_records: i64,
}

/// A stored setting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingEntry {
    pub key: String,
    pub value: String,
}

/// Full database backup structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullBackup {
    pub metadata: BackupMetadata,
    pub settings: Vec<SettingEntry>,
    pub goals: Vec<Goal>,
    pub expenses: Vec<Expense>,
}

/// Import statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportStats {
    pub settings: i64,
    pub goals: i64,
    pub expenses: i64,
}

impl Database {
    /// Export expenses matching `filter` as CSV text
    pub fn export_expenses_csv(&self, filter: &ExpenseFilter) -> Result<String> {
        let expenses = self.list_expenses(filter)?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(EXPENSE_CSV_HEADER)?;
        for expense in &expenses {
            writer.write_record([
                expense.date.to_string(),
                expense.description.clone(),
                format!("{:.2}", expense.amount),
                expense.category.to_string(),
                expense.mood.to_string(),
                expense.payment_method.to_string(),
                expense.notes.clone().unwrap_or_default(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| Error::InvalidData(e.to_string()))
    }

    /// Export everything as a single backup document
    pub fn export_full_backup(&self) -> Result<FullBackup> {
        let settings: Vec<SettingEntry> = self
            .list_settings()?
            .into_iter()
            .map(|(key, value)| SettingEntry { key, value })
            .collect();
        let goals = self.list_goals()?;
        let expenses = self.list_expenses(&ExpenseFilter::new())?;

        let total_records = (settings.len() + goals.len() + expenses.len()) as i64;
        info!(total_records, "Exported full backup");

        Ok(FullBackup {
            metadata: BackupMetadata {
                version: BACKUP_VERSION,
                app_version: env!("CARGO_PKG_VERSION").to_string(),
                created_at: Utc::now().to_rfc3339(),
                total_records,
            },
            settings,
            goals,
            expenses,
        })
    }

    /// Import a full backup, keeping original IDs
    ///
    /// With `clear_existing`, goals, expenses, the audit log and settings are
    /// wiped first. Without it, records whose IDs already exist are replaced.
    /// The import is all-or-nothing.
    pub fn import_full_backup(
        &self,
        backup: &FullBackup,
        clear_existing: bool,
    ) -> Result<ImportStats> {
        if backup.metadata.version > BACKUP_VERSION {
            return Err(Error::InvalidData(format!(
                "Backup version {} is newer than supported version {}",
                backup.metadata.version, BACKUP_VERSION
            )));
        }
        for goal in &backup.goals {
            if goal.target_amount <= 0.0 || goal.saved_amount < 0.0 {
                return Err(Error::InvalidGoalState(format!(
                    "Goal {} in backup has invalid amounts",
                    goal.id
                )));
            }
        }
        for expense in &backup.expenses {
            validate_expense(expense.amount, &expense.description)?;
        }

        let conn = self.conn()?;
        conn.execute("BEGIN TRANSACTION", [])?;

        let result = (|| -> Result<ImportStats> {
            if clear_existing {
                conn.execute_batch(
                    r#"
                    DELETE FROM goals;
                    DELETE FROM expenses;
                    DELETE FROM audit_log;
                    DELETE FROM settings;
                    "#,
                )?;
            }

            let mut stats = ImportStats::default();

            for setting in &backup.settings {
                conn.execute(
                    "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                    params![setting.key, setting.value],
                )?;
                stats.settings += 1;
            }

            for goal in &backup.goals {
                conn.execute(
                    r#"
                    INSERT OR REPLACE INTO goals
                        (id, name, target_amount, saved_amount, target_date, priority, category, description, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                    "#,
                    params![
                        goal.id,
                        goal.name,
                        goal.target_amount,
                        goal.saved_amount.min(goal.target_amount),
                        goal.target_date.map(|d| d.to_string()),
                        goal.priority.as_str(),
                        goal.category.as_str(),
                        goal.description,
                        goal.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    ],
                )?;
                stats.goals += 1;
            }

            for expense in &backup.expenses {
                conn.execute(
                    r#"
                    INSERT OR REPLACE INTO expenses
                        (id, amount, category, description, mood, payment_method, notes, date, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                    "#,
                    params![
                        expense.id,
                        expense.amount,
                        expense.category.as_str(),
                        expense.description,
                        expense.mood.as_str(),
                        expense.payment_method.as_str(),
                        expense.notes,
                        expense.date.to_string(),
                        expense.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    ],
                )?;
                stats.expenses += 1;
            }

            Ok(stats)
        })();

        match result {
            Ok(stats) => {
                conn.execute("COMMIT", [])?;
                info!(
                    goals = stats.goals,
                    expenses = stats.expenses,
                    "Imported full backup"
                );
                Ok(stats)
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }
}
