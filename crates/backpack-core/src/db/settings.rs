//! Settings operations (key-value)

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::config::PlannerConfig;
use crate::error::{Error, Result};
use crate::models::{Settings, SettingsUpdate};

const KEY_DISPLAY_NAME: &str = "display_name";
const KEY_CAMPUS: &str = "campus";
const KEY_MONTHLY_BUDGET: &str = "monthly_budget";
const KEY_SAVINGS_CAPACITY: &str = "savings_capacity";

fn validate_money(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidData(format!(
            "{} must be zero or more, got {}",
            name, value
        )));
    }
    Ok(())
}

impl Database {
    /// Get a raw setting value
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Set a raw setting value
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO settings (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    fn get_amount_setting(&self, key: &str) -> Result<Option<f64>> {
        Ok(self
            .get_setting(key)?
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite()))
    }

    /// Current settings, with configured defaults for anything unset
    pub fn get_settings(&self, config: &PlannerConfig) -> Result<Settings> {
        Ok(Settings {
            display_name: self.get_setting(KEY_DISPLAY_NAME)?.filter(|s| !s.is_empty()),
            campus: self.get_setting(KEY_CAMPUS)?.filter(|s| !s.is_empty()),
            monthly_budget: self
                .get_amount_setting(KEY_MONTHLY_BUDGET)?
                .unwrap_or(config.default_monthly_budget),
            savings_capacity: self
                .get_amount_setting(KEY_SAVINGS_CAPACITY)?
                .unwrap_or(config.default_savings_capacity),
        })
    }

    /// Apply a partial settings update
    pub fn update_settings(&self, update: &SettingsUpdate) -> Result<()> {
        if let Some(budget) = update.monthly_budget {
            validate_money("Monthly budget", budget)?;
        }
        if let Some(capacity) = update.savings_capacity {
            validate_money("Savings capacity", capacity)?;
        }

        if let Some(name) = &update.display_name {
            self.set_setting(KEY_DISPLAY_NAME, name.trim())?;
        }
        if let Some(campus) = &update.campus {
            self.set_setting(KEY_CAMPUS, campus.trim())?;
        }
        if let Some(budget) = update.monthly_budget {
            self.set_setting(KEY_MONTHLY_BUDGET, &budget.to_string())?;
        }
        if let Some(capacity) = update.savings_capacity {
            self.set_setting(KEY_SAVINGS_CAPACITY, &capacity.to_string())?;
        }
        Ok(())
    }

    /// All stored settings as key/value pairs (for backups)
    pub fn list_settings(&self) -> Result<Vec<(String, String)>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT key, value FROM settings ORDER BY key")?;
        let settings = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(settings)
    }
}
