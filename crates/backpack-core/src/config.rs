//! Planner configuration
//!
//! Loads the planner settings from TOML. The built-in defaults live in
//! `config/planner.toml` and are compiled into the binary; keys missing from
//! a user file keep those defaults. A user override
//! can live at `~/.local/share/backpack/config/planner.toml`, or a path can be
//! passed explicitly.
//!
//! Example config:
//! ```toml
//! [defaults]
//! monthly_budget = 20000
//! savings_capacity = 3000
//!
//! [recommended]
//! fallback_percent = 15
//! food = 30
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::ExpenseCategory;

/// Default config embedded at compile time
const DEFAULT_CONFIG: &str = include_str!("../../../config/planner.toml");

/// Thresholds for the month-to-date budget health indicator, in percent
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetThresholds {
    pub excellent_below: f64,
    pub caution_above: f64,
    pub alert_above: f64,
}

impl Default for BudgetThresholds {
    fn default() -> Self {
        Self {
            excellent_below: 20.0,
            caution_above: 60.0,
            alert_above: 80.0,
        }
    }
}

/// Planner settings shared by the CLI and server
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Monthly budget used until the user sets one
    pub default_monthly_budget: f64,
    /// Savings capacity used until the user sets one
    pub default_savings_capacity: f64,
    pub budget: BudgetThresholds,
    /// Recommended share of spending per category, in percent
    pub recommended: HashMap<ExpenseCategory, f64>,
    /// Recommended share for categories without an entry
    pub fallback_percent: f64,
}

/// Recommended shares matching `config/planner.toml`
fn default_recommendations() -> HashMap<ExpenseCategory, f64> {
    HashMap::from([
        (ExpenseCategory::Food, 30.0),
        (ExpenseCategory::Transport, 15.0),
        (ExpenseCategory::Entertainment, 10.0),
        (ExpenseCategory::Education, 20.0),
        (ExpenseCategory::Shopping, 10.0),
        (ExpenseCategory::Healthcare, 5.0),
        (ExpenseCategory::Utilities, 10.0),
    ])
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_monthly_budget: 20000.0,
            default_savings_capacity: 3000.0,
            budget: BudgetThresholds::default(),
            recommended: default_recommendations(),
            fallback_percent: 15.0,
        }
    }
}

impl PlannerConfig {
    /// Load config, preferring `override_path`, then the user override file,
    /// then the embedded defaults
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = match override_path {
            Some(path) => read_config(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => read_config(&path)?,
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }

    /// The embedded defaults, without looking at the filesystem
    pub fn builtin() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Recommended share of spending for a category, in percent
    pub fn recommended_percent(&self, category: ExpenseCategory) -> f64 {
        self.recommended
            .get(&category)
            .copied()
            .unwrap_or(self.fallback_percent)
    }
}

/// Default location of the user config override
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("backpack").join("config").join("planner.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    debug!("Loading planner config from {}", path.display());
    fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config {}: {}", path.display(), e))
    })
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    defaults: Option<RawDefaults>,
    budget: Option<RawBudget>,
    recommended: Option<HashMap<String, f64>>,
}

#[derive(Debug, Deserialize)]
struct RawDefaults {
    monthly_budget: Option<f64>,
    savings_capacity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawBudget {
    excellent_below_percent: Option<f64>,
    caution_above_percent: Option<f64>,
    alert_above_percent: Option<f64>,
}

fn parse_config(content: &str) -> Result<PlannerConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = PlannerConfig::default();

    if let Some(defaults) = raw.defaults {
        if let Some(budget) = defaults.monthly_budget {
            config.default_monthly_budget = budget;
        }
        if let Some(capacity) = defaults.savings_capacity {
            config.default_savings_capacity = capacity;
        }
    }

    if let Some(budget) = raw.budget {
        if let Some(v) = budget.excellent_below_percent {
            config.budget.excellent_below = v;
        }
        if let Some(v) = budget.caution_above_percent {
            config.budget.caution_above = v;
        }
        if let Some(v) = budget.alert_above_percent {
            config.budget.alert_above = v;
        }
    }

    if config.budget.caution_above > config.budget.alert_above {
        return Err(Error::Config(format!(
            "caution threshold {} is above alert threshold {}",
            config.budget.caution_above, config.budget.alert_above
        )));
    }

    if let Some(recommended) = raw.recommended {
        for (key, percent) in recommended {
            if key == "fallback_percent" {
                config.fallback_percent = percent;
                continue;
            }
            match key.parse::<ExpenseCategory>() {
                Ok(category) => {
                    config.recommended.insert(category, percent);
                }
                Err(_) => warn!("Ignoring recommendation for unknown category '{}'", key),
            }
        }
    }

    Ok(config)
}
