//! Feasibility scoring
//!
//! Classifies a required monthly saving against how much the student can
//! put aside each month. This is the only feasibility policy in the crate;
//! budget alerts and category recommendations live in [`crate::budget`].

use serde::{Deserialize, Serialize};

/// Upper bounds (inclusive) of the required/capacity ratio for each tier
const EXCELLENT_MAX_RATIO: f64 = 0.5;
const GOOD_MAX_RATIO: f64 = 0.8;
const CHALLENGING_MAX_RATIO: f64 = 1.2;

/// How hard a saving rate is relative to capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeasibilityTier {
    Excellent,
    Good,
    Challenging,
    Difficult,
    /// No usable savings capacity is configured
    Unknown,
}

impl FeasibilityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Challenging => "challenging",
            Self::Difficult => "difficult",
            Self::Unknown => "unknown",
        }
    }

    /// Short label for terminal output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "🟢 Excellent",
            Self::Good => "🟡 Good",
            Self::Challenging => "🟠 Challenging",
            Self::Difficult => "🔴 Difficult",
            Self::Unknown => "⚪ Unknown",
        }
    }
}

impl std::fmt::Display for FeasibilityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Score a required monthly saving against the monthly savings capacity
pub fn score_feasibility(required_monthly: f64, savings_capacity: f64) -> FeasibilityTier {
    if !savings_capacity.is_finite() || savings_capacity <= 0.0 {
        return FeasibilityTier::Unknown;
    }

    let ratio = required_monthly / savings_capacity;
    if ratio <= EXCELLENT_MAX_RATIO {
        FeasibilityTier::Excellent
    } else if ratio <= GOOD_MAX_RATIO {
        FeasibilityTier::Good
    } else if ratio <= CHALLENGING_MAX_RATIO {
        FeasibilityTier::Challenging
    } else {
        FeasibilityTier::Difficult
    }
}
