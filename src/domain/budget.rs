use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryId, Cents};

pub type BudgetId = i64;

/// How often a budget's target amount resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "weekly" => Some(Period::Weekly),
            "monthly" => Some(Period::Monthly),
            "yearly" => Some(Period::Yearly),
            _ => None,
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::Monthly
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A target spending amount for a category over a period.
/// Storage-only for now: budgets are recorded and listed, not enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub category_id: CategoryId,
    pub amount_cents: Cents,
    pub period: Period,
    pub created_at: DateTime<Utc>,
}

/// A budget request, before the store has assigned it an id and a creation
/// timestamp.
#[derive(Debug, Clone)]
pub struct NewBudget {
    pub category_id: CategoryId,
    pub amount_cents: Cents,
    pub period: Period,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_roundtrip() {
        for period in [Period::Weekly, Period::Monthly, Period::Yearly] {
            let s = period.as_str();
            let parsed = Period::from_str(s).unwrap();
            assert_eq!(period, parsed);
        }
    }

    #[test]
    fn test_period_defaults_to_monthly() {
        assert_eq!(Period::default(), Period::Monthly);
        assert_eq!(Period::from_str("quarterly"), None);
    }
}
