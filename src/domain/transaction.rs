use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountId, CategoryId, Cents};

pub type TransactionId = i64;

/// Whether a transaction moves money out of an account or into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money leaving the account; subtracts from the balance.
    Expense,
    /// Money entering the account; adds to the balance.
    Income,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "expense" => Some(TransactionKind::Expense),
            "income" => Some(TransactionKind::Income),
            _ => None,
        }
    }

    /// The signed balance delta this kind applies for a (positive) amount.
    /// Expenses subtract, everything else adds.
    pub fn signed_delta(&self, amount_cents: Cents) -> Cents {
        match self {
            TransactionKind::Expense => -amount_cents,
            _ => amount_cents,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable record of money moving into or out of an account.
///
/// `date` is the user-assigned calendar day the money moved; `created_at` is
/// when the row was recorded and drives recency ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub account_id: AccountId,
    pub category_id: Option<CategoryId>,
    /// Always positive; the sign convention lives in `kind`.
    pub amount_cents: Cents,
    pub description: String,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A posting request: everything needed to record a transaction, before the
/// store has assigned it an id and a creation timestamp.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub account_id: AccountId,
    pub category_id: Option<CategoryId>,
    pub amount_cents: Cents,
    pub description: String,
    pub kind: TransactionKind,
    pub date: NaiveDate,
}

impl NewTransaction {
    /// The signed delta this posting applies to the owning account's balance.
    pub fn signed_delta(&self) -> Cents {
        self.kind.signed_delta(self.amount_cents)
    }
}
