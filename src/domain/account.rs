use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Cents;

pub type AccountId = i64;

/// A balance-holding entity: a bank account, a mobile money wallet, cash...
///
/// The account kind is an open set of short lowercase tags ("bank", "momo",
/// "cash") rather than a closed enum; new kinds can appear without a schema
/// change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub kind: String,
    /// Running balance in cents. Maintained by the posting operation:
    /// always equals the sum of signed deltas of all postings to this account.
    pub balance_cents: Cents,
    pub created_at: DateTime<Utc>,
}
