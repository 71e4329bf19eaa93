use serde::{Deserialize, Serialize};

pub type CategoryId = i64;

/// A classification tag for transactions and budgets.
///
/// Like the account kind, the category kind is an open set ("expense",
/// "income", "savings", "investment"). The color is a hex literal used by
/// clients when charting spending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub kind: String,
    pub color: String,
}
