use chrono::{NaiveDate, Utc};

use crate::domain::{
    Account, AccountId, Budget, Category, CategoryId, Cents, NewBudget, NewTransaction, Period,
    Transaction, TransactionKind, format_cents,
};
use crate::storage::{BudgetDetail, CategorySpend, Repository, TransactionDetail};

use super::AppError;

/// How many transactions the dashboard shows as recent activity.
const RECENT_LIMIT: i64 = 5;

/// The dashboard summary: total balance across accounts, latest activity,
/// and this month's expense breakdown by category.
pub struct DashboardSummary {
    pub total_balance_cents: Cents,
    pub recent_transactions: Vec<TransactionDetail>,
    pub monthly_spending: Vec<CategorySpend>,
}

/// Application service providing high-level operations for the tracker.
/// This is the primary interface for any client (HTTP API, tests, etc.).
pub struct FinanceService {
    repo: Repository,
}

impl FinanceService {
    /// Create a new service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a database at the given path: create it if missing, run
    /// migrations, seed default rows into empty tables.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database without migrating or seeding.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    // ========================
    // Ledger operations
    // ========================

    /// Post a transaction: validate it, then atomically insert the row and
    /// apply its signed delta to the owning account's balance.
    pub async fn post_transaction(
        &self,
        account_id: AccountId,
        category_id: Option<CategoryId>,
        amount_cents: Cents,
        description: String,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> Result<Transaction, AppError> {
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }

        if self.repo.get_account(account_id).await?.is_none() {
            return Err(AppError::AccountNotFound(account_id));
        }
        if let Some(category_id) = category_id {
            if self.repo.get_category(category_id).await?.is_none() {
                return Err(AppError::CategoryNotFound(category_id));
            }
        }

        let posting = NewTransaction {
            account_id,
            category_id,
            amount_cents,
            description,
            kind,
            date,
        };

        let transaction = self.repo.record_transaction(&posting).await?;
        tracing::debug!(
            "posted {} of {} to account {}",
            transaction.kind,
            format_cents(transaction.amount_cents),
            transaction.account_id
        );

        Ok(transaction)
    }

    /// List all transactions with their category and account display fields.
    pub async fn list_transactions(&self) -> Result<Vec<TransactionDetail>, AppError> {
        Ok(self.repo.list_transactions().await?)
    }

    // ========================
    // Query operations
    // ========================

    /// Build the dashboard summary for the current calendar month.
    pub async fn dashboard(&self) -> Result<DashboardSummary, AppError> {
        let total_balance_cents = self.repo.total_balance().await?;
        let recent_transactions = self.repo.recent_transactions(RECENT_LIMIT).await?;

        let month = Utc::now().format("%Y-%m").to_string();
        let monthly_spending = self.repo.monthly_spending(&month).await?;

        Ok(DashboardSummary {
            total_balance_cents,
            recent_transactions,
            monthly_spending,
        })
    }

    /// List all accounts, ordered by name.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.repo.list_accounts().await?)
    }

    /// List all categories, ordered by kind and then name.
    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.repo.list_categories().await?)
    }

    // ========================
    // Budget operations
    // ========================

    /// Create a budget for a category.
    pub async fn create_budget(
        &self,
        category_id: CategoryId,
        amount_cents: Cents,
        period: Period,
    ) -> Result<Budget, AppError> {
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }
        if self.repo.get_category(category_id).await?.is_none() {
            return Err(AppError::CategoryNotFound(category_id));
        }

        let budget = NewBudget {
            category_id,
            amount_cents,
            period,
        };

        Ok(self.repo.save_budget(&budget).await?)
    }

    /// List all budgets with their category names.
    pub async fn list_budgets(&self) -> Result<Vec<BudgetDetail>, AppError> {
        Ok(self.repo.list_budgets().await?)
    }
}
