use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Row, SqlitePool};

use crate::domain::{
    Account, AccountId, Budget, Category, CategoryId, Cents, NewBudget, NewTransaction, Period,
    Transaction, TransactionKind,
};

use super::MIGRATION_001_INITIAL;

/// Categories inserted on first initialization, when the table is empty.
const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Food & Dining", "expense", "#e74c3c"),
    ("Transportation", "expense", "#f39c12"),
    ("Shopping", "expense", "#9b59b6"),
    ("Entertainment", "expense", "#e67e22"),
    ("Bills & Utilities", "expense", "#34495e"),
    ("Healthcare", "expense", "#1abc9c"),
    ("Salary", "income", "#27ae60"),
    ("Freelance", "income", "#2ecc71"),
    ("Savings", "savings", "#3498db"),
    ("Investment", "investment", "#8e44ad"),
];

/// Accounts inserted on first initialization, all starting at zero balance.
const DEFAULT_ACCOUNTS: &[(&str, &str)] = &[
    ("Main Bank Account", "bank"),
    ("Mobile Money", "momo"),
    ("Cash", "cash"),
];

/// A transaction row joined with its category and account display fields.
/// The joins are outer joins: a dangling reference yields `None` rather
/// than dropping the row.
#[derive(Debug, Clone)]
pub struct TransactionDetail {
    pub transaction: Transaction,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
    pub account_name: Option<String>,
}

/// One category's summed expense total for a calendar month.
#[derive(Debug, Clone)]
pub struct CategorySpend {
    pub category: String,
    pub total_cents: Cents,
    pub color: String,
}

/// A budget row joined with its category name.
#[derive(Debug, Clone)]
pub struct BudgetDetail {
    pub budget: Budget,
    pub category_name: Option<String>,
}

/// Repository for persisting and querying accounts, categories,
/// transactions and budgets.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations. Every statement is idempotent, so this is
    /// safe to run on every start.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Insert the default categories and accounts, but only into empty
    /// tables. The guard is a row count, not an upsert: a database that has
    /// ever been seeded (or hand-edited) is left alone.
    pub async fn seed_defaults(&self) -> Result<()> {
        let category_count: i64 = sqlx::query("SELECT COUNT(*) as count FROM categories")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count categories")?
            .get("count");

        if category_count == 0 {
            for &(name, kind, color) in DEFAULT_CATEGORIES {
                sqlx::query("INSERT INTO categories (name, kind, color) VALUES (?, ?, ?)")
                    .bind(name)
                    .bind(kind)
                    .bind(color)
                    .execute(&self.pool)
                    .await
                    .context("Failed to seed category")?;
            }
        }

        let account_count: i64 = sqlx::query("SELECT COUNT(*) as count FROM accounts")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count accounts")?
            .get("count");

        if account_count == 0 {
            let now = Utc::now().to_rfc3339();
            for &(name, kind) in DEFAULT_ACCOUNTS {
                sqlx::query(
                    "INSERT INTO accounts (name, kind, balance_cents, created_at) VALUES (?, ?, 0, ?)",
                )
                .bind(name)
                .bind(kind)
                .bind(&now)
                .execute(&self.pool)
                .await
                .context("Failed to seed account")?;
            }
        }

        Ok(())
    }

    /// Initialize a database (connect + migrate + seed).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        repo.seed_defaults().await?;
        Ok(repo)
    }

    // ========================
    // Account operations
    // ========================

    /// Get an account by id.
    pub async fn get_account(&self, id: AccountId) -> Result<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, name, kind, balance_cents, created_at FROM accounts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch account")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    /// List all accounts, ordered by name.
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query(
            "SELECT id, name, kind, balance_cents, created_at FROM accounts ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list accounts")?;

        rows.iter().map(Self::row_to_account).collect()
    }

    /// Sum of all account balances. Zero when no accounts exist.
    pub async fn total_balance(&self) -> Result<Cents> {
        let row = sqlx::query("SELECT COALESCE(SUM(balance_cents), 0) as total FROM accounts")
            .fetch_one(&self.pool)
            .await
            .context("Failed to compute total balance")?;

        Ok(row.get("total"))
    }

    // ========================
    // Category operations
    // ========================

    /// Get a category by id.
    pub async fn get_category(&self, id: CategoryId) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name, kind, color FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch category")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_category(&row)?)),
            None => Ok(None),
        }
    }

    /// List all categories, ordered by kind and then name.
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name, kind, color FROM categories ORDER BY kind, name")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list categories")?;

        rows.iter().map(Self::row_to_category).collect()
    }

    // ========================
    // Transaction operations
    // ========================

    /// Record a posting: insert the transaction row and apply its signed
    /// delta to the owning account's balance, as a single SQLite
    /// transaction. If either statement fails, neither is visible.
    pub async fn record_transaction(&self, new: &NewTransaction) -> Result<Transaction> {
        let created_at = Utc::now();

        let mut db_tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin posting transaction")?;

        let result = sqlx::query(
            r#"
            INSERT INTO transactions (account_id, category_id, amount_cents, description, kind, date, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new.account_id)
        .bind(new.category_id)
        .bind(new.amount_cents)
        .bind(&new.description)
        .bind(new.kind.as_str())
        .bind(new.date.to_string())
        .bind(created_at.to_rfc3339())
        .execute(&mut *db_tx)
        .await
        .context("Failed to insert transaction")?;

        sqlx::query("UPDATE accounts SET balance_cents = balance_cents + ? WHERE id = ?")
            .bind(new.signed_delta())
            .bind(new.account_id)
            .execute(&mut *db_tx)
            .await
            .context("Failed to update account balance")?;

        db_tx.commit().await.context("Failed to commit posting")?;

        Ok(Transaction {
            id: result.last_insert_rowid(),
            account_id: new.account_id,
            category_id: new.category_id,
            amount_cents: new.amount_cents,
            description: new.description.clone(),
            kind: new.kind,
            date: new.date,
            created_at,
        })
    }

    /// List all transactions joined with category and account display
    /// fields, newest calendar date first; same-day rows are ordered by
    /// creation, newest insertion first.
    pub async fn list_transactions(&self) -> Result<Vec<TransactionDetail>> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.account_id, t.category_id, t.amount_cents, t.description, t.kind,
                   t.date, t.created_at,
                   c.name as category_name, c.color as category_color, a.name as account_name
            FROM transactions t
            LEFT JOIN categories c ON t.category_id = c.id
            LEFT JOIN accounts a ON t.account_id = a.id
            ORDER BY t.date DESC, t.created_at DESC, t.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list transactions")?;

        rows.iter().map(Self::row_to_transaction_detail).collect()
    }

    /// The most recently created transactions, newest first.
    pub async fn recent_transactions(&self, limit: i64) -> Result<Vec<TransactionDetail>> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.account_id, t.category_id, t.amount_cents, t.description, t.kind,
                   t.date, t.created_at,
                   c.name as category_name, c.color as category_color, a.name as account_name
            FROM transactions t
            LEFT JOIN categories c ON t.category_id = c.id
            LEFT JOIN accounts a ON t.account_id = a.id
            ORDER BY t.created_at DESC, t.id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list recent transactions")?;

        rows.iter().map(Self::row_to_transaction_detail).collect()
    }

    /// Expense totals grouped by category for the given calendar month
    /// (formatted "YYYY-MM"), largest spend first.
    pub async fn monthly_spending(&self, month: &str) -> Result<Vec<CategorySpend>> {
        let rows = sqlx::query(
            r#"
            SELECT c.name as name, SUM(t.amount_cents) as total_cents, c.color as color
            FROM transactions t
            JOIN categories c ON t.category_id = c.id
            WHERE t.kind = 'expense' AND strftime('%Y-%m', t.date) = ?
            GROUP BY c.id, c.name, c.color
            ORDER BY total_cents DESC
            "#,
        )
        .bind(month)
        .fetch_all(&self.pool)
        .await
        .context("Failed to compute monthly spending")?;

        rows.iter()
            .map(|row| {
                Ok(CategorySpend {
                    category: row.get("name"),
                    total_cents: row.get("total_cents"),
                    color: row.get("color"),
                })
            })
            .collect()
    }

    // ========================
    // Budget operations
    // ========================

    /// Save a new budget.
    pub async fn save_budget(&self, new: &NewBudget) -> Result<Budget> {
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO budgets (category_id, amount_cents, period, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(new.category_id)
        .bind(new.amount_cents)
        .bind(new.period.as_str())
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save budget")?;

        Ok(Budget {
            id: result.last_insert_rowid(),
            category_id: new.category_id,
            amount_cents: new.amount_cents,
            period: new.period,
            created_at,
        })
    }

    /// List all budgets joined with their category name, newest first.
    pub async fn list_budgets(&self) -> Result<Vec<BudgetDetail>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.category_id, b.amount_cents, b.period, b.created_at,
                   c.name as category_name
            FROM budgets b
            LEFT JOIN categories c ON b.category_id = c.id
            ORDER BY b.created_at DESC, b.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list budgets")?;

        rows.iter().map(Self::row_to_budget_detail).collect()
    }

    // ========================
    // Row mapping
    // ========================

    fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Result<Account> {
        let created_at_str: String = row.get("created_at");

        Ok(Account {
            id: row.get("id"),
            name: row.get("name"),
            kind: row.get("kind"),
            balance_cents: row.get("balance_cents"),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        })
    }

    fn row_to_category(row: &sqlx::sqlite::SqliteRow) -> Result<Category> {
        Ok(Category {
            id: row.get("id"),
            name: row.get("name"),
            kind: row.get("kind"),
            color: row.get("color"),
        })
    }

    fn row_to_transaction_detail(row: &sqlx::sqlite::SqliteRow) -> Result<TransactionDetail> {
        let kind_str: String = row.get("kind");
        let date_str: String = row.get("date");
        let created_at_str: String = row.get("created_at");

        let transaction = Transaction {
            id: row.get("id"),
            account_id: row.get("account_id"),
            category_id: row.get("category_id"),
            amount_cents: row.get("amount_cents"),
            description: row.get("description"),
            kind: TransactionKind::from_str(&kind_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid transaction kind: {}", kind_str))?,
            date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .context("Invalid transaction date")?,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        };

        Ok(TransactionDetail {
            transaction,
            category_name: row.get("category_name"),
            category_color: row.get("category_color"),
            account_name: row.get("account_name"),
        })
    }

    fn row_to_budget_detail(row: &sqlx::sqlite::SqliteRow) -> Result<BudgetDetail> {
        let period_str: String = row.get("period");
        let created_at_str: String = row.get("created_at");

        let budget = Budget {
            id: row.get("id"),
            category_id: row.get("category_id"),
            amount_cents: row.get("amount_cents"),
            period: Period::from_str(&period_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid budget period: {}", period_str))?,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        };

        Ok(BudgetDetail {
            budget,
            category_name: row.get("category_name"),
        })
    }
}
