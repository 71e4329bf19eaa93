use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::application::{AppError, DashboardSummary};
use crate::domain::{Account, Category, Period, TransactionKind, cents_from_amount, cents_to_amount};
use crate::storage::{BudgetDetail, CategorySpend, TransactionDetail};

use super::AppState;

/// Application error wrapped for the HTTP boundary. Client errors (bad
/// input, dangling references) surface as 422 with a message; store errors
/// are logged and surface as an opaque 500.
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = if self.0.is_client_error() {
            (StatusCode::UNPROCESSABLE_ENTITY, self.0.to_string())
        } else {
            tracing::error!("request failed: {}", self.0);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            )
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// ========================
// Wire types
// ========================

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub account_id: i64,
    pub category_id: Option<i64>,
    pub amount: f64,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct CreateBudgetRequest {
    pub category_id: i64,
    pub amount: f64,
    #[serde(default)]
    pub period: Period,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: i64,
    pub account_id: i64,
    pub category_id: Option<i64>,
    pub amount: f64,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub category_name: Option<String>,
    pub color: Option<String>,
    pub account_name: Option<String>,
}

/// A compact transaction row for the dashboard's recent-activity list.
#[derive(Debug, Serialize)]
pub struct RecentTransactionResponse {
    pub id: i64,
    pub amount: f64,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub category: Option<String>,
    pub account: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MonthlySpendingResponse {
    pub name: String,
    pub total: f64,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_balance: f64,
    pub recent_transactions: Vec<RecentTransactionResponse>,
    pub monthly_spending: Vec<MonthlySpendingResponse>,
}

#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    pub id: i64,
    pub category_id: i64,
    pub amount: f64,
    pub period: Period,
    pub created_at: DateTime<Utc>,
    pub category_name: Option<String>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            kind: account.kind,
            balance: cents_to_amount(account.balance_cents),
            created_at: account.created_at,
        }
    }
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            kind: category.kind,
            color: category.color,
        }
    }
}

impl From<TransactionDetail> for TransactionResponse {
    fn from(detail: TransactionDetail) -> Self {
        let t = detail.transaction;
        Self {
            id: t.id,
            account_id: t.account_id,
            category_id: t.category_id,
            amount: cents_to_amount(t.amount_cents),
            description: t.description,
            kind: t.kind,
            date: t.date,
            created_at: t.created_at,
            category_name: detail.category_name,
            color: detail.category_color,
            account_name: detail.account_name,
        }
    }
}

impl From<TransactionDetail> for RecentTransactionResponse {
    fn from(detail: TransactionDetail) -> Self {
        let t = detail.transaction;
        Self {
            id: t.id,
            amount: cents_to_amount(t.amount_cents),
            description: t.description,
            kind: t.kind,
            date: t.date,
            category: detail.category_name,
            account: detail.account_name,
        }
    }
}

impl From<CategorySpend> for MonthlySpendingResponse {
    fn from(spend: CategorySpend) -> Self {
        Self {
            name: spend.category,
            total: cents_to_amount(spend.total_cents),
            color: spend.color,
        }
    }
}

impl From<DashboardSummary> for DashboardResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            total_balance: cents_to_amount(summary.total_balance_cents),
            recent_transactions: summary
                .recent_transactions
                .into_iter()
                .map(Into::into)
                .collect(),
            monthly_spending: summary.monthly_spending.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<BudgetDetail> for BudgetResponse {
    fn from(detail: BudgetDetail) -> Self {
        let b = detail.budget;
        Self {
            id: b.id,
            category_id: b.category_id,
            amount: cents_to_amount(b.amount_cents),
            period: b.period,
            created_at: b.created_at,
            category_name: detail.category_name,
        }
    }
}

// ========================
// Handlers
// ========================

pub async fn dashboard_data(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let summary = state.service.dashboard().await?;
    Ok(Json(summary.into()))
}

pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountResponse>>, ApiError> {
    let accounts = state.service.list_accounts().await?;
    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.service.list_categories().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

pub async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransactionResponse>>, ApiError> {
    let transactions = state.service.list_transactions().await?;
    Ok(Json(transactions.into_iter().map(Into::into).collect()))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    Json(body): Json<CreateTransactionRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let amount_cents =
        cents_from_amount(body.amount).map_err(|e| AppError::InvalidAmount(e.to_string()))?;

    state
        .service
        .post_transaction(
            body.account_id,
            body.category_id,
            amount_cents,
            body.description,
            body.kind,
            body.date,
        )
        .await?;

    Ok(Json(json!({ "success": true })))
}

pub async fn list_budgets(
    State(state): State<AppState>,
) -> Result<Json<Vec<BudgetResponse>>, ApiError> {
    let budgets = state.service.list_budgets().await?;
    Ok(Json(budgets.into_iter().map(Into::into).collect()))
}

pub async fn create_budget(
    State(state): State<AppState>,
    Json(body): Json<CreateBudgetRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let amount_cents =
        cents_from_amount(body.amount).map_err(|e| AppError::InvalidAmount(e.to_string()))?;

    state
        .service
        .create_budget(body.category_id, amount_cents, body.period)
        .await?;

    Ok(Json(json!({ "success": true })))
}
