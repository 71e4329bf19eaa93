use thiserror::Error;

use crate::domain::{AccountId, CategoryId};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the caller is at fault (bad input or a dangling reference)
    /// rather than the store.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AppError::Database(_))
    }
}
