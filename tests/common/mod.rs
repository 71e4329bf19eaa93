// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use fintrack::application::FinanceService;
use fintrack::domain::{Account, Category};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database.
/// Initialization runs migrations and seeds the default rows.
pub async fn test_service() -> Result<(FinanceService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = FinanceService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to parse a date string into a NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Look up a seeded account by name.
pub async fn account_named(service: &FinanceService, name: &str) -> Result<Account> {
    let account = service
        .list_accounts()
        .await?
        .into_iter()
        .find(|a| a.name == name)
        .unwrap_or_else(|| panic!("no account named {name}"));
    Ok(account)
}

/// Look up a seeded category by name.
pub async fn category_named(service: &FinanceService, name: &str) -> Result<Category> {
    let category = service
        .list_categories()
        .await?
        .into_iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("no category named {name}"));
    Ok(category)
}
