mod common;

use anyhow::Result;
use chrono::Utc;
use fintrack::domain::TransactionKind;

use common::{account_named, category_named, parse_date, test_service};

#[tokio::test]
async fn test_empty_dashboard() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let summary = service.dashboard().await?;

    // Seeded accounts all start at zero
    assert_eq!(summary.total_balance_cents, 0);
    assert!(summary.recent_transactions.is_empty());
    assert!(summary.monthly_spending.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_total_balance_sums_all_accounts() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let bank = account_named(&service, "Main Bank Account").await?;
    let cash = account_named(&service, "Cash").await?;
    let today = Utc::now().date_naive();

    service
        .post_transaction(
            bank.id,
            None,
            100000,
            "salary".to_string(),
            TransactionKind::Income,
            today,
        )
        .await?;
    service
        .post_transaction(
            cash.id,
            None,
            2500,
            "coffee".to_string(),
            TransactionKind::Expense,
            today,
        )
        .await?;

    let summary = service.dashboard().await?;
    assert_eq!(summary.total_balance_cents, 100000 - 2500);

    Ok(())
}

#[tokio::test]
async fn test_recent_transactions_capped_at_five_newest_first() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let account = account_named(&service, "Cash").await?;
    let today = Utc::now().date_naive();

    for i in 1..=7 {
        service
            .post_transaction(
                account.id,
                None,
                100 * i,
                format!("posting {i}"),
                TransactionKind::Expense,
                today,
            )
            .await?;
    }

    let summary = service.dashboard().await?;
    assert_eq!(summary.recent_transactions.len(), 5);

    let descriptions: Vec<&str> = summary
        .recent_transactions
        .iter()
        .map(|d| d.transaction.description.as_str())
        .collect();
    assert_eq!(
        descriptions,
        ["posting 7", "posting 6", "posting 5", "posting 4", "posting 3"]
    );

    Ok(())
}

#[tokio::test]
async fn test_monthly_spending_filters_and_sorts() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let account = account_named(&service, "Main Bank Account").await?;
    let food = category_named(&service, "Food & Dining").await?;
    let transport = category_named(&service, "Transportation").await?;
    let salary = category_named(&service, "Salary").await?;
    let today = Utc::now().date_naive();

    // Two food expenses and one transport expense this month
    service
        .post_transaction(
            account.id,
            Some(food.id),
            10000,
            "groceries".to_string(),
            TransactionKind::Expense,
            today,
        )
        .await?;
    service
        .post_transaction(
            account.id,
            Some(food.id),
            20000,
            "dinner".to_string(),
            TransactionKind::Expense,
            today,
        )
        .await?;
    service
        .post_transaction(
            account.id,
            Some(transport.id),
            5000,
            "fuel".to_string(),
            TransactionKind::Expense,
            today,
        )
        .await?;

    // Excluded: an expense dated in another month and an income this month
    service
        .post_transaction(
            account.id,
            Some(food.id),
            99999,
            "old receipt".to_string(),
            TransactionKind::Expense,
            parse_date("2020-01-15"),
        )
        .await?;
    service
        .post_transaction(
            account.id,
            Some(salary.id),
            500000,
            "payday".to_string(),
            TransactionKind::Income,
            today,
        )
        .await?;

    let summary = service.dashboard().await?;
    assert_eq!(summary.monthly_spending.len(), 2);

    // Sorted by summed amount, descending
    assert_eq!(summary.monthly_spending[0].category, "Food & Dining");
    assert_eq!(summary.monthly_spending[0].total_cents, 30000);
    assert_eq!(summary.monthly_spending[0].color, "#e74c3c");
    assert_eq!(summary.monthly_spending[1].category, "Transportation");
    assert_eq!(summary.monthly_spending[1].total_cents, 5000);

    Ok(())
}

#[tokio::test]
async fn test_listing_orders_by_date_then_creation() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let account = account_named(&service, "Cash").await?;

    // Created first but dated later: should lead the listing
    service
        .post_transaction(
            account.id,
            None,
            100,
            "late date".to_string(),
            TransactionKind::Expense,
            parse_date("2024-06-02"),
        )
        .await?;

    // Two same-day postings: the later insertion wins the tie
    service
        .post_transaction(
            account.id,
            None,
            200,
            "same day, first".to_string(),
            TransactionKind::Expense,
            parse_date("2024-06-01"),
        )
        .await?;
    service
        .post_transaction(
            account.id,
            None,
            300,
            "same day, second".to_string(),
            TransactionKind::Expense,
            parse_date("2024-06-01"),
        )
        .await?;

    let descriptions: Vec<String> = service
        .list_transactions()
        .await?
        .into_iter()
        .map(|d| d.transaction.description)
        .collect();

    assert_eq!(
        descriptions,
        ["late date", "same day, second", "same day, first"]
    );

    Ok(())
}
