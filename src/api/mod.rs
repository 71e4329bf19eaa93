mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};

use crate::application::FinanceService;

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FinanceService>,
}

/// Build the API router.
pub fn router(service: Arc<FinanceService>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/dashboard-data", get(handlers::dashboard_data))
        .route("/api/accounts", get(handlers::list_accounts))
        .route("/api/categories", get(handlers::list_categories))
        .route(
            "/api/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route(
            "/api/budgets",
            get(handlers::list_budgets).post(handlers::create_budget),
        )
        .with_state(AppState { service })
}

/// Serve the API until the process is stopped.
pub async fn run_server(service: FinanceService, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(Arc::new(service));

    tracing::info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
