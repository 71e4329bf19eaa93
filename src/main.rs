use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;

use fintrack::api;
use fintrack::application::FinanceService;

/// Fintrack - Personal Finance Tracker
#[derive(Parser)]
#[command(name = "fintrack")]
#[command(about = "A self-hosted personal finance tracker with a JSON HTTP API")]
#[command(version)]
struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "finance.db")]
    database: String,

    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let service = FinanceService::init(&cli.database).await?;
    api::run_server(service, cli.listen).await
}

/// Initializes the global tracing subscriber. Filtering defaults to info
/// for this crate and can be overridden with RUST_LOG.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::from_default_env().add_directive("fintrack=info".parse().unwrap());
    fmt().with_env_filter(filter).init();
}
