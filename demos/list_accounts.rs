//! Example: Load configuration from the environment and list accounts.
//!
//! Run with: cargo run --example list_accounts
//!
//! Requires `SHRIMPY_URL`, `SHRIMPY_KEY` and `SHRIMPY_SECRET` (a `.env` file
//! is read if present). Set `RUST_LOG=shrimpy_api_client=debug` to see the
//! request pipeline.

use shrimpy_api_client::ShrimpyRestClient;
use shrimpy_api_client::config::ClientConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClientConfig::from_env()?;
    let client = ShrimpyRestClient::from_config(&config)?;

    let accounts = client.get_accounts().await?;
    tracing::info!(count = accounts.len(), "successfully found accounts");
    for account in &accounts {
        println!(
            "{:>8}  {:<12} rebalancing={}",
            account.id, account.exchange, account.is_rebalancing
        );
    }

    Ok(())
}
