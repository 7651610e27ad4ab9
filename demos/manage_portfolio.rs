//! Example: Inspect an account's portfolios, activate one and rebalance.
//!
//! Run with: cargo run --example manage_portfolio -- <account_id> <portfolio_id>

use shrimpy_api_client::config::ClientConfig;
use shrimpy_api_client::rest::ShrimpyClient;
use shrimpy_api_client::{ShrimpyError, ShrimpyRestClient};

async fn activate_and_rebalance<C: ShrimpyClient>(
    client: &C,
    account_id: u64,
    portfolio_id: u64,
) -> Result<(), ShrimpyError> {
    let balance = client.get_balance(account_id).await?;
    println!("Balance retrieved at {}:", balance.retrieved_at);
    for asset in &balance.balances {
        println!("  {:<6} {} (${})", asset.symbol, asset.native_value, asset.usd_value);
    }

    for portfolio in client.get_portfolios(account_id).await? {
        println!(
            "Portfolio {} {:?} active={} trigger={}",
            portfolio.id, portfolio.name, portfolio.active, portfolio.strategy_trigger
        );
    }

    client.activate_portfolio(account_id, portfolio_id).await?;
    client.rebalance_account(account_id).await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt().init();

    let mut args = std::env::args().skip(1);
    let account_id: u64 = args.next().ok_or("missing account id")?.parse()?;
    let portfolio_id: u64 = args.next().ok_or("missing portfolio id")?.parse()?;

    let client = ShrimpyRestClient::from_config(&ClientConfig::from_env()?)?;

    match activate_and_rebalance(&client, account_id, portfolio_id).await {
        Ok(()) => println!("Rebalance requested"),
        Err(ShrimpyError::OperationRejected { operation }) => {
            println!("Shrimpy declined {operation}; check the portfolio settings");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
