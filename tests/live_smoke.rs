use shrimpy_api_client::ShrimpyRestClient;
use shrimpy_api_client::config::ClientConfig;

fn live_tests_enabled() -> bool {
    std::env::var("SHRIMPY_LIVE_TESTS").ok().as_deref() == Some("1")
}

#[tokio::test]
#[ignore]
async fn live_accounts_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(_) => return Ok(()),
    };
    let client = ShrimpyRestClient::from_config(&config)?;

    let accounts = client.get_accounts().await?;
    if let Some(account) = accounts.first() {
        let _balance = client.get_balance(account.id).await?;
        let _portfolios = client.get_portfolios(account.id).await?;
        let ticker = client.get_ticker(&account.exchange).await?;
        assert!(!ticker.is_empty());
    }

    Ok(())
}
