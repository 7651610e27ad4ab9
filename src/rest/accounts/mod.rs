//! Account and portfolio endpoints.

mod types;

pub use types::*;

use crate::error::ShrimpyError;
use crate::rest::ShrimpyRestClient;
use crate::rest::endpoints;

impl ShrimpyRestClient {
    /// List the exchange accounts managed by Shrimpy.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use shrimpy_api_client::config::ClientConfig;
    /// use shrimpy_api_client::rest::ShrimpyRestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = ShrimpyRestClient::from_config(&ClientConfig::from_env()?)?;
    ///     for account in client.get_accounts().await? {
    ///         println!("{}: {}", account.id, account.exchange);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_accounts(&self) -> Result<Vec<Account>, ShrimpyError> {
        self.signed_get("get_accounts", endpoints::ACCOUNTS).await
    }

    /// Get the balance of an exchange account.
    pub async fn get_balance(&self, account_id: u64) -> Result<Balance, ShrimpyError> {
        self.signed_get("get_balance", &endpoints::balance(account_id))
            .await
    }

    /// List the portfolios configured on an exchange account.
    pub async fn get_portfolios(&self, account_id: u64) -> Result<Vec<Portfolio>, ShrimpyError> {
        self.signed_get("get_portfolios", &endpoints::portfolios(account_id))
            .await
    }

    /// Replace a portfolio's settings.
    ///
    /// Returns [`ShrimpyError::OperationRejected`] when Shrimpy declines the
    /// update, e.g. because the allocations do not add up to 100%.
    pub async fn update_portfolio(
        &self,
        account_id: u64,
        portfolio_id: u64,
        request: &PortfolioUpdateRequest,
    ) -> Result<(), ShrimpyError> {
        let body = serde_json::to_string(request).map_err(ShrimpyError::Serialize)?;
        self.signed_post_ack(
            "update_portfolio",
            &endpoints::update_portfolio(account_id, portfolio_id),
            Some(body),
        )
        .await
    }

    /// Make a portfolio the active one for its account.
    pub async fn activate_portfolio(
        &self,
        account_id: u64,
        portfolio_id: u64,
    ) -> Result<(), ShrimpyError> {
        self.signed_post_ack(
            "activate_portfolio",
            &endpoints::activate_portfolio(account_id, portfolio_id),
            None,
        )
        .await
    }

    /// Rebalance the account's active portfolio now.
    pub async fn rebalance_account(&self, account_id: u64) -> Result<(), ShrimpyError> {
        self.signed_post_ack("rebalance_account", &endpoints::rebalance(account_id), None)
            .await
    }
}
