//! Trait definition for the Shrimpy REST API client.
//!
//! [`ShrimpyClient`] abstracts the operation set so callers can depend on the
//! capability rather than on [`ShrimpyRestClient`], e.g. to substitute a mock
//! in their own tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use shrimpy_api_client::rest::ShrimpyClient;
//!
//! async fn rebalance_all<C: ShrimpyClient>(client: &C) -> Result<(), shrimpy_api_client::ShrimpyError> {
//!     for account in client.get_accounts().await? {
//!         client.rebalance_account(account.id).await?;
//!     }
//!     Ok(())
//! }
//! ```

use std::future::Future;

use crate::error::ShrimpyError;
use crate::rest::ShrimpyRestClient;
use crate::rest::accounts::{Account, Balance, Portfolio, PortfolioUpdateRequest};
use crate::rest::market::TickerEntry;

/// Trait defining all Shrimpy REST API operations.
///
/// All methods are async and return `Result<T, ShrimpyError>`.
pub trait ShrimpyClient: Send + Sync {
    /// List exchange accounts.
    fn get_accounts(&self) -> impl Future<Output = Result<Vec<Account>, ShrimpyError>> + Send;

    /// Get the balance of an exchange account.
    fn get_balance(
        &self,
        account_id: u64,
    ) -> impl Future<Output = Result<Balance, ShrimpyError>> + Send;

    /// List the portfolios of an exchange account.
    fn get_portfolios(
        &self,
        account_id: u64,
    ) -> impl Future<Output = Result<Vec<Portfolio>, ShrimpyError>> + Send;

    /// Get current prices for an exchange.
    fn get_ticker(
        &self,
        exchange: &str,
    ) -> impl Future<Output = Result<Vec<TickerEntry>, ShrimpyError>> + Send;

    /// Replace a portfolio's settings.
    fn update_portfolio(
        &self,
        account_id: u64,
        portfolio_id: u64,
        request: &PortfolioUpdateRequest,
    ) -> impl Future<Output = Result<(), ShrimpyError>> + Send;

    /// Make a portfolio the active one for its account.
    fn activate_portfolio(
        &self,
        account_id: u64,
        portfolio_id: u64,
    ) -> impl Future<Output = Result<(), ShrimpyError>> + Send;

    /// Rebalance an account's active portfolio.
    fn rebalance_account(
        &self,
        account_id: u64,
    ) -> impl Future<Output = Result<(), ShrimpyError>> + Send;
}

impl ShrimpyClient for ShrimpyRestClient {
    async fn get_accounts(&self) -> Result<Vec<Account>, ShrimpyError> {
        ShrimpyRestClient::get_accounts(self).await
    }

    async fn get_balance(&self, account_id: u64) -> Result<Balance, ShrimpyError> {
        ShrimpyRestClient::get_balance(self, account_id).await
    }

    async fn get_portfolios(&self, account_id: u64) -> Result<Vec<Portfolio>, ShrimpyError> {
        ShrimpyRestClient::get_portfolios(self, account_id).await
    }

    async fn get_ticker(&self, exchange: &str) -> Result<Vec<TickerEntry>, ShrimpyError> {
        ShrimpyRestClient::get_ticker(self, exchange).await
    }

    async fn update_portfolio(
        &self,
        account_id: u64,
        portfolio_id: u64,
        request: &PortfolioUpdateRequest,
    ) -> Result<(), ShrimpyError> {
        ShrimpyRestClient::update_portfolio(self, account_id, portfolio_id, request).await
    }

    async fn activate_portfolio(
        &self,
        account_id: u64,
        portfolio_id: u64,
    ) -> Result<(), ShrimpyError> {
        ShrimpyRestClient::activate_portfolio(self, account_id, portfolio_id).await
    }

    async fn rebalance_account(&self, account_id: u64) -> Result<(), ShrimpyError> {
        ShrimpyRestClient::rebalance_account(self, account_id).await
    }
}
