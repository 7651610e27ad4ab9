//! Market data endpoints.

mod types;

pub use types::*;

use crate::error::ShrimpyError;
use crate::rest::ShrimpyRestClient;
use crate::rest::endpoints;

impl ShrimpyRestClient {
    /// Get current prices for every asset on an exchange.
    ///
    /// # Arguments
    ///
    /// * `exchange` - Exchange name in any case (e.g., "Binance").
    ///
    /// Fails with [`ShrimpyError::InvalidExchange`] before any request is made
    /// when the name contains anything but letters, digits, `-` or `_`.
    pub async fn get_ticker(&self, exchange: &str) -> Result<Vec<TickerEntry>, ShrimpyError> {
        let endpoint = endpoints::ticker(exchange)?;
        self.signed_get("get_ticker", &endpoint).await
    }
}
