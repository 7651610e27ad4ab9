//! Types for the market data endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Price information for one asset on an exchange.
///
/// Shrimpy sends prices as decimal strings and `null` for assets it has no
/// price for yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerEntry {
    /// Asset name, e.g. `Bitcoin`
    pub name: String,
    /// Asset symbol, e.g. `BTC`
    pub symbol: String,
    /// Price in USD
    #[serde(default)]
    pub price_usd: Option<Decimal>,
    /// Price in BTC
    #[serde(default)]
    pub price_btc: Option<Decimal>,
    /// USD price change over the last 24 hours, in percent
    #[serde(default, rename = "percentChange24hUsd")]
    pub percent_change_24h_usd: Option<Decimal>,
    /// When the price was last updated
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_updated: Option<OffsetDateTime>,
}
