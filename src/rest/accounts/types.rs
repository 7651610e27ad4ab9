//! Types for the account and portfolio endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// An exchange account linked to Shrimpy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Exchange account ID
    pub id: u64,
    /// Exchange name, e.g. `binance`
    pub exchange: String,
    /// Whether a rebalance is currently running
    pub is_rebalancing: bool,
}

/// Balance snapshot of an exchange account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// When Shrimpy last retrieved the balance from the exchange
    #[serde(with = "time::serde::rfc3339")]
    pub retrieved_at: OffsetDateTime,
    /// Per-asset balances
    pub balances: Vec<AssetBalance>,
}

/// Balance of a single asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBalance {
    /// Asset symbol, e.g. `BTC`
    pub symbol: String,
    /// Amount held, in the asset itself
    pub native_value: Decimal,
    /// Value in BTC
    pub btc_value: Decimal,
    /// Value in USD
    pub usd_value: Decimal,
}

/// What causes a portfolio to rebalance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyTrigger {
    /// Rebalance every `rebalancePeriod` hours
    Interval,
    /// Rebalance when an allocation drifts past `rebalanceThreshold`
    Threshold,
    /// A trigger this client does not know about. Cannot be sent back.
    #[serde(other, skip_serializing)]
    Unknown,
}

impl std::fmt::Display for StrategyTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyTrigger::Interval => write!(f, "interval"),
            StrategyTrigger::Threshold => write!(f, "threshold"),
            StrategyTrigger::Unknown => write!(f, "unknown"),
        }
    }
}

/// A portfolio (automation) configured on an exchange account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    /// Portfolio ID
    pub id: u64,
    /// Display name
    pub name: String,
    /// Hours between interval rebalances
    pub rebalance_period: u32,
    /// Whether this is the account's active portfolio
    pub active: bool,
    /// Target allocation
    pub strategy: PortfolioStrategy,
    /// Rebalance trigger
    pub strategy_trigger: StrategyTrigger,
    /// Drift percentage that triggers a threshold rebalance
    pub rebalance_threshold: Decimal,
    /// Maximum spread percentage tolerated when trading
    pub max_spread: Decimal,
    /// Maximum slippage percentage tolerated when trading
    pub max_slippage: Decimal,
}

/// Target allocation of a portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStrategy {
    /// Whether allocations are computed dynamically
    pub is_dynamic: bool,
    /// Allocation per currency
    pub allocations: Vec<PortfolioAllocation>,
}

/// Allocation of one currency within a portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioAllocation {
    /// Currency symbol
    pub currency: String,
    /// Target share, in percent
    pub percent: Decimal,
    /// Whether the allocation is pinned
    pub fixed: bool,
}

/// Request body for updating a portfolio.
///
/// Percentages are sent as decimal strings, as Shrimpy expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioUpdateRequest {
    /// Display name
    pub name: String,
    /// Hours between interval rebalances
    pub rebalance_period: u32,
    /// Target allocation
    pub strategy: PortfolioUpdateStrategy,
    /// Rebalance trigger
    pub strategy_trigger: StrategyTrigger,
    /// Drift percentage that triggers a threshold rebalance
    #[serde(with = "rust_decimal::serde::str")]
    pub rebalance_threshold: Decimal,
    /// Maximum spread percentage tolerated when trading
    #[serde(with = "rust_decimal::serde::str")]
    pub max_spread: Decimal,
    /// Maximum slippage percentage tolerated when trading
    #[serde(with = "rust_decimal::serde::str")]
    pub max_slippage: Decimal,
}

impl PortfolioUpdateRequest {
    /// Sum of all allocation percentages. Shrimpy rejects updates where this is not 100.
    pub fn total_percent(&self) -> Decimal {
        self.strategy.allocations.iter().map(|a| a.percent).sum()
    }
}

/// Target allocation sent when updating a portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioUpdateStrategy {
    /// Whether allocations are computed dynamically
    pub is_dynamic: bool,
    /// Allocation per symbol
    pub allocations: Vec<AllocationTarget>,
}

/// Allocation of one symbol in an update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationTarget {
    /// Asset symbol
    pub symbol: String,
    /// Target share, in percent
    #[serde(with = "rust_decimal::serde::str")]
    pub percent: Decimal,
}

impl AllocationTarget {
    /// Create an allocation target.
    pub fn new(symbol: impl Into<String>, percent: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            percent,
        }
    }
}
