//! Shrimpy REST API endpoint paths and header names.

use crate::error::ShrimpyError;

/// Base URL for the Shrimpy REST API.
pub const SHRIMPY_BASE_URL: &str = "https://dev-api.shrimpy.io";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "SHRIMPY-API-KEY";
/// Header carrying the request nonce.
pub const API_NONCE_HEADER: &str = "SHRIMPY-API-NONCE";
/// Header carrying the request signature.
pub const API_SIGNATURE_HEADER: &str = "SHRIMPY-API-SIGNATURE";

/// List exchange accounts.
pub const ACCOUNTS: &str = "/v1/accounts";

/// Balance of one exchange account.
pub fn balance(account_id: u64) -> String {
    format!("{ACCOUNTS}/{account_id}/balance")
}

/// Portfolios configured on one exchange account.
pub fn portfolios(account_id: u64) -> String {
    format!("{ACCOUNTS}/{account_id}/portfolios")
}

/// Update a portfolio.
pub fn update_portfolio(account_id: u64, portfolio_id: u64) -> String {
    format!("{ACCOUNTS}/{account_id}/portfolios/{portfolio_id}/update")
}

/// Make a portfolio the active one for its account.
pub fn activate_portfolio(account_id: u64, portfolio_id: u64) -> String {
    format!("{ACCOUNTS}/{account_id}/portfolios/{portfolio_id}/activate")
}

/// Trigger a rebalance of the account's active portfolio.
pub fn rebalance(account_id: u64) -> String {
    format!("{ACCOUNTS}/{account_id}/rebalance")
}

/// Ticker for an exchange. Shrimpy expects the exchange name in lower case.
///
/// Only ASCII letters, digits, `-` and `_` are accepted, so the name always
/// stays a single path segment.
pub fn ticker(exchange: &str) -> Result<String, ShrimpyError> {
    let exchange = exchange.to_ascii_lowercase();
    let valid = !exchange.is_empty()
        && exchange
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_');
    if !valid {
        return Err(ShrimpyError::InvalidExchange(exchange));
    }
    Ok(format!("/v1/{exchange}/ticker"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_paths() {
        assert_eq!(balance(7), "/v1/accounts/7/balance");
        assert_eq!(portfolios(7), "/v1/accounts/7/portfolios");
        assert_eq!(update_portfolio(7, 3), "/v1/accounts/7/portfolios/3/update");
        assert_eq!(activate_portfolio(7, 3), "/v1/accounts/7/portfolios/3/activate");
        assert_eq!(rebalance(7), "/v1/accounts/7/rebalance");
    }

    #[test]
    fn test_ticker_lowercases_exchange() {
        assert_eq!(ticker("Binance").unwrap(), "/v1/binance/ticker");
        assert_eq!(ticker("KUCOIN").unwrap(), "/v1/kucoin/ticker");
        assert_eq!(ticker("huobi_global").unwrap(), "/v1/huobi_global/ticker");
    }

    #[test]
    fn test_ticker_rejects_path_characters() {
        let names = [
            "",
            "binance?x=1",
            "a/../accounts",
            "..",
            "bin ance",
            "bittrex#",
            "b%2Fx",
            "bïnance",
        ];
        for name in names {
            assert!(
                matches!(ticker(name), Err(ShrimpyError::InvalidExchange(_))),
                "{name:?} should be rejected"
            );
        }
    }
}
