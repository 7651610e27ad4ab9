//! # Shrimpy Client
//!
//! An async Rust client library for the Shrimpy account management REST API.
//!
//! ## Features
//!
//! - Per-request HMAC-SHA256 signing with second-resolution nonces
//! - Typed access to accounts, balances, portfolios and tickers
//! - Distinct errors for transport failures, unexpected statuses, malformed
//!   responses and rejected operations
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shrimpy_api_client::config::ClientConfig;
//! use shrimpy_api_client::rest::ShrimpyRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads SHRIMPY_URL, SHRIMPY_KEY and SHRIMPY_SECRET.
//!     let client = ShrimpyRestClient::from_config(&ClientConfig::from_env()?)?;
//!     let accounts = client.get_accounts().await?;
//!     println!("Accounts: {:?}", accounts);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod rest;

// Re-export commonly used types at crate root
pub use config::ClientConfig;
pub use error::{ShrimpyError, TransportError};
pub use rest::{ShrimpyClient, ShrimpyRestClient};

/// Result type alias using ShrimpyError
pub type Result<T> = std::result::Result<T, ShrimpyError>;
