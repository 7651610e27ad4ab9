//! Authentication module for the Shrimpy API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Second-resolution nonce generation behind a pluggable clock
//! - HMAC-SHA256 signature generation for every request

pub(crate) mod credentials;
mod nonce;
mod signature;

pub use credentials::{Credentials, CredentialsProvider, EnvCredentials, StaticCredentials};
pub use nonce::{Clock, NonceProvider, SystemClock, UnixSecondsNonce};
pub use signature::{SignedRequest, prehash, sign, sign_request};
