//! Credential management for Shrimpy API authentication.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::error::ShrimpyError;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "SHRIMPY_KEY";
/// Environment variable holding the base64-encoded API secret.
pub const API_SECRET_ENV: &str = "SHRIMPY_SECRET";

/// API credentials containing the key and secret.
#[derive(Clone)]
pub struct Credentials {
    /// The API key, sent verbatim in the `SHRIMPY-API-KEY` header
    pub api_key: String,
    /// The base64-encoded API secret, used as the HMAC key once decoded
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and a base64-encoded secret.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Get the API secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }

    /// Reject empty key or secret.
    pub fn validate(&self) -> Result<(), ShrimpyError> {
        if self.api_key.trim().is_empty() {
            return Err(ShrimpyError::Configuration("API key is empty".to_string()));
        }
        if self.expose_secret().trim().is_empty() {
            return Err(ShrimpyError::Configuration("API secret is empty".to_string()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(api_key, api_secret),
        }
    }
}

impl From<Credentials> for StaticCredentials {
    fn from(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl CredentialsProvider for Arc<StaticCredentials> {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads from `SHRIMPY_KEY` and `SHRIMPY_SECRET`.
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Create credentials from the default environment variables.
    pub fn from_env() -> Result<Self, ShrimpyError> {
        Self::from_env_vars(API_KEY_ENV, API_SECRET_ENV)
    }

    /// Create credentials from custom environment variable names.
    ///
    /// Unset or empty variables are reported as [`ShrimpyError::Configuration`].
    pub fn from_env_vars(key_var: &str, secret_var: &str) -> Result<Self, ShrimpyError> {
        let api_key = require_var(key_var)?;
        let api_secret = require_var(secret_var)?;

        Ok(Self {
            credentials: Credentials::new(api_key, api_secret),
        })
    }

    /// Try to create credentials from the default environment variables.
    ///
    /// Returns `None` if either variable is unset or empty.
    pub fn try_from_env() -> Option<Self> {
        Self::from_env().ok()
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

pub(crate) fn require_var(name: &str) -> Result<String, ShrimpyError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ShrimpyError::Configuration(format!("{name} is not set"))),
    }
}
