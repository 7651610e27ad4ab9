//! Client configuration.
//!
//! [`ClientConfig`] collects everything needed before a client can be built:
//! base URL, credentials and transport options. It can be populated directly
//! or from the `SHRIMPY_*` environment variables.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::auth::credentials::{API_KEY_ENV, API_SECRET_ENV, require_var};
use crate::auth::{Credentials, StaticCredentials};
use crate::error::ShrimpyError;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "SHRIMPY_URL";
/// Optional environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "SHRIMPY_TIMEOUT_SECS";

/// Configuration for a [`ShrimpyRestClient`](crate::rest::ShrimpyRestClient).
#[derive(Clone)]
pub struct ClientConfig {
    /// API base URL, e.g. `https://dev-api.shrimpy.io`
    pub base_url: String,
    /// API key
    pub api_key: String,
    /// Base64-encoded API secret
    pub api_secret: SecretString,
    /// Upper bound for a single request, send plus body read
    pub timeout: Option<Duration>,
    /// Log prehash and signature at debug level
    pub log_signature_material: bool,
}

impl ClientConfig {
    /// Create a configuration with no timeout and signature logging disabled.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
            timeout: None,
            log_signature_material: false,
        }
    }

    /// Read `SHRIMPY_URL`, `SHRIMPY_KEY`, `SHRIMPY_SECRET` and the optional
    /// `SHRIMPY_TIMEOUT_SECS`, then validate the result.
    pub fn from_env() -> Result<Self, ShrimpyError> {
        let mut config = Self::new(
            require_var(BASE_URL_ENV)?,
            require_var(API_KEY_ENV)?,
            require_var(API_SECRET_ENV)?,
        );

        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ShrimpyError::Configuration(format!("{TIMEOUT_ENV} must be a whole number of seconds"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable or disable logging of prehash and signature.
    pub fn with_signature_logging(mut self, enabled: bool) -> Self {
        self.log_signature_material = enabled;
        self
    }

    /// Check that the base URL parses and no credential is empty.
    pub fn validate(&self) -> Result<(), ShrimpyError> {
        parse_base_url(&self.base_url)?;
        self.credentials().validate()
    }

    /// Credentials described by this configuration.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.api_key.clone(), self.api_secret.expose_secret())
    }

    /// Credentials wrapped in a provider, ready for the client builder.
    pub fn credentials_provider(&self) -> StaticCredentials {
        StaticCredentials::from(self.credentials())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("log_signature_material", &self.log_signature_material)
            .finish()
    }
}

/// Parse a base URL, rejecting empty strings and non-HTTP schemes.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, ShrimpyError> {
    if base_url.trim().is_empty() {
        return Err(ShrimpyError::Configuration("base URL is empty".to_string()));
    }
    let url = Url::parse(base_url)
        .map_err(|e| ShrimpyError::Configuration(format!("invalid base URL {base_url:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ShrimpyError::Configuration(format!(
            "unsupported base URL scheme {scheme:?}"
        ))),
    }
}
