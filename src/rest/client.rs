//! Shrimpy REST API client implementation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use url::Url;

use crate::auth::{CredentialsProvider, NonceProvider, SignedRequest, UnixSecondsNonce};
use crate::config::{ClientConfig, parse_base_url};
use crate::error::{ShrimpyError, TransportError};
use crate::rest::endpoints::{
    API_KEY_HEADER, API_NONCE_HEADER, API_SIGNATURE_HEADER, SHRIMPY_BASE_URL,
};

/// The Shrimpy REST API client.
///
/// Every call is signed with a fresh nonce, sent once, and checked against the
/// expected status. The client holds no per-call state, so it can be cloned or
/// shared between tasks freely.
///
/// # Example
///
/// ```rust,no_run
/// use shrimpy_api_client::auth::StaticCredentials;
/// use shrimpy_api_client::rest::ShrimpyRestClient;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "c2VjcmV0"));
///     let client = ShrimpyRestClient::builder()
///         .credentials(credentials)
///         .build()?;
///
///     let accounts = client.get_accounts().await?;
///     println!("Accounts: {:?}", accounts);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ShrimpyRestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Arc<dyn CredentialsProvider>,
    nonce_provider: Arc<dyn NonceProvider>,
    timeout: Option<Duration>,
    log_signature_material: bool,
}

impl ShrimpyRestClient {
    /// Create a new client builder.
    pub fn builder() -> ShrimpyRestClientBuilder {
        ShrimpyRestClientBuilder::new()
    }

    /// Build a client from a validated [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, ShrimpyError> {
        let mut builder = Self::builder()
            .base_url(config.base_url.clone())
            .credentials(Arc::new(config.credentials_provider()))
            .log_signature_material(config.log_signature_material);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sign and send one request, returning the raw body.
    ///
    /// GET requests are sent without a body, so any `body` passed with
    /// [`Method::GET`] is ignored and the empty body is signed instead.
    ///
    /// Fails with [`ShrimpyError::UnexpectedStatus`] when the response status
    /// differs from `expected_status`. Transport failures are returned as-is
    /// and never retried.
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<String>,
        expected_status: StatusCode,
    ) -> Result<String, ShrimpyError> {
        self.dispatch(method, endpoint, body, expected_status).await
    }

    /// Like [`execute`](Self::execute), but gives up as soon as `cancel`
    /// completes, reporting [`TransportError::Cancelled`].
    pub async fn execute_with_cancel<F>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<String>,
        expected_status: StatusCode,
        cancel: F,
    ) -> Result<String, ShrimpyError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.dispatch(method, endpoint, body, expected_status) => result,
            () = cancel => {
                warn!(endpoint, "Shrimpy request cancelled by caller");
                Err(TransportError::Cancelled.into())
            }
        }
    }

    async fn dispatch(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<String>,
        expected_status: StatusCode,
    ) -> Result<String, ShrimpyError> {
        let url = self.endpoint_url(endpoint)?;
        let credentials = self.credentials.get_credentials();
        let nonce = self.nonce_provider.next_nonce();

        // The signed body must be the one that goes on the wire.
        let body = if method == Method::GET {
            if body.is_some() {
                warn!(endpoint, "ignoring request body on GET");
            }
            String::new()
        } else {
            body.unwrap_or_default()
        };

        // The signature covers the URL path, including any base URL prefix.
        let request = SignedRequest::new(credentials, method, url.path(), nonce, body)
            .inspect_err(|e| warn!(error = %e, "unable to sign Shrimpy request"))?;

        if self.log_signature_material {
            debug!(
                prehash = %request.prehash(),
                signature = %request.signature,
                "computed request signature"
            );
        } else {
            trace!(nonce, "computed request signature");
        }
        debug!(method = %request.method, path = %request.path, nonce, "issuing Shrimpy request");

        let send = self.send(url, &credentials.api_key, request, expected_status);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, send).await.map_err(|_| {
                warn!(endpoint, timeout = ?limit, "Shrimpy request timed out");
                ShrimpyError::from(TransportError::TimedOut(limit))
            })?,
            None => send.await,
        }
    }

    async fn send(
        &self,
        url: Url,
        api_key: &str,
        request: SignedRequest,
        expected_status: StatusCode,
    ) -> Result<String, ShrimpyError> {
        let mut builder = self
            .http_client
            .request(request.method.clone(), url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, api_key)
            .header(API_NONCE_HEADER, request.nonce.to_string())
            .header(API_SIGNATURE_HEADER, request.signature);
        if request.method != Method::GET {
            builder = builder.body(request.body);
        }

        let response = builder
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "Shrimpy request failed"))?;

        let status = response.status();
        debug!(status = status.as_u16(), "received Shrimpy response");

        if status != expected_status {
            let body = response.text().await.unwrap_or_else(|e| {
                warn!(error = %e, "unable to read Shrimpy error body");
                String::new()
            });
            warn!(
                status = status.as_u16(),
                expected = expected_status.as_u16(),
                body = %body,
                "unexpected Shrimpy response status"
            );
            return Err(ShrimpyError::UnexpectedStatus { status, body });
        }

        Ok(response.text().await?)
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, ShrimpyError> {
        let raw = format!("{}{}", self.base_url, endpoint);
        Url::parse(&raw)
            .map_err(|e| ShrimpyError::Configuration(format!("invalid request URL {raw:?}: {e}")))
    }

    /// Make a signed GET request and decode the body.
    pub(crate) async fn signed_get<T>(
        &self,
        operation: &'static str,
        endpoint: &str,
    ) -> Result<T, ShrimpyError>
    where
        T: DeserializeOwned,
    {
        let body = self.execute(Method::GET, endpoint, None, StatusCode::OK).await?;
        decode(operation, body)
    }

    /// Make a signed POST request answered by a `{"success": bool}` acknowledgement.
    pub(crate) async fn signed_post_ack(
        &self,
        operation: &'static str,
        endpoint: &str,
        body: Option<String>,
    ) -> Result<(), ShrimpyError> {
        let body = self.execute(Method::POST, endpoint, body, StatusCode::OK).await?;
        let ack: Acknowledgement = decode(operation, body)?;
        if !ack.success {
            warn!(operation, "Shrimpy rejected the operation");
            return Err(ShrimpyError::OperationRejected { operation });
        }
        debug!(operation, "Shrimpy acknowledged the operation");
        Ok(())
    }
}

impl std::fmt::Debug for ShrimpyRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShrimpyRestClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("log_signature_material", &self.log_signature_material)
            .finish()
    }
}

/// Decode a response body, classifying failures as [`ShrimpyError::MalformedResponse`].
pub(crate) fn decode<T>(operation: &'static str, body: String) -> Result<T, ShrimpyError>
where
    T: DeserializeOwned,
{
    match serde_json::from_str(&body) {
        Ok(value) => {
            debug!(operation, "decoded Shrimpy response");
            Ok(value)
        }
        Err(source) => {
            warn!(operation, error = %source, body = %body, "unable to parse Shrimpy response");
            Err(ShrimpyError::MalformedResponse { source, body })
        }
    }
}

/// Response body of mutating endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Acknowledgement {
    /// Whether Shrimpy accepted the request
    pub success: bool,
}

/// Builder for [`ShrimpyRestClient`].
pub struct ShrimpyRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    log_signature_material: bool,
}

impl ShrimpyRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: SHRIMPY_BASE_URL.to_string(),
            credentials: None,
            nonce_provider: None,
            user_agent: None,
            timeout: None,
            log_signature_material: false,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider. Required.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Bound each request, send plus body read, by `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Log prehash and signature at debug level. Off by default.
    pub fn log_signature_material(mut self, enabled: bool) -> Self {
        self.log_signature_material = enabled;
        self
    }

    /// Build the client.
    ///
    /// Fails with [`ShrimpyError::Configuration`] when credentials are
    /// missing or empty, or the base URL is not an HTTP(S) URL.
    pub fn build(self) -> Result<ShrimpyRestClient, ShrimpyError> {
        let credentials = self.credentials.ok_or_else(|| {
            ShrimpyError::Configuration("API credentials are required".to_string())
        })?;
        credentials.get_credentials().validate()?;
        parse_base_url(&self.base_url)?;

        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("shrimpy-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("shrimpy-api-client"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ShrimpyError::Configuration(format!("failed to build HTTP client: {e}")))?;

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(UnixSecondsNonce::new()));

        Ok(ShrimpyRestClient {
            http_client: client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            credentials,
            nonce_provider,
            timeout: self.timeout,
            log_signature_material: self.log_signature_material,
        })
    }
}

impl Default for ShrimpyRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;

    fn credentials() -> Arc<dyn CredentialsProvider> {
        Arc::new(StaticCredentials::new("key", "c2VjcmV0"))
    }

    #[test]
    fn test_build_requires_credentials() {
        let err = ShrimpyRestClient::builder().build().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_build_rejects_empty_key() {
        let err = ShrimpyRestClient::builder()
            .credentials(Arc::new(StaticCredentials::new("", "c2VjcmV0")))
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_build_rejects_invalid_base_url() {
        let err = ShrimpyRestClient::builder()
            .base_url("")
            .credentials(credentials())
            .build()
            .unwrap_err();
        assert!(matches!(err, ShrimpyError::Configuration(_)));
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let client = ShrimpyRestClient::builder()
            .base_url("http://localhost:8080/api/")
            .credentials(credentials())
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");

        let url = client.endpoint_url("/v1/accounts").unwrap();
        assert_eq!(url.path(), "/api/v1/accounts");
    }

    #[test]
    fn test_decode_classifies_shape_mismatch() {
        let err = decode::<Vec<Acknowledgement>>("test", r#"{"unexpected":"shape"}"#.to_string())
            .unwrap_err();
        assert!(err.is_malformed());

        let ack: Acknowledgement = decode("test", r#"{"success":false}"#.to_string()).unwrap();
        assert!(!ack.success);
    }

    #[test]
    fn test_from_config() {
        let config = ClientConfig::new("https://dev-api.shrimpy.io", "key", "c2VjcmV0")
            .with_timeout(Duration::from_secs(3));
        let client = ShrimpyRestClient::from_config(&config).unwrap();
        assert_eq!(client.timeout, Some(Duration::from_secs(3)));
        assert!(!client.log_signature_material);
    }
}
