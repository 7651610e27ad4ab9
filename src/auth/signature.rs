//! HMAC-SHA256 signature generation for Shrimpy API authentication.
//!
//! Every Shrimpy request is signed as:
//! ```text
//! base64(HMAC-SHA256(base64_decode(api_secret), path + method + nonce + body))
//! ```
//!
//! The prehash has no delimiters and is hashed byte-for-byte; the result is
//! sent in the `SHRIMPY-API-SIGNATURE` header.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::Sha256;

use crate::auth::Credentials;
use crate::error::ShrimpyError;

type HmacSha256 = Hmac<Sha256>;

/// Build the string that gets signed.
pub fn prehash(path: &str, method: &str, nonce: u64, body: &str) -> String {
    format!("{path}{method}{nonce}{body}")
}

/// Sign a prehash string with a base64-encoded secret.
///
/// # Example
///
/// ```rust
/// use shrimpy_api_client::auth::sign;
///
/// // "c2VjcmV0" is base64 of "secret"
/// let signature = sign("c2VjcmV0", "/v1/accountsGET1700000000").unwrap();
/// assert_eq!(signature, "Wq4OJUtGFD5CKAlIkmXMkyvepzRX03lX5BuFiTI3JU8=");
/// ```
pub fn sign(secret_base64: &str, prehash: &str) -> Result<String, ShrimpyError> {
    let key = BASE64
        .decode(secret_base64)
        .map_err(ShrimpyError::InvalidSecretEncoding)?;

    let mut hmac = HmacSha256::new_from_slice(&key)
        .map_err(|e| ShrimpyError::Configuration(format!("Invalid HMAC key: {e}")))?;
    hmac.update(prehash.as_bytes());

    Ok(BASE64.encode(hmac.finalize().into_bytes()))
}

/// Sign a request for the Shrimpy API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `path` - The URL path (e.g., "/v1/accounts")
/// * `method` - The HTTP method name, upper-case (e.g., "GET")
/// * `nonce` - The nonce value for this request
/// * `body` - The exact request body, or an empty string
pub fn sign_request(
    credentials: &Credentials,
    path: &str,
    method: &str,
    nonce: u64,
    body: &str,
) -> Result<String, ShrimpyError> {
    sign(credentials.expose_secret(), &prehash(path, method, nonce, body))
}

/// A request whose method, path and body are fixed and signed.
///
/// Built once per physical request. Sending it twice would replay the nonce,
/// so a retried call must build a new one.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// HTTP method
    pub method: Method,
    /// URL path the signature covers
    pub path: String,
    /// Exact body bytes the signature covers (empty when there is no payload)
    pub body: String,
    /// Nonce sent in `SHRIMPY-API-NONCE`
    pub nonce: u64,
    /// Signature sent in `SHRIMPY-API-SIGNATURE`
    pub signature: String,
}

impl SignedRequest {
    /// Sign the given request components.
    pub fn new(
        credentials: &Credentials,
        method: Method,
        path: impl Into<String>,
        nonce: u64,
        body: impl Into<String>,
    ) -> Result<Self, ShrimpyError> {
        let path = path.into();
        let body = body.into();
        let signature = sign_request(credentials, &path, method.as_str(), nonce, &body)?;

        Ok(Self {
            method,
            path,
            body,
            nonce,
            signature,
        })
    }

    /// The prehash this request was signed over.
    pub fn prehash(&self) -> String {
        prehash(&self.path, self.method.as_str(), self.nonce, &self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "c2VjcmV0";

    #[test]
    fn test_prehash_layout() {
        assert_eq!(
            prehash("/v1/accounts", "GET", 1700000000, ""),
            "/v1/accountsGET1700000000"
        );
        assert_eq!(
            prehash("/v1/accounts/1/rebalance", "POST", 5, "{\"a\":1}"),
            "/v1/accounts/1/rebalancePOST5{\"a\":1}"
        );
    }

    #[test]
    fn test_fixed_vector() {
        let signature = sign(SECRET, "/v1/accountsGET1700000000").unwrap();
        assert_eq!(signature, "Wq4OJUtGFD5CKAlIkmXMkyvepzRX03lX5BuFiTI3JU8=");

        let credentials = Credentials::new("key", SECRET);
        let via_request = sign_request(&credentials, "/v1/accounts", "GET", 1700000000, "").unwrap();
        assert_eq!(via_request, signature);
    }

    #[test]
    fn test_fixed_vector_with_body() {
        let credentials = Credentials::new("key", SECRET);
        let request = SignedRequest::new(
            &credentials,
            Method::POST,
            "/v1/accounts/7/portfolios/3/update",
            1700000000,
            r#"{"name":"x"}"#,
        )
        .unwrap();

        assert_eq!(
            request.prehash(),
            r#"/v1/accounts/7/portfolios/3/updatePOST1700000000{"name":"x"}"#
        );
        assert_eq!(request.signature, "BAy8DERTwOOPBcDbPjX+S5PEBmvyFLNficTpW4RFZwo=");
    }

    #[test]
    fn test_signature_shape() {
        let signature = sign(SECRET, "anything").unwrap();
        assert!(BASE64.decode(&signature).is_ok());
        // HMAC-SHA256 produces 32 bytes, base64 encoded = 44 chars (with padding)
        assert_eq!(signature.len(), 44);
        assert!(signature.ends_with('='));
    }

    #[test]
    fn test_invalid_secret_encoding() {
        let err = sign("not-base64!", "/v1/accountsGET1").unwrap_err();
        assert!(matches!(err, ShrimpyError::InvalidSecretEncoding(_)));

        let credentials = Credentials::new("key", "not-base64!");
        let err = SignedRequest::new(&credentials, Method::GET, "/v1/accounts", 1, "").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_signature_deterministic() {
        for (path, method, nonce, body) in sample_inputs() {
            let a = sign(SECRET, &prehash(&path, &method, nonce, &body)).unwrap();
            let b = sign(SECRET, &prehash(&path, &method, nonce, &body)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_single_field_perturbation_changes_signature() {
        for (path, method, nonce, body) in sample_inputs() {
            let base = sign(SECRET, &prehash(&path, &method, nonce, &body)).unwrap();

            let other_path = format!("{path}x");
            let other_method = if method == "GET" { "POST" } else { "GET" };
            let mut other_body = body.clone().into_bytes();
            match other_body.last_mut() {
                Some(byte) => *byte ^= 0x01,
                None => other_body.push(b' '),
            }
            let other_body = String::from_utf8(other_body).unwrap();

            let perturbed = [
                prehash(&other_path, &method, nonce, &body),
                prehash(&path, other_method, nonce, &body),
                prehash(&path, &method, nonce + 1, &body),
                prehash(&path, &method, nonce, &other_body),
            ];
            for input in perturbed {
                assert_ne!(sign(SECRET, &input).unwrap(), base, "prehash {input:?}");
            }
        }
    }

    #[test]
    fn test_secret_changes_signature() {
        let input = prehash("/v1/accounts", "GET", 1, "");
        assert_ne!(
            sign(SECRET, &input).unwrap(),
            sign(&BASE64.encode("secret2"), &input).unwrap()
        );
    }

    /// Deterministic spread of request shapes, seeded by a small LCG.
    fn sample_inputs() -> Vec<(String, String, u64, String)> {
        let mut state: u64 = 0x5eed;
        let mut next = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            state >> 33
        };

        (0..64)
            .map(|i| {
                let account = next() % 10_000;
                let path = match i % 4 {
                    0 => "/v1/accounts".to_string(),
                    1 => format!("/v1/accounts/{account}/balance"),
                    2 => format!("/v1/accounts/{account}/rebalance"),
                    _ => format!("/v1/accounts/{account}/portfolios/{}/update", next() % 50),
                };
                let method = if i % 2 == 0 { "GET" } else { "POST" }.to_string();
                let nonce = 1_600_000_000 + next() % 100_000_000;
                let body = if i % 3 == 0 {
                    String::new()
                } else {
                    format!(r#"{{"name":"p{}","rebalancePeriod":{}}}"#, next(), next() % 48)
                };
                (path, method, nonce, body)
            })
            .collect()
    }
}
