//! Example: Authentication helpers and signing.
//!
//! Run with: cargo run --example sign_request

use reqwest::Method;
use shrimpy_api_client::auth::{
    Credentials, CredentialsProvider, EnvCredentials, NonceProvider, SignedRequest,
    StaticCredentials, UnixSecondsNonce, prehash, sign,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Static credentials (typically used in tests or explicit config).
    let static_creds = StaticCredentials::new("api_key", "c2VjcmV0");
    println!("Static key: {}", static_creds.get_credentials().api_key);

    // Environment credentials are convenient for local dev.
    match EnvCredentials::from_env() {
        Ok(env_creds) => println!("Loaded env credentials: {}", env_creds.get_credentials().api_key),
        Err(e) => println!("{e}"),
    }

    // Nonces are Unix seconds, bumped when two requests share a second.
    let nonces = UnixSecondsNonce::new();
    println!("Next nonces: {} {}", nonces.next_nonce(), nonces.next_nonce());

    // Raw signer over an explicit prehash.
    let input = prehash("/v1/accounts", "GET", 1700000000, "");
    println!("Prehash: {input}");
    println!("Signature: {}", sign("c2VjcmV0", &input)?);

    // A full signed request, as the client builds it.
    let credentials = Credentials::new("api_key", "c2VjcmV0");
    let request = SignedRequest::new(
        &credentials,
        Method::POST,
        "/v1/accounts/123/rebalance",
        nonces.next_nonce(),
        "",
    )?;
    println!("{} {} nonce={} signature={}", request.method, request.path, request.nonce, request.signature);

    Ok(())
}
