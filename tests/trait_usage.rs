use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shrimpy_api_client::auth::StaticCredentials;
use shrimpy_api_client::rest::ShrimpyClient;
use shrimpy_api_client::{ShrimpyError, ShrimpyRestClient};

/// Rebalances every account that is not already rebalancing and reports how
/// many Shrimpy declined.
async fn rebalance_idle_accounts<C: ShrimpyClient>(client: &C) -> Result<usize, ShrimpyError> {
    let mut rejected = 0;
    for account in client.get_accounts().await? {
        if account.is_rebalancing {
            continue;
        }
        match client.rebalance_account(account.id).await {
            Ok(()) => {}
            Err(e) if e.is_rejected() => rejected += 1,
            Err(e) => return Err(e),
        }
    }
    Ok(rejected)
}

#[tokio::test]
async fn test_generic_caller_over_rest_client() {
    let server = MockServer::start().await;
    let accounts = serde_json::json!([
        { "id": 1, "exchange": "binance", "isRebalancing": false },
        { "id": 2, "exchange": "kucoin", "isRebalancing": true },
        { "id": 3, "exchange": "bittrex", "isRebalancing": false }
    ]);

    Mock::given(method("GET"))
        .and(path("/v1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounts))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts/1/rebalance"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts/2/rebalance"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true}"#))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts/3/rebalance"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":false}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = ShrimpyRestClient::builder()
        .base_url(server.uri())
        .credentials(Arc::new(StaticCredentials::new("test_key", "c2VjcmV0")))
        .build()
        .unwrap();

    let rejected = rebalance_idle_accounts(&client).await.unwrap();
    assert_eq!(rejected, 1);
}

#[tokio::test]
async fn test_generic_caller_propagates_transport_errors() {
    let client = ShrimpyRestClient::builder()
        .base_url("http://127.0.0.1:1")
        .credentials(Arc::new(StaticCredentials::new("test_key", "c2VjcmV0")))
        .build()
        .unwrap();

    let err = rebalance_idle_accounts(&client).await.unwrap_err();
    assert!(err.is_transport());
}
