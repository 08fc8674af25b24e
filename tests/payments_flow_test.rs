mod common;

use bankbridge::application::payments::PaymentsGateway;
use bankbridge::config::PaymentsConfig;
use bankbridge::error::{GatewayError, RemoteError};
use bankbridge::infrastructure::http_payments::{HAL_JSON, HttpPaymentsTransport};
use common::{TOKEN_BODY, authorization_links, sample_customer, sample_customer_json};
use mockito::Matcher;
use serde_json::json;

async fn gateway_for(server: &mockito::Server) -> PaymentsGateway {
    let config = PaymentsConfig::new("sandbox", "key", "secret")
        .unwrap()
        .with_base_url(server.url());
    PaymentsGateway::new(Box::new(HttpPaymentsTransport::new(config).unwrap()))
}

async fn mock_token(server: &mut mockito::Server) -> mockito::Mock {
    server
        .mock("POST", "/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TOKEN_BODY)
        .create_async()
        .await
}

#[tokio::test]
async fn test_add_funding_source_with_authorization_over_http() {
    let mut server = mockito::Server::new_async().await;
    let _token = mock_token(&mut server).await;
    let authorization = server
        .mock("POST", "/on-demand-authorizations")
        .with_status(200)
        .with_header("content-type", HAL_JSON)
        .with_body(
            json!({
                "_links": authorization_links(),
                "bodyText": "I agree that future payments to Company ABC inc. will be processed by the Dwolla payment system.",
                "buttonText": "Agree & Continue"
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let funding_sources = server
        .mock("POST", "/customers/c-1/funding-sources")
        .match_body(Matcher::Json(json!({
            "name": "Chase Checking",
            "plaidToken": "processor-sandbox-123",
            "_links": authorization_links()
        })))
        .with_status(201)
        .with_header(
            "location",
            "https://api-sandbox.dwolla.com/funding-sources/375c6781-2a17-476c-84f7-db7d2f6ffb31",
        )
        .expect(1)
        .create_async()
        .await;

    let location = gateway_for(&server)
        .await
        .add_funding_source_with_authorization("c-1", "processor-sandbox-123", "Chase Checking")
        .await
        .unwrap();

    assert_eq!(
        location,
        "https://api-sandbox.dwolla.com/funding-sources/375c6781-2a17-476c-84f7-db7d2f6ffb31"
    );
    authorization.assert_async().await;
    funding_sources.assert_async().await;
}

#[tokio::test]
async fn test_create_customer_over_http() {
    let mut server = mockito::Server::new_async().await;
    let _token = mock_token(&mut server).await;
    let customers = server
        .mock("POST", "/customers")
        .match_body(Matcher::Json(sample_customer_json("NY")))
        .with_status(201)
        .with_header(
            "location",
            "https://api-sandbox.dwolla.com/customers/FC451A7A-AE30-4404-AB95-E3553FCD733F",
        )
        .create_async()
        .await;

    let location = gateway_for(&server)
        .await
        .create_customer(&sample_customer("NY"))
        .await
        .unwrap();

    assert_eq!(
        location,
        "https://api-sandbox.dwolla.com/customers/FC451A7A-AE30-4404-AB95-E3553FCD733F"
    );
    customers.assert_async().await;
}

#[tokio::test]
async fn test_invalid_state_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let token = server
        .mock("POST", "/token")
        .expect(0)
        .create_async()
        .await;
    let customers = server
        .mock("POST", "/customers")
        .expect(0)
        .create_async()
        .await;

    let err = gateway_for(&server)
        .await
        .create_customer(&sample_customer("Ny"))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::ValidationError(_)));
    token.assert_async().await;
    customers.assert_async().await;
}

#[tokio::test]
async fn test_funding_source_rejection_after_authorization() {
    let mut server = mockito::Server::new_async().await;
    let _token = mock_token(&mut server).await;
    let _authorization = server
        .mock("POST", "/on-demand-authorizations")
        .with_status(200)
        .with_body(json!({ "_links": authorization_links() }).to_string())
        .create_async()
        .await;
    let _funding_sources = server
        .mock("POST", "/customers/c-1/funding-sources")
        .with_status(400)
        .with_body(
            json!({
                "code": "ValidationError",
                "message": "Validation error(s) present. See embedded errors list for more details.",
                "_embedded": { "errors": [
                    { "code": "Invalid", "message": "Invalid processor token.", "path": "/plaidToken" }
                ] }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let err = gateway_for(&server)
        .await
        .add_funding_source_with_authorization("c-1", "bad-token", "Chase")
        .await
        .unwrap_err();

    let remote = err.as_remote().unwrap();
    assert!(matches!(remote, RemoteError::Rejected { status: 400, .. }));
    assert_eq!(
        remote.embedded_errors().unwrap()[0]["path"],
        json!("/plaidToken")
    );
}
