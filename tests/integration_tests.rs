//! Integration tests for the anet-accept library

use anet_accept::{
    AcceptPayments, ButtonRequest, ChargeRequest, GatewayClient, MerchantCredentials, OpaqueData,
};
use mockito::Server;
use rust_decimal_macros::dec;
use serde_json::json;

fn stub_facade(endpoint: &str) -> AcceptPayments {
    let credentials = MerchantCredentials::sandbox("stub-login", "stub-key");
    AcceptPayments::with_gateway(GatewayClient::new(credentials).with_endpoint(endpoint))
}

fn merchant_details_ok(public_client_key: &str) -> String {
    json!({
        "merchantName": "Stub Merchant",
        "gatewayId": "12345",
        "publicClientKey": public_client_key,
        "messages": {
            "resultCode": "Ok",
            "message": [{"code": "I00001", "text": "Successful."}]
        }
    })
    .to_string()
}

fn transaction_ok(trans_id: &str) -> String {
    json!({
        "transactionResponse": {
            "responseCode": "1",
            "authCode": "ABC123",
            "avsResultCode": "Y",
            "transId": trans_id,
            "accountType": "Visa",
            "messages": [
                {"code": "1", "description": "This transaction has been approved."}
            ]
        },
        "messages": {
            "resultCode": "Ok",
            "message": [{"code": "I00001", "text": "Successful."}]
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_render_button_embeds_key_login_and_callback() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(merchant_details_ok("pk-stub-0123456789"))
        .create_async()
        .await;

    let payments = stub_facade(&server.url());
    let request = ButtonRequest::new("https://shop.example/payment/callback")
        .with_button_label("Buy the thing")
        .with_style_override("color: rebeccapurple;");

    let markup = payments.render_button(&request).await.unwrap();
    mock.assert_async().await;

    assert!(markup.contains("https://shop.example/payment/callback"));
    assert!(markup.contains(r#"data-apiLoginID="stub-login""#));
    assert!(markup.contains(r#"data-clientKey="pk-stub-0123456789""#));
    assert!(markup.contains("Buy the thing"));
    assert!(markup.contains("color: rebeccapurple;"));
    assert!(markup.contains("https://jstest.authorize.net/v3/AcceptUI.js"));
    assert!(!markup.contains("{{"), "unresolved placeholder in: {}", markup);
}

#[tokio::test]
async fn test_render_button_refetches_key_per_render() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(merchant_details_ok("pk-stub"))
        .expect(2)
        .create_async()
        .await;

    let payments = stub_facade(&server.url());
    let request = ButtonRequest::new("https://shop.example/cb");
    payments.render_button(&request).await.unwrap();
    payments.render_button(&request).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_render_button_label_is_not_cross_substituted() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(merchant_details_ok("pk-stub"))
        .create_async()
        .await;

    let payments = stub_facade(&server.url());
    // A label that spells a placeholder must render literally, not as
    // the login id.
    let request =
        ButtonRequest::new("https://shop.example/cb").with_button_label("{{apiLoginId}}");

    let markup = payments.render_button(&request).await.unwrap();
    assert!(markup.contains(">{{apiLoginId}}"));
    assert!(markup.contains(r#"data-apiLoginID="stub-login""#));
}

#[tokio::test]
async fn test_charge_success_returns_transaction_id() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(transaction_ok("2149186848"))
        .create_async()
        .await;

    let payments = stub_facade(&server.url());
    let request = ChargeRequest::new(
        dec!(100.00),
        "customer-42",
        OpaqueData::new("d1", "v1"),
    );

    let result = payments.charge(&request).await.unwrap();
    mock.assert_async().await;

    assert!(result.success);
    assert_eq!(result.transaction_id, "2149186848");
    assert_eq!(result.auth_code.as_deref(), Some("ABC123"));
    assert_eq!(result.response_code, "1");
    assert!(!result.correlation_id.is_empty());
    assert_eq!(result.raw["transactionResponse"]["transId"], "2149186848");
}

#[tokio::test]
async fn test_sequential_charges_use_distinct_correlation_ids() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(transaction_ok("111"))
        .expect(2)
        .create_async()
        .await;

    let payments = stub_facade(&server.url());
    let request = ChargeRequest::new(
        dec!(25.00),
        "customer-42",
        OpaqueData::new("d1", "v1"),
    );

    let first = payments.charge(&request).await.unwrap();
    let second = payments.charge(&request).await.unwrap();
    mock.assert_async().await;

    // Identical inputs are not deduplicated; each submission carries
    // its own correlation id.
    assert_ne!(first.correlation_id, second.correlation_id);
}

#[tokio::test]
async fn test_charge_tolerates_bom_in_response_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!("\u{feff}{}", transaction_ok("777")))
        .create_async()
        .await;

    let payments = stub_facade(&server.url());
    let request = ChargeRequest::new(dec!(5.00), "c", OpaqueData::new("d1", "v1"));

    let result = payments.charge(&request).await.unwrap();
    assert_eq!(result.transaction_id, "777");
}
