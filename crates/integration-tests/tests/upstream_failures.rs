//! Integration tests for upstream failure handling.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use inventory_proxy_integration_tests::{TestProxy, connection, level, variant, variant_response};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_graphql_errors_are_500_with_details() {
    let proxy = TestProxy::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "productVariant": null },
            "errors": [{ "message": "Access denied for productVariant field." }]
        })))
        .mount(&proxy.shopify)
        .await;

    let (status, body) = proxy.lookup("variant_id=111&location_id=5").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["details"],
        json!(["Access denied for productVariant field."])
    );
}

#[tokio::test]
async fn test_unauthorized_is_500() {
    let proxy = TestProxy::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&proxy.shopify)
        .await;

    let (status, body) = proxy.lookup("product_id=222&location_id=5").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Unauthorized"));
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_server_error_is_retried_once() {
    let proxy = TestProxy::start_with(&[("PROXY_UPSTREAM_RETRIES", "1")]).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&proxy.shopify)
        .await;
    Mock::given(method("POST"))
        .respond_with(variant_response(Some(variant(
            "gid://shopify/ProductVariant/111",
            "Small",
            connection(vec![level(5, "Main", Some(2))], None),
        ))))
        .expect(1)
        .mount(&proxy.shopify)
        .await;

    let (status, body) = proxy.lookup("variant_id=111&location_id=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["availableQuantity"], 2);
}

#[tokio::test]
async fn test_lookup_timeout_is_500() {
    let proxy = TestProxy::start_with(&[("PROXY_RESOLVE_TIMEOUT_SECS", "1")]).await;
    Mock::given(method("POST"))
        .respond_with(
            variant_response(Some(variant(
                "gid://shopify/ProductVariant/111",
                "Small",
                connection(vec![level(5, "Main", Some(2))], None),
            )))
            .set_delay(Duration::from_secs(3)),
        )
        .mount(&proxy.shopify)
        .await;

    let (status, body) = proxy.lookup("variant_id=111&location_id=5").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("timed out"));
}
