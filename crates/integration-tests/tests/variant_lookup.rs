//! Integration tests for single-variant lookups.

#![allow(clippy::unwrap_used)]

use inventory_proxy_integration_tests::{
    TestProxy, after, connection, level, operation, posted, variant, variant_response,
    variant_with_sku,
};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, Request};

const VARIANT_111: &str = "gid://shopify/ProductVariant/111";

#[tokio::test]
async fn test_variant_at_location() {
    let proxy = TestProxy::start().await;
    Mock::given(method("POST"))
        .and(path(inventory_proxy_integration_tests::GRAPHQL_PATH))
        .and(header(
            "X-Shopify-Access-Token",
            inventory_proxy_integration_tests::TEST_TOKEN,
        ))
        .and(operation("VariantInventoryLevels"))
        .respond_with(variant_response(Some(variant_with_sku(
            VARIANT_111,
            "Small",
            "TEE-S",
            connection(
                vec![
                    level(3, "Overflow", Some(40)),
                    level(5, "Main Warehouse", Some(12)),
                ],
                None,
            ),
        ))))
        .expect(1)
        .mount(&proxy.shopify)
        .await;

    let (status, body) = proxy.lookup("variant_id=111&location_id=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "variantId": VARIANT_111,
            "variantTitle": "Small",
            "sku": "TEE-S",
            "inventoryLevelId": "gid://shopify/InventoryLevel/5",
            "locationId": "gid://shopify/Location/5",
            "locationName": "Main Warehouse",
            "availableQuantity": 12
        })
    );
}

#[tokio::test]
async fn test_identifiers_are_bound_as_variables() {
    let proxy = TestProxy::start().await;
    Mock::given(method("POST"))
        .respond_with(|request: &Request| {
            let query = posted(request);
            assert_eq!(query.variables["id"], VARIANT_111);
            assert!(!query.query.contains("111"));
            variant_response(Some(variant(
                VARIANT_111,
                "Small",
                connection(vec![level(5, "Main", Some(1))], None),
            )))
        })
        .expect(1)
        .mount(&proxy.shopify)
        .await;

    let (status, _) = proxy
        .lookup("variant_id=gid://shopify/ProductVariant/111&location_id=gid://shopify/Location/5")
        .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_no_record_at_location_is_404() {
    let proxy = TestProxy::start().await;
    Mock::given(method("POST"))
        .respond_with(variant_response(Some(variant(
            VARIANT_111,
            "Small",
            connection(vec![level(9, "Remote", Some(4))], None),
        ))))
        .mount(&proxy.shopify)
        .await;

    let (status, body) = proxy.lookup("variant_id=111&location_id=5").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("gid://shopify/Location/5"));
}

#[tokio::test]
async fn test_unknown_variant_is_404() {
    let proxy = TestProxy::start().await;
    Mock::given(method("POST"))
        .respond_with(variant_response(None))
        .mount(&proxy.shopify)
        .await;

    let (status, body) = proxy.lookup("variant_id=999&location_id=5").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_location_prefix_does_not_match() {
    let proxy = TestProxy::start().await;
    Mock::given(method("POST"))
        .respond_with(variant_response(Some(variant(
            VARIANT_111,
            "Small",
            connection(vec![level(55, "Annex", Some(7))], None),
        ))))
        .mount(&proxy.shopify)
        .await;

    let (status, _) = proxy.lookup("variant_id=111&location_id=5").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_absent_quantity_is_zero() {
    let proxy = TestProxy::start().await;
    Mock::given(method("POST"))
        .respond_with(variant_response(Some(variant(
            VARIANT_111,
            "Small",
            connection(vec![level(5, "Main Warehouse", None)], None),
        ))))
        .mount(&proxy.shopify)
        .await;

    let (status, body) = proxy.lookup("variant_id=111&location_id=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["availableQuantity"], 0);
}

#[tokio::test]
async fn test_location_on_later_level_page() {
    let proxy = TestProxy::start().await;
    Mock::given(method("POST"))
        .and(after(None))
        .respond_with(variant_response(Some(variant(
            VARIANT_111,
            "Small",
            connection(vec![level(1, "North", Some(2))], Some("l1")),
        ))))
        .expect(1)
        .mount(&proxy.shopify)
        .await;
    Mock::given(method("POST"))
        .and(after(Some("l1")))
        .respond_with(variant_response(Some(variant(
            VARIANT_111,
            "Small",
            connection(vec![level(5, "Main Warehouse", Some(12))], None),
        ))))
        .expect(1)
        .mount(&proxy.shopify)
        .await;

    let (status, body) = proxy.lookup("variant_id=111&location_id=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["availableQuantity"], 12);
    assert_eq!(body["locationName"], "Main Warehouse");
}
