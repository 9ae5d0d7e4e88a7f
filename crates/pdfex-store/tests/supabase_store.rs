//! Integration tests for `SupabaseStore` using wiremock HTTP mocks.

use pdfex_store::{PageQuery, ProductStore, RecordRange, StoreError, SupabaseStore};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_store(base_url: &str) -> SupabaseStore {
    SupabaseStore::new(base_url, "anon-key", 5, "pdfex-test/0.1")
        .expect("store construction should not fail")
}

fn page(index: u64) -> PageQuery {
    PageQuery::products("products", RecordRange::for_page(index, 48))
}

#[tokio::test]
async fn fetch_page_returns_parsed_rows() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "product_code": "AB-1001",
            "name": "Storage Box",
            "subtitle": "Large",
            "category": "Storage",
            "pack_quantity": 4,
            "price": 19.5,
            "currency": "EUR",
            "spec_features": ["Stackable", "BPA free"],
            "dimensions": { "width": { "value": 400, "unit": "mm" } },
            "primary_image_url": "https://cdn.example.com/AB-1001/front.jpg",
            "image_urls": ["https://cdn.example.com/AB-1001/front.jpg"]
        },
        {
            "product_code": "AB-1002",
            "name": "Lid",
            "image_urls": "https://cdn.example.com/AB-1002/lid.jpg",
            "spec_features": null
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("order", "product_code.asc"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "48"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let store = test_store(&server.uri());
    let rows = store.fetch_page(&page(0)).await.expect("should parse rows");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].product_code, "AB-1001");
    assert_eq!(rows[0].name.as_deref(), Some("Storage Box"));
    assert_eq!(rows[0].pack_quantity, Some(4));
    assert_eq!(rows[1].product_code, "AB-1002");
}

#[tokio::test]
async fn fetch_page_requests_offset_for_later_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("offset", "96"))
        .and(query_param("limit", "48"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = test_store(&server.uri());
    let rows = store.fetch_page(&page(2)).await.expect("empty page is ok");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn fetch_page_surfaces_postgrest_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "code": "PGRST301",
            "details": null,
            "hint": null,
            "message": "JWT expired"
        })))
        .mount(&server)
        .await;

    let store = test_store(&server.uri());
    let err = store.fetch_page(&page(0)).await.unwrap_err();

    assert!(
        matches!(err, StoreError::Query { status: 401, .. }),
        "expected Query error, got: {err:?}"
    );
    assert_eq!(err.to_string(), "JWT expired");
}

#[tokio::test]
async fn fetch_page_reports_bare_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let store = test_store(&server.uri());
    let err = store.fetch_page(&page(0)).await.unwrap_err();

    assert!(
        matches!(err, StoreError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus, got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_page_rejects_non_array_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "product_code": "AB-1001"
        })))
        .mount(&server)
        .await;

    let store = test_store(&server.uri());
    let err = store.fetch_page(&page(0)).await.unwrap_err();

    assert!(
        matches!(err, StoreError::Deserialize { .. }),
        "expected Deserialize error, got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_page_tolerates_malformed_columns() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "product_code": "AB-2001",
                "price": "n/a",
                "pack_quantity": "a dozen",
                "dimensions": [1, 2, 3],
                "image_urls": 17
            }
        ])))
        .mount(&server)
        .await;

    let store = test_store(&server.uri());
    let rows = store
        .fetch_page(&page(0))
        .await
        .expect("malformed columns should not fail the page");

    assert_eq!(rows.len(), 1);
    assert!(rows[0].price.is_none());
    assert!(rows[0].pack_quantity.is_none());
    assert!(rows[0].dimensions.is_none());
}
