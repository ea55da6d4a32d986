//! HTTP-level tests against a local mock of the Pwinty API

use pwinty_client::{
    ClientConfig, ForbiddenAction, OrderFields, OrderStatus, PhotoRequest, PwintyClient,
    PwintyError,
};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MERCHANT_ID: &str = "123456";
const API_KEY: &str = "7890123";

async fn setup() -> (MockServer, PwintyClient) {
    let server = MockServer::start().await;
    let config =
        ClientConfig::new(MERCHANT_ID, API_KEY).with_base_url(format!("{}/v2", server.uri()));
    let client = PwintyClient::from_config(config).expect("client creation");
    (server, client)
}

#[tokio::test]
async fn test_get_orders_sends_auth_headers() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/Orders"))
        .and(header("X-Pwinty-REST-API-Key", API_KEY))
        .and(header("X-Pwinty-MerchantId", MERCHANT_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let orders = client.get_orders().await.unwrap();
    assert_eq!(orders, json!([{"id": 1}]));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_create_order_sends_form_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/Orders"))
        .and(body_string_contains("recipientName=Ada+Lovelace"))
        .and(body_string_contains("countryCode=GB"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 77})))
        .expect(1)
        .mount(&server)
        .await;

    let fields = OrderFields::new()
        .recipient_name("Ada Lovelace")
        .country_code("GB");
    let order = client.create_order(&fields).await.unwrap();
    assert_eq!(order["id"], 77);

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(content_type, "application/x-www-form-urlencoded");
}

#[tokio::test]
async fn test_update_order_status_conflict() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/Orders/77/Status"))
        .and(body_string_contains("status=Submitted"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client
        .update_order_status(77, OrderStatus::Submitted)
        .await
        .unwrap_err();
    assert!(matches!(err, PwintyError::Forbidden(ForbiddenAction::ChangeStatus)));
    assert_eq!(err.to_string(), "Can not move to specified status from current");
}

#[tokio::test]
async fn test_add_photo_uploads_multipart_file() {
    let (server, client) = setup().await;

    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("photo.jpg");
    std::fs::write(&image_path, b"jpeg bytes").unwrap();

    Mock::given(method("POST"))
        .and(path("/v2/Orders/77/Photos"))
        .and(body_string_contains("name=\"file\"; filename=\"photo.jpg\""))
        .and(body_string_contains("jpeg bytes"))
        .and(body_string_contains("name=\"copies\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
        .expect(1)
        .mount(&server)
        .await;

    let photo = PhotoRequest::new("4x6").file(&image_path);
    let created = client.add_photo(77, &photo).await.unwrap();
    assert_eq!(created["id"], 5);

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
}

#[tokio::test]
async fn test_add_photo_by_url_uses_defaults() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/Orders/77/Photos"))
        .and(body_string_contains("type=4x6"))
        .and(body_string_contains("copies=1"))
        .and(body_string_contains("sizing=Crop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 6})))
        .expect(1)
        .mount(&server)
        .await;

    let photo = PhotoRequest::new("4x6").url("https://example.com/cat.jpg");
    client.add_photo(77, &photo).await.unwrap();
}

#[tokio::test]
async fn test_delete_photo_forbidden() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/Orders/77/Photos/5"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client.delete_photo(77, 5).await.unwrap_err();
    assert!(matches!(err, PwintyError::Forbidden(ForbiddenAction::RemovePhoto)));
}

#[tokio::test]
async fn test_status_errors_over_http() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/Country"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/Catalogue/GB/Pro"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"Error": {"Message": "Catalogue unavailable"}})),
        )
        .mount(&server)
        .await;

    let err = client.get_countries().await.unwrap_err();
    assert!(matches!(err, PwintyError::AuthenticationFailed));

    let err = client.get_catalogue("GB", "Pro").await.unwrap_err();
    assert_eq!(err.to_string(), "Catalogue unavailable");

    // Nothing mounted for this path: the mock server answers 404
    let err = client.get_submission_status(404).await.unwrap_err();
    assert!(matches!(err, PwintyError::NotFound));
}
