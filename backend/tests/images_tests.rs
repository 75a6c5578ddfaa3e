mod common;

use axum::{body::Body, http::Request};
use common::*;
use http::StatusCode;
use tower::ServiceExt;

#[tokio::test]
async fn test_list_images_empty() {
    let setup = TestSetup::new();

    let response = setup
        .send_get_request("/images")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_list_images_returns_every_upload() {
    let setup = TestSetup::new();

    let filenames = ["one.png", "two.jpg", "three.gif"];
    for filename in filenames {
        let response = setup
            .upload(filename, "image/png", b"bytes")
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = setup
        .send_get_request("/images")
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let images = body.as_array().unwrap();
    assert_eq!(images.len(), filenames.len());

    for image in images {
        let fields = image.as_object().unwrap();
        assert_eq!(fields.len(), 3);
        assert!(fields["id"].is_string());
        assert!(filenames.contains(&fields["filename"].as_str().unwrap()));
        assert!(fields["url"]
            .as_str()
            .unwrap()
            .starts_with(&expected_url_prefix()));
    }
}

#[tokio::test]
async fn test_health() {
    let setup = TestSetup::new();

    let response = setup
        .send_get_request("/health")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "image-api");
    assert_eq!(body["semver"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_openapi_schema_lists_routes() {
    let setup = TestSetup::new();

    let response = setup
        .send_get_request("/openapi.json")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["info"]["title"], "Image Upload API");
    assert_eq!(body["info"]["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["paths"]["/upload"]["post"].is_object());
    assert!(body["paths"]["/images"]["get"].is_object());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let setup = TestSetup::new();

    let request = Request::builder()
        .uri("/images")
        .method("GET")
        .header("Origin", "https://example.com")
        .body(Body::empty())
        .unwrap();

    let response = setup.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "https://example.com"
    );
    assert_eq!(response.headers()["access-control-allow-credentials"], "true");
}
