//! HTTP-level tests for the relay endpoints.
//!
//! The router is driven in-process with mock models; no network access is needed.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sahayak_service::config::{allowed_origin, SahayakConfig};
use sahayak_service::services::providers::mock::MockModel;
use sahayak_service::services::AiClient;
use sahayak_service::startup::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

const BOUNDARY: &str = "sahayak-test-boundary";

fn app_with(ai: AiClient) -> Router {
    build_router(AppState::new(SahayakConfig::for_tests(), ai)).expect("Failed to build router")
}

fn mock_client(vision: Arc<MockModel>, text: Arc<MockModel>) -> AiClient {
    AiClient::from_models(vision, text)
}

fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/extract-text-from-image")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn generate_request(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/generate-content-from-text")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn content_body(topic: &str) -> Value {
    json!({
        "language": "English",
        "grade_level": "Grade 3",
        "subject": "Mathematics",
        "extracted_text": topic,
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

#[tokio::test]
async fn extract_text_returns_model_output() {
    let vision = Arc::new(MockModel::new("vision").with_reply("2 + 2 = 4"));
    let text = Arc::new(MockModel::new("text"));
    let app = app_with(mock_client(vision.clone(), text.clone()));

    let response = app
        .oneshot(upload_request(multipart_body(
            "file",
            "board.jpg",
            "image/jpeg",
            b"\xff\xd8\xff\xe0fake-jpeg",
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["extracted_text"], "2 + 2 = 4");
    assert_eq!(vision.calls(), 1);
    assert_eq!(text.calls(), 0);
}

#[tokio::test]
async fn extract_text_forwards_declared_content_type() {
    let vision = Arc::new(MockModel::new("vision"));
    let app = app_with(mock_client(vision, Arc::new(MockModel::new("text"))));

    let response = app
        .oneshot(upload_request(multipart_body(
            "file",
            "notes.txt",
            "text/plain",
            b"not an image",
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let extracted = body["extracted_text"].as_str().unwrap();
    assert!(extracted.contains("[text/plain 12 bytes]"));
}

#[tokio::test]
async fn extract_text_without_file_field_is_rejected() {
    let vision = Arc::new(MockModel::new("vision"));
    let app = app_with(mock_client(vision.clone(), Arc::new(MockModel::new("text"))));

    let response = app
        .oneshot(upload_request(multipart_body(
            "image",
            "board.png",
            "image/png",
            b"png",
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Field required: file");
    assert_eq!(vision.calls(), 0);
}

#[tokio::test]
async fn extract_text_over_body_limit_is_413() {
    let vision = Arc::new(MockModel::new("vision"));
    let mut config = SahayakConfig::for_tests();
    config.max_upload_bytes = 1024;
    let app = build_router(AppState::new(
        config,
        mock_client(vision.clone(), Arc::new(MockModel::new("text"))),
    ))
    .expect("Failed to build router");

    let response = app
        .oneshot(upload_request(multipart_body(
            "file",
            "large.png",
            "image/png",
            &vec![0u8; 4096],
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = body_json(response).await;
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Upload exceeds the size limit"));
    assert_eq!(vision.calls(), 0);
}

#[tokio::test]
async fn extract_text_upstream_failure_is_500_with_message() {
    let vision = Arc::new(MockModel::new("vision").failing_on("OCR expert"));
    let app = app_with(mock_client(vision, Arc::new(MockModel::new("text"))));

    let response = app
        .oneshot(upload_request(multipart_body(
            "file",
            "board.png",
            "image/png",
            b"png",
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "mock failure on 'OCR expert'");
}

#[tokio::test]
async fn generate_content_returns_three_documents_in_order() {
    let text = Arc::new(
        MockModel::new("text")
            .with_delay("lesson plan", Duration::from_millis(80))
            .with_delay("worksheet", Duration::from_millis(40)),
    );
    let app = app_with(mock_client(Arc::new(MockModel::new("vision")), text.clone()));

    let response = app
        .oneshot(generate_request(content_body("Multiplication tables")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["lesson_plan"]
        .as_str()
        .unwrap()
        .contains("Generate a lesson plan for a Grade 3 Mathematics class in English"));
    assert!(body["worksheet"]
        .as_str()
        .unwrap()
        .contains("Generate a worksheet"));
    assert!(body["quiz"]
        .as_str()
        .unwrap()
        .contains("Topic: 'Multiplication tables'"));
    assert_eq!(text.calls(), 3);
}

#[tokio::test]
async fn generate_content_partial_failure_returns_no_documents() {
    let text = Arc::new(MockModel::new("text").failing_on("5-question quiz"));
    let app = app_with(mock_client(Arc::new(MockModel::new("vision")), text));

    let response = app
        .oneshot(generate_request(content_body("Shapes")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "detail": "mock failure on '5-question quiz'" }));
}

#[tokio::test]
async fn generate_content_with_missing_field_is_rejected() {
    let text = Arc::new(MockModel::new("text"));
    let app = app_with(mock_client(Arc::new(MockModel::new("vision")), text.clone()));

    let response = app
        .oneshot(generate_request(json!({
            "language": "English",
            "grade_level": "Grade 3",
            "subject": "Mathematics",
        })))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(text.calls(), 0);
}

#[tokio::test]
async fn unconfigured_ai_fails_both_endpoints_with_500() {
    let app = app_with(AiClient::unconfigured());

    let response = app
        .clone()
        .oneshot(upload_request(multipart_body(
            "file",
            "board.png",
            "image/png",
            b"png",
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["detail"], "AI Model not configured.");

    let response = app
        .oneshot(generate_request(content_body("Fractions")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["detail"], "AI Model not configured.");
}

#[tokio::test]
async fn health_reports_ai_configuration() {
    let app = app_with(AiClient::unconfigured());

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "sahayak-service");
    assert_eq!(body["ai_configured"], false);

    let response = app
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn ready_when_models_are_configured() {
    let app = app_with(mock_client(
        Arc::new(MockModel::new("vision")),
        Arc::new(MockModel::new("text")),
    ));

    let response = app
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin_with_credentials() {
    let app = app_with(AiClient::unconfigured());
    let origin = allowed_origin(None);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/v1/generate-content-from-text")
                .header(header::ORIGIN, &origin)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], origin.as_str());
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "content-type");
}

#[tokio::test]
async fn cors_ignores_other_origins() {
    let app = app_with(AiClient::unconfigured());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://evil.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn cors_preflight_from_other_origin_is_not_allowed() {
    let app = app_with(AiClient::unconfigured());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/v1/generate-content-from-text")
                .header(header::ORIGIN, "https://evil.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = app_with(AiClient::unconfigured());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}
