mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use base64::{engine::general_purpose, Engine as _};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_reports_rules() {
    let app = common::create_test_app();

    let (status, body) = common::get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "codesensei-api");
    assert_eq!(body["rules"]["max_level"], 10);
    assert_eq!(body["rules"]["pass_threshold_percent"], 50);
}

#[tokio::test]
async fn test_metrics_requires_basic_auth() {
    let app = common::create_test_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let wrong = general_purpose::STANDARD.encode("metrics:wrong");
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .header(header::AUTHORIZATION, format!("Basic {}", wrong))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_metrics_exposes_business_counters() {
    let app = common::create_test_app();

    // Generate at least one sample
    common::post_json(
        &app,
        "/api/v1/progression/submissions",
        json!({
            "outcome": { "correctness_percent": 100, "difficulty": 2 },
            "activity_date": "2024-02-01"
        }),
    )
    .await;

    let credentials = general_purpose::STANDARD.encode(common::METRICS_AUTH);
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .header(header::AUTHORIZATION, format!("Basic {}", credentials))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("submissions_evaluated_total"));
    assert!(text.contains("xp_awarded_total"));
}

#[tokio::test]
async fn test_trace_id_is_echoed() {
    let app = common::create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-trace-id", "trace-abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-trace-id").unwrap(),
        "trace-abc-123"
    );
}

#[tokio::test]
async fn test_trace_id_is_generated_when_missing() {
    let app = common::create_test_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let trace_id = response.headers().get("x-trace-id").unwrap().to_str().unwrap();
    assert_eq!(trace_id.len(), 36);
    assert!(response
        .headers()
        .get(header::CONTENT_SECURITY_POLICY)
        .is_some());
}

#[tokio::test]
async fn test_malformed_json_returns_json_error() {
    let app = common::create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/progression/xp")
                .header("content-type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], 400);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Failed to parse JSON request body"));
}

#[tokio::test]
async fn test_missing_field_returns_json_error() {
    let app = common::create_test_app();

    let (status, body) =
        common::post_json(&app, "/api/v1/progression/xp", json!({ "difficulty": 2 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}
