#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use codesensei_api::{
    config::{Config, ProgressionSettings},
    create_router,
    services::AppState,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const METRICS_AUTH: &str = "metrics:secret";

pub fn test_config(progression: ProgressionSettings) -> Config {
    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        metrics_auth: METRICS_AUTH.to_string(),
        progression,
    }
}

pub fn create_test_app() -> Router {
    create_test_app_with(ProgressionSettings::default())
}

pub fn create_test_app_with(progression: ProgressionSettings) -> Router {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let app_state = Arc::new(
        AppState::new(test_config(progression)).expect("Failed to initialize test app state"),
    );

    create_router(app_state)
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
