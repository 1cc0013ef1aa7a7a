use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use errors::{ProgressionError, RulesError};
pub use services::AppState;

/// CSP middleware adds Content-Security-Policy header to all responses
async fn csp_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    // JSON only, nothing to load
    response.headers_mut().insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );
    response
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // The dashboard calls the engine from the browser
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(tower_http::cors::Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Metrics endpoint with Basic Auth protection
        .route(
            "/metrics",
            get(handlers::metrics_handler).layer(middleware::from_fn_with_state(
                app_state.clone(),
                handlers::metrics_auth_middleware,
            )),
        )
        .nest("/api/v1/progression", progression_routes().layer(cors))
        .with_state(app_state)
        .layer(middleware::from_fn(csp_middleware))
        .layer(middleware::from_fn(middlewares::metrics::metrics_middleware))
        .layer(middleware::from_fn(middlewares::trace::trace_context_middleware))
        .layer(TraceLayer::new_for_http())
}

fn progression_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/levels", get(handlers::progression::list_levels))
        .route("/xp", post(handlers::progression::calculate_xp))
        .route("/level", post(handlers::progression::resolve_level))
        .route("/streak", post(handlers::progression::record_activity))
        .route("/streak/status", post(handlers::progression::streak_status))
        .route("/difficulty", post(handlers::progression::recommend_difficulty))
        .route("/submissions", post(handlers::progression::evaluate_submission))
        .route("/overview", post(handlers::progression::progress_overview))
        .route("/weekly", post(handlers::progression::weekly_summary))
}
