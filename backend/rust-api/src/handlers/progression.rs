use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    errors::ProgressionError,
    extractors::{AppJson, ValidatedJson},
    models::{
        level::{LevelTableResponse, ResolveLevelRequest},
        progress::{OverviewRequest, SubmissionRequest, WeeklyRequest},
        streak::{RecordActivityRequest, StreakStatusRequest},
        submission::{DifficultyRequest, SubmissionOutcome, XpAwardResponse},
    },
    services::{progression_service::ProgressionService, AppState},
};

type ApiError = (StatusCode, Json<Value>);

fn invalid_input(err: ProgressionError) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "message": err.to_string(),
            "constraint": err.constraint(),
            "status": 400
        })),
    )
}

pub async fn list_levels(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(LevelTableResponse {
        levels: state.rules.levels.thresholds().to_vec(),
        max_level: state.rules.levels.max_level(),
    })
}

pub async fn calculate_xp(
    State(state): State<Arc<AppState>>,
    AppJson(outcome): AppJson<SubmissionOutcome>,
) -> Result<impl IntoResponse, ApiError> {
    let service = ProgressionService::new(state.rules.clone());

    let (xp_awarded, passed) = service.award_xp(&outcome).map_err(invalid_input)?;
    tracing::debug!("XP calculated: {} (passed={})", xp_awarded, passed);

    Ok((StatusCode::OK, Json(XpAwardResponse { xp_awarded, passed })))
}

pub async fn resolve_level(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ResolveLevelRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = ProgressionService::new(state.rules.clone());

    let progress = service.resolve_level(req.total_xp).map_err(invalid_input)?;
    Ok((StatusCode::OK, Json(progress)))
}

pub async fn record_activity(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<RecordActivityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Recording activity on {}", req.activity_date);

    let service = ProgressionService::new(state.rules.clone());

    let update = service
        .record_activity(&req.streak, req.activity_date)
        .map_err(invalid_input)?;
    Ok((StatusCode::OK, Json(update)))
}

pub async fn streak_status(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<StreakStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = ProgressionService::new(state.rules.clone());

    let status = service
        .streak_status(&req.streak, req.today)
        .map_err(invalid_input)?;
    Ok((StatusCode::OK, Json(status)))
}

pub async fn recommend_difficulty(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<DifficultyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = ProgressionService::new(state.rules.clone());

    let recommendation = service
        .recommend_difficulty(&req.recent, req.current_difficulty)
        .map_err(invalid_input)?;
    Ok((StatusCode::OK, Json(recommendation)))
}

pub async fn evaluate_submission(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<SubmissionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = ProgressionService::new(state.rules.clone());

    match service.evaluate_submission(&req) {
        Ok(update) => Ok((StatusCode::OK, Json(update))),
        Err(e) => {
            tracing::warn!("Submission rejected: {}", e);
            Err(invalid_input(e))
        }
    }
}

pub async fn progress_overview(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<OverviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = ProgressionService::new(state.rules.clone());

    let overview = service
        .overview(&req.tracks, &req.streak, req.today)
        .map_err(invalid_input)?;
    Ok((StatusCode::OK, Json(overview)))
}

pub async fn weekly_summary(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<WeeklyRequest>,
) -> impl IntoResponse {
    let service = ProgressionService::new(state.rules.clone());

    Json(service.weekly_summary(&req.activity, req.today))
}
