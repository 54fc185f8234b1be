use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;

use super::domain::RiskScoreInput;
use super::engine::RiskScoringEngine;
use super::trigger::HarvestTrigger;
use crate::error::AppError;

/// Body of a free-text trigger parse request.
#[derive(Debug, Deserialize)]
pub struct TriggerRequest {
    pub text: String,
}

/// Router exposing scoring and trigger parsing over HTTP.
pub fn risk_router(engine: Arc<RiskScoringEngine>) -> Router {
    Router::new()
        .route("/api/v1/risk/score", post(score_handler))
        .route("/api/v1/risk/harvest-trigger", post(trigger_handler))
        .with_state(engine)
}

pub(crate) async fn score_handler(
    State(engine): State<Arc<RiskScoringEngine>>,
    axum::Json(input): axum::Json<RiskScoreInput>,
) -> Response {
    let result = engine.score(&input);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn trigger_handler(
    State(engine): State<Arc<RiskScoringEngine>>,
    axum::Json(request): axum::Json<TriggerRequest>,
) -> Result<axum::Json<HarvestTrigger>, AppError> {
    let trigger = engine.parse_trigger(&request.text)?;
    Ok(axum::Json(trigger))
}
