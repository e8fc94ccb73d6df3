//! Classification Routes

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{ApiError, SharedState};
use alerting::IssueOutcome;
use hazard::DetectionSet;
use weather_model::{ForecastPoint, WeatherObservation};

/// Query parameters for classify endpoint
#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    /// Issue an alert from the result
    #[serde(default)]
    pub issue: bool,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub observation: WeatherObservation,
    #[serde(default)]
    pub forecast: Option<Vec<ForecastPoint>>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub detections: DetectionSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<IssueOutcome>,
}

/// Classify one observation, optionally issuing an alert
pub async fn classify(
    State(state): State<SharedState>,
    Query(params): Query<ClassifyQuery>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let mut state = state.write().await;

    let validation = state.validator.validate_observation(&request.observation);
    if !validation.valid {
        let reasons: Vec<String> = validation.errors.iter().map(|e| e.to_string()).collect();
        warn!("Rejected observation: {}", reasons.join("; "));
        return Err(ApiError::BadRequest(reasons.join("; ")));
    }

    let detections = state
        .classifier
        .classify(&request.observation, request.forecast.as_deref());
    let alert = params
        .issue
        .then(|| state.alerts.issue_alert(&detections));

    Ok(Json(ClassifyResponse { detections, alert }))
}
