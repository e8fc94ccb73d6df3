//! Forecast Routes

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{ApiError, SharedState};
use forecast::Horizon;
use predictor::PredictionResult;
use weather_model::WeatherObservation;

/// Query parameters for forecast endpoint
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    #[serde(default = "default_horizon")]
    pub horizon: String,
}

fn default_horizon() -> String {
    Horizon::SixHours.as_str().to_string()
}

/// Local numeric forecast from the posted observation
pub async fn predict(
    State(state): State<SharedState>,
    Query(params): Query<ForecastQuery>,
    Json(observation): Json<WeatherObservation>,
) -> Result<Json<PredictionResult>, ApiError> {
    let horizon = params
        .horizon
        .parse::<Horizon>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let mut state = state.write().await;
    let history = [observation.clone()];
    let result = state
        .predictor
        .predict(&observation, &history, horizon)
        .await;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::test_support::{send, test_state};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_default_horizon() {
        let app = create_router(test_state());
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/forecast",
            Some(json!({"temperature": 18.0})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["horizon"], "6h");
        assert_eq!(body["method"], "local_numerical");
        assert_eq!(body["predictions"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_week_horizon() {
        let app = create_router(test_state());
        let (_, body) = send(
            app,
            "POST",
            "/api/v1/forecast?horizon=1week",
            Some(json!({})),
        )
        .await;
        assert_eq!(body["time_points"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_unknown_horizon() {
        let app = create_router(test_state());
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/forecast?horizon=2h",
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unknown forecast horizon: 2h");
    }
}
