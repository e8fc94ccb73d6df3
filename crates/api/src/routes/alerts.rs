//! Alert Routes

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::SharedState;
use alerting::{AlertBulletin, AlertReport, DEFAULT_HISTORY_LIMIT};

/// Query parameters for alerts endpoint
#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    /// Maximum number of records
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

/// Response for alerts endpoint
#[derive(Debug, Serialize)]
pub struct AlertResponse {
    /// Most recent bulletins, oldest first
    pub data: Vec<AlertBulletin>,
    pub count: usize,
    /// Size of the full history
    pub total: usize,
}

/// Get the tail of the alert history
pub async fn get_alerts(
    State(state): State<SharedState>,
    Query(params): Query<AlertQuery>,
) -> Json<AlertResponse> {
    let state = state.read().await;
    let data = state.alerts.history(params.limit.min(500)).to_vec();

    Json(AlertResponse {
        count: data.len(),
        total: state.alerts.history_len(),
        data,
    })
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub cleared: usize,
}

/// Clear the alert history
pub async fn clear_alerts(State(state): State<SharedState>) -> Json<ClearResponse> {
    let mut state = state.write().await;
    let cleared = state.alerts.history_len();
    state.alerts.clear_history();
    Json(ClearResponse { cleared })
}

/// Query parameters for the report endpoint; echoed, not filtered on
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Summarize the alert history
pub async fn get_report(
    State(state): State<SharedState>,
    Query(params): Query<ReportQuery>,
) -> Json<AlertReport> {
    let state = state.read().await;
    Json(
        state
            .alerts
            .generate_report(params.start.as_deref(), params.end.as_deref()),
    )
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::test_support::{send, test_state};
    use axum::http::StatusCode;
    use hazard::{Detection, DetectionSet, HazardReading};

    fn heat() -> DetectionSet {
        DetectionSet::new(vec![Detection::new(
            HazardReading::HighTemperature { temperature: 39.0 },
            3,
            "severe heat",
            "Severe heat detected: temperature 39°C".to_string(),
        )])
    }

    #[tokio::test]
    async fn test_history_limit_and_clear() {
        let state = test_state();
        {
            let mut s = state.write().await;
            for _ in 0..4 {
                s.alerts.issue_alert(&heat());
            }
        }
        let app = create_router(state);

        let (status, body) = send(app.clone(), "GET", "/api/v1/alerts?limit=3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 3);
        assert_eq!(body["total"], 4);
        assert_eq!(body["data"][2]["level"], 3);

        let (status, body) = send(app.clone(), "DELETE", "/api/v1/alerts", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cleared"], 4);

        let (_, body) = send(app, "GET", "/api/v1/alerts", None).await;
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn test_report_empty_then_summary() {
        let state = test_state();
        let app = create_router(state.clone());

        let (status, body) = send(app.clone(), "GET", "/api/v1/alerts/report", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "empty");
        assert_eq!(body["total_alerts"], 0);

        state.write().await.alerts.issue_alert(&heat());
        let (_, body) = send(
            app,
            "GET",
            "/api/v1/alerts/report?start=2024-07-01&end=2024-07-31",
            None,
        )
        .await;
        assert_eq!(body["status"], "summary");
        assert_eq!(body["total_alerts"], 1);
        assert_eq!(body["event_distribution"]["High Temperature"], 1);
        assert_eq!(body["period"]["start"], "2024-07-01");
    }
}
