//! Weather Alert Pipeline
//!
//! Configuration, the end-to-end workflow, text reports and the REST
//! server over hazard classification, forecasts and alert history.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod settings;
mod error;
pub mod pipeline;
pub mod report;
mod routes;

pub use settings::{AppConfig, ConfigError, LoggingConfig};
pub use error::{ApiError, PipelineError};
pub use pipeline::{RegionRun, WeatherPipeline};

use alerting::AlertManager;
use forecast::NumericalForecaster;
use hazard::HazardClassifier;
use llm_client::ChatClient;
use predictor::WeatherPredictor;
use weather_model::Validator;

/// Predictor wired to the HTTP chat client
pub type Predictor = WeatherPredictor<ChatClient>;

/// Application state shared across handlers
pub struct AppState {
    /// Alert history owner
    pub alerts: AlertManager,
    pub classifier: HazardClassifier,
    /// Range checks for submitted observations
    pub validator: Validator,
    /// Local-only predictor for on-demand forecasts
    pub predictor: Predictor,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: &AppConfig) -> Self {
        let forecaster = match config.prediction.seed {
            Some(seed) => NumericalForecaster::with_seed(seed),
            None => NumericalForecaster::new(),
        };
        Self {
            alerts: AlertManager::new(config.alerts.clone()),
            classifier: HazardClassifier::new(),
            validator: Validator::default(),
            predictor: Predictor::local_only().with_forecaster(forecaster),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Shared handle passed to every handler
pub type SharedState = Arc<RwLock<AppState>>;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_seconds: u64,
    pub alert_history_size: usize,
}

/// Create the application router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/classify", post(routes::classify::classify))
        .route("/api/v1/forecast", post(routes::forecast::predict))
        .route(
            "/api/v1/alerts",
            get(routes::alerts::get_alerts).delete(routes::alerts::clear_alerts),
        )
        .route("/api/v1/alerts/report", get(routes::alerts::get_report))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        alert_history_size: state.alerts.history_len(),
    })
}

/// Initialize logging.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {}", e))
}

/// Run the server until the listener fails
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let addr = config.server.addr();
    let state = Arc::new(RwLock::new(AppState::new(&config)));
    let app = create_router(state);

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::{send, test_state};
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(test_state());
        let (status, body) = send(app, "GET", "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["alert_history_size"], 0);
    }
}
