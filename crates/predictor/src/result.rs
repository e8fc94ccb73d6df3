//! Prediction result types

use chrono::{DateTime, Utc};
use forecast::{Horizon, Uncertainty};
use hazard::DetectionSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use weather_model::ForecastPoint;

/// Whether the predictor consults the remote analyst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMode {
    #[default]
    RemoteAnalysis,
    LocalOnly,
}

/// How a prediction's narrative was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMethod {
    /// Remote analyst answered
    RemoteAnalysis,
    /// Remote analyst requested but unavailable
    FallbackNumerical,
    /// Remote analyst not requested
    LocalNumerical,
}

impl PredictionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionMethod::RemoteAnalysis => "remote_analysis",
            PredictionMethod::FallbackNumerical => "fallback_numerical",
            PredictionMethod::LocalNumerical => "local_numerical",
        }
    }
}

impl fmt::Display for PredictionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forecast for one horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Always true; a failed remote call still yields numeric points
    pub success: bool,
    pub horizon: Horizon,
    pub horizon_description: String,
    pub time_points: Vec<DateTime<Utc>>,
    pub predictions: Vec<ForecastPoint>,
    /// Narrative text, absent for local-only predictions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    pub method: PredictionMethod,
    pub uncertainty: Uncertainty,
    /// Remote failure text when the fallback was taken
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_error: Option<String>,
}

/// Forecasts for every multi-scale horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiScalePrediction {
    pub timestamp: DateTime<Utc>,
    /// One result per horizon, shortest first
    pub results: Vec<PredictionResult>,
}

impl MultiScalePrediction {
    pub fn get(&self, horizon: Horizon) -> Option<&PredictionResult> {
        self.results.iter().find(|r| r.horizon == horizon)
    }

    /// Method of the first result, used as the headline method in reports
    pub fn method(&self) -> Option<PredictionMethod> {
        self.results.first().map(|r| r.method)
    }
}

/// Classifier verdict plus the analyst's optional commentary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremeAssessment {
    pub timestamp: DateTime<Utc>,
    pub detections: DetectionSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<String>,
}
