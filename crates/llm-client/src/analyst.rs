//! Weather analyst abstraction

use crate::client::ChatClient;
use crate::prompts::{analysis_prompt, extreme_weather_prompt, prediction_prompt};
use crate::LlmError;
use forecast::Horizon;
use hazard::HazardThresholds;
use serde::{Deserialize, Serialize};
use std::future::Future;
use weather_model::WeatherObservation;

/// Focus of a free-form analysis request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    #[default]
    General,
    Extreme,
    Trend,
}

/// Narrative weather analysis from a remote model.
///
/// Every method returns the model's text verbatim; callers decide how to
/// degrade when a call fails.
pub trait WeatherAnalyst: Send + Sync {
    fn predict_weather(
        &self,
        history: &[WeatherObservation],
        horizon: Horizon,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;

    fn detect_extreme_weather(
        &self,
        observation: &WeatherObservation,
        thresholds: &HazardThresholds,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;

    fn analyze(
        &self,
        observation: &WeatherObservation,
        kind: AnalysisKind,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}

impl WeatherAnalyst for ChatClient {
    async fn predict_weather(
        &self,
        history: &[WeatherObservation],
        horizon: Horizon,
    ) -> Result<String, LlmError> {
        let prompt = prediction_prompt(history, horizon)?;
        self.complete(&prompt).await
    }

    async fn detect_extreme_weather(
        &self,
        observation: &WeatherObservation,
        thresholds: &HazardThresholds,
    ) -> Result<String, LlmError> {
        let prompt = extreme_weather_prompt(observation, thresholds)?;
        self.complete(&prompt).await
    }

    async fn analyze(
        &self,
        observation: &WeatherObservation,
        kind: AnalysisKind,
    ) -> Result<String, LlmError> {
        let prompt = analysis_prompt(observation, kind)?;
        self.complete(&prompt).await
    }
}
