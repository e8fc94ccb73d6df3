//! Weather Predictor Implementation

use crate::result::{
    ExtremeAssessment, MultiScalePrediction, PredictionMethod, PredictionMode, PredictionResult,
};
use chrono::{DateTime, Utc};
use forecast::{Horizon, NumericalForecaster, Uncertainty};
use hazard::HazardClassifier;
use llm_client::WeatherAnalyst;
use tracing::{info, warn};
use weather_model::{ForecastPoint, WeatherObservation};

/// Analysis text attached to fallback results
pub const FALLBACK_ANALYSIS: &str =
    "Remote analysis temporarily unavailable; forecast generated by the local numerical model";

/// Prediction orchestrator
pub struct WeatherPredictor<A> {
    mode: PredictionMode,
    analyst: Option<A>,
    forecaster: NumericalForecaster,
    classifier: HazardClassifier,
}

impl<A: WeatherAnalyst> WeatherPredictor<A> {
    /// Create a predictor; `analyst` may be absent even in remote mode
    pub fn new(mode: PredictionMode, analyst: Option<A>) -> Self {
        info!(
            "Weather predictor initialized: mode {:?}, analyst {}",
            mode,
            if analyst.is_some() { "configured" } else { "absent" }
        );
        Self {
            mode,
            analyst,
            forecaster: NumericalForecaster::new(),
            classifier: HazardClassifier::new(),
        }
    }

    /// Predictor that never contacts a remote analyst
    pub fn local_only() -> Self {
        Self::new(PredictionMode::LocalOnly, None)
    }

    /// Replace the numeric forecaster, e.g. with a seeded one
    pub fn with_forecaster(mut self, forecaster: NumericalForecaster) -> Self {
        self.forecaster = forecaster;
        self
    }

    pub fn mode(&self) -> PredictionMode {
        self.mode
    }

    pub async fn predict(
        &mut self,
        current: &WeatherObservation,
        history: &[WeatherObservation],
        horizon: Horizon,
    ) -> PredictionResult {
        self.predict_at(current, history, horizon, Utc::now()).await
    }

    /// Forecast `horizon` with time points anchored at `now`
    pub async fn predict_at(
        &mut self,
        current: &WeatherObservation,
        history: &[WeatherObservation],
        horizon: Horizon,
        now: DateTime<Utc>,
    ) -> PredictionResult {
        info!("Starting {} prediction", horizon.description());
        let predictions = self.forecaster.forecast(current, horizon, now);
        let uncertainty = Uncertainty::estimate(&predictions);

        let (method, analysis, api_error) = match self.mode {
            PredictionMode::LocalOnly => (PredictionMethod::LocalNumerical, None, None),
            PredictionMode::RemoteAnalysis => match &self.analyst {
                None => {
                    warn!("Remote analyst not configured, using local forecast");
                    (
                        PredictionMethod::FallbackNumerical,
                        Some(FALLBACK_ANALYSIS.to_string()),
                        Some("remote analyst not configured".to_string()),
                    )
                }
                Some(analyst) => match analyst.predict_weather(history, horizon).await {
                    Ok(text) => (PredictionMethod::RemoteAnalysis, Some(text), None),
                    Err(e) => {
                        warn!("Remote prediction failed: {}, using local forecast", e);
                        (
                            PredictionMethod::FallbackNumerical,
                            Some(FALLBACK_ANALYSIS.to_string()),
                            Some(e.to_string()),
                        )
                    }
                },
            },
        };

        info!("{} prediction complete ({})", horizon.description(), method);
        PredictionResult {
            success: true,
            horizon,
            horizon_description: horizon.description().to_string(),
            time_points: predictions.iter().map(|p| p.timestamp).collect(),
            predictions,
            analysis,
            method,
            uncertainty,
            api_error,
        }
    }

    /// Predict every horizon in [`Horizon::MULTI_SCALE`]
    pub async fn predict_multi_scale(
        &mut self,
        current: &WeatherObservation,
        history: &[WeatherObservation],
    ) -> MultiScalePrediction {
        info!("Starting multi-scale prediction");
        let now = Utc::now();
        let mut results = Vec::with_capacity(Horizon::MULTI_SCALE.len());
        for horizon in Horizon::MULTI_SCALE {
            results.push(self.predict_at(current, history, horizon, now).await);
        }
        info!("Multi-scale prediction complete");
        MultiScalePrediction {
            timestamp: now,
            results,
        }
    }

    /// Classify conditions and attach the analyst's commentary when available.
    ///
    /// A failing analyst is logged and never affects the detections.
    pub async fn assess_extremes(
        &self,
        observation: &WeatherObservation,
        forecast: Option<&[ForecastPoint]>,
    ) -> ExtremeAssessment {
        let detections = self.classifier.classify(observation, forecast);

        let ai_analysis = match (&self.analyst, self.mode) {
            (Some(analyst), PredictionMode::RemoteAnalysis) => match analyst
                .detect_extreme_weather(observation, self.classifier.thresholds())
                .await
            {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!("Remote extreme-weather analysis failed: {}", e);
                    None
                }
            },
            _ => None,
        };

        ExtremeAssessment {
            timestamp: Utc::now(),
            detections,
            ai_analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hazard::HazardThresholds;
    use llm_client::{AnalysisKind, LlmError};

    struct CannedAnalyst(&'static str);

    impl WeatherAnalyst for CannedAnalyst {
        async fn predict_weather(
            &self,
            _history: &[WeatherObservation],
            horizon: Horizon,
        ) -> Result<String, LlmError> {
            Ok(format!("{} for {}", self.0, horizon))
        }

        async fn detect_extreme_weather(
            &self,
            _observation: &WeatherObservation,
            _thresholds: &HazardThresholds,
        ) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }

        async fn analyze(
            &self,
            _observation: &WeatherObservation,
            _kind: AnalysisKind,
        ) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct DownAnalyst;

    impl WeatherAnalyst for DownAnalyst {
        async fn predict_weather(
            &self,
            _history: &[WeatherObservation],
            _horizon: Horizon,
        ) -> Result<String, LlmError> {
            Err(LlmError::EmptyResponse)
        }

        async fn detect_extreme_weather(
            &self,
            _observation: &WeatherObservation,
            _thresholds: &HazardThresholds,
        ) -> Result<String, LlmError> {
            Err(LlmError::EmptyResponse)
        }

        async fn analyze(
            &self,
            _observation: &WeatherObservation,
            _kind: AnalysisKind,
        ) -> Result<String, LlmError> {
            Err(LlmError::EmptyResponse)
        }
    }

    fn current() -> WeatherObservation {
        WeatherObservation::default()
            .with_temperature(22.0)
            .with_humidity(70.0)
    }

    #[tokio::test]
    async fn test_remote_success() {
        let mut p = WeatherPredictor::new(
            PredictionMode::RemoteAnalysis,
            Some(CannedAnalyst("Mild and clear")),
        )
        .with_forecaster(NumericalForecaster::with_seed(9));
        let r = p.predict(&current(), &[], Horizon::SixHours).await;
        assert!(r.success);
        assert_eq!(r.method, PredictionMethod::RemoteAnalysis);
        assert_eq!(r.analysis.as_deref(), Some("Mild and clear for 6h"));
        assert!(r.api_error.is_none());
        assert_eq!(r.predictions.len(), 7);
        assert_eq!(r.time_points.len(), 7);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back() {
        let mut p = WeatherPredictor::new(PredictionMode::RemoteAnalysis, Some(DownAnalyst));
        let r = p.predict(&current(), &[], Horizon::OneDay).await;
        assert!(r.success);
        assert_eq!(r.method, PredictionMethod::FallbackNumerical);
        assert_eq!(r.analysis.as_deref(), Some(FALLBACK_ANALYSIS));
        assert_eq!(
            r.api_error.as_deref(),
            Some("Response contained no message content")
        );
        assert_eq!(r.predictions.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_analyst_in_remote_mode_falls_back() {
        let mut p = WeatherPredictor::<DownAnalyst>::new(PredictionMode::RemoteAnalysis, None);
        let r = p.predict(&current(), &[], Horizon::OneHour).await;
        assert_eq!(r.method, PredictionMethod::FallbackNumerical);
        assert!(r.api_error.is_some());
    }

    #[tokio::test]
    async fn test_local_only_never_calls_analyst() {
        let mut p = WeatherPredictor::new(PredictionMode::LocalOnly, Some(DownAnalyst));
        let r = p.predict(&current(), &[], Horizon::ThreeDays).await;
        assert_eq!(r.method, PredictionMethod::LocalNumerical);
        assert!(r.analysis.is_none());
        assert!(r.api_error.is_none());

        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["method"], "local_numerical");
        assert_eq!(json["horizon"], "3day");
    }

    #[tokio::test]
    async fn test_multi_scale_covers_all_horizons() {
        let mut p = WeatherPredictor::<DownAnalyst>::local_only();
        let multi = p.predict_multi_scale(&current(), &[]).await;
        let horizons: Vec<_> = multi.results.iter().map(|r| r.horizon).collect();
        assert_eq!(horizons, Horizon::MULTI_SCALE.to_vec());
        assert_eq!(multi.get(Horizon::OneWeek).unwrap().predictions.len(), 8);
        assert_eq!(multi.method(), Some(PredictionMethod::LocalNumerical));
    }

    #[tokio::test]
    async fn test_assess_extremes_with_failing_analyst() {
        let p = WeatherPredictor::new(PredictionMode::RemoteAnalysis, Some(DownAnalyst));
        let obs = WeatherObservation::default().with_temperature(41.0);
        let a = p.assess_extremes(&obs, None).await;
        assert!(a.detections.has_extreme());
        assert_eq!(a.detections.max_severity(), 4);
        assert!(a.ai_analysis.is_none());
    }

    #[tokio::test]
    async fn test_assess_extremes_with_commentary() {
        let p = WeatherPredictor::new(
            PredictionMode::RemoteAnalysis,
            Some(CannedAnalyst("No extreme risk")),
        );
        let a = p.assess_extremes(&current(), None).await;
        assert!(!a.detections.has_extreme());
        assert_eq!(a.ai_analysis.as_deref(), Some("No extreme risk"));
    }
}
