//! End-to-end Workflow
//!
//! One region run: synthetic history, multi-scale prediction, extreme
//! weather assessment, alert issuance, then persisted results and a text
//! report under the output directory.

use crate::report::render_text_report;
use crate::settings::AppConfig;
use crate::{PipelineError, Predictor};
use alerting::{AlertManager, AlertReport, IssueOutcome};
use chrono::{DateTime, Utc};
use forecast::{Horizon, NumericalForecaster, SyntheticCollector};
use llm_client::ChatClient;
use predictor::{ExtremeAssessment, MultiScalePrediction, PredictionMode};
use serde::Serialize;
use std::path::PathBuf;
use storage::{timestamped_name, OutputStore, ALERTS_DIR, REPORTS_DIR};
use tracing::{info, warn};
use uuid::Uuid;
use weather_model::{Region, Validator, WeatherObservation};

/// Everything produced for one region
#[derive(Debug, Clone, Serialize)]
pub struct RegionRun {
    pub run_id: Uuid,
    pub region: Region,
    pub timestamp: DateTime<Utc>,
    pub mode: PredictionMode,
    pub current_weather: WeatherObservation,
    pub predictions: MultiScalePrediction,
    pub extreme_weather: ExtremeAssessment,
    pub alert: IssueOutcome,
    /// Files written for this run
    #[serde(skip)]
    pub artifacts: Vec<PathBuf>,
}

/// Workflow orchestrator
pub struct WeatherPipeline {
    config: AppConfig,
    collector: SyntheticCollector,
    predictor: Predictor,
    alerts: AlertManager,
    validator: Validator,
    store: OutputStore,
}

impl WeatherPipeline {
    pub fn new(config: AppConfig) -> Result<Self, PipelineError> {
        let store = OutputStore::new(&config.output.dir);
        store.ensure_layout()?;

        let analyst = match config.prediction.mode {
            PredictionMode::LocalOnly => None,
            PredictionMode::RemoteAnalysis => match ChatClient::new(config.llm.clone()) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!("Remote analyst unavailable ({}), predictions will fall back to the local model", e);
                    None
                }
            },
        };

        let (collector, forecaster) = match config.prediction.seed {
            Some(seed) => (
                SyntheticCollector::with_seed(seed),
                NumericalForecaster::with_seed(seed.wrapping_add(1)),
            ),
            None => (SyntheticCollector::new(), NumericalForecaster::new()),
        };

        info!("Weather pipeline initialized, output in {}", store.root().display());
        Ok(Self {
            predictor: Predictor::new(config.prediction.mode, analyst).with_forecaster(forecaster),
            alerts: AlertManager::new(config.alerts.clone()),
            collector,
            validator: Validator::default(),
            store,
            config,
        })
    }

    pub fn alerts(&self) -> &AlertManager {
        &self.alerts
    }

    /// Run the workflow for the region with key `key`
    pub async fn run_region_key(&mut self, key: &str) -> Result<RegionRun, PipelineError> {
        let region = self
            .config
            .region(key)
            .cloned()
            .ok_or_else(|| PipelineError::UnknownRegion(key.to_string()))?;
        self.run_region(&region).await
    }

    pub async fn run_region(&mut self, region: &Region) -> Result<RegionRun, PipelineError> {
        let run_id = Uuid::new_v4();
        info!(%run_id, "Starting weather workflow for {}", region.name_en);

        // 1. Synthetic history; the newest record is the current observation
        let history = self
            .collector
            .sample_history(region, self.config.prediction.history_hours);
        let current = history
            .last()
            .cloned()
            .ok_or_else(|| PipelineError::NoData(region.key.clone()))?;
        info!("Collected {} historical observations", history.len());

        let validation = self.validator.validate_observation(&current);
        if !validation.valid {
            for e in &validation.errors {
                warn!("Current observation failed validation: {}", e);
            }
        }

        // 2. Multi-scale prediction
        let predictions = self.predictor.predict_multi_scale(&current, &history).await;
        for result in &predictions.results {
            info!(
                "{}: {} time points ({})",
                result.horizon_description,
                result.predictions.len(),
                result.method
            );
        }

        // 3. Extreme weather against the short-range forecast
        let reference = predictions
            .get(Horizon::SixHours)
            .or_else(|| predictions.get(Horizon::OneHour))
            .map(|r| r.predictions.as_slice());
        let extreme_weather = self.predictor.assess_extremes(&current, reference).await;
        if extreme_weather.detections.has_extreme() {
            for d in extreme_weather.detections.detections() {
                warn!("Extreme weather: {} ({})", d.label, d.tier);
            }
        } else {
            info!("No extreme weather detected");
        }

        // 4. Alerts
        let alert = self.alerts.issue_alert(&extreme_weather.detections);

        let mut run = RegionRun {
            run_id,
            region: region.clone(),
            timestamp: Utc::now(),
            mode: self.predictor.mode(),
            current_weather: current,
            predictions,
            extreme_weather,
            alert,
            artifacts: Vec::new(),
        };

        // 5. Persist
        let prefix = format!("prediction_results_{}", region.key);
        let results_path = self
            .store
            .save_json(timestamped_name(&prefix, "json", run.timestamp), &run)?;
        info!("Prediction results saved to {}", results_path.display());

        let report = render_text_report(&run, Utc::now());
        let report_name = timestamped_name(&format!("weather_report_{}", region.key), "txt", run.timestamp);
        let report_path = self
            .store
            .save_text(PathBuf::from(REPORTS_DIR).join(report_name), &report)?;
        info!("Text report saved to {}", report_path.display());

        run.artifacts = vec![results_path, report_path];
        info!(
            %run_id,
            "Workflow complete for {}: {} extreme event(s), alert {}",
            region.name_en,
            run.extreme_weather.detections.len(),
            if run.alert.issued() { "issued" } else { "not issued" }
        );
        Ok(run)
    }

    /// Run every configured region in order
    pub async fn run_all(&mut self) -> Result<Vec<RegionRun>, PipelineError> {
        let regions = self.config.regions.clone();
        let mut runs = Vec::with_capacity(regions.len());
        for region in &regions {
            runs.push(self.run_region(region).await?);
        }
        Ok(runs)
    }

    /// Summarize the alert history into `alerts/alert_report_<ts>.json`
    pub fn write_alert_report(&self) -> Result<(AlertReport, PathBuf), PipelineError> {
        let report = self.alerts.generate_report(None, None);
        let name = timestamped_name("alert_report", "json", Utc::now());
        let path = self
            .store
            .save_json(PathBuf::from(ALERTS_DIR).join(name), &report)?;
        info!("Alert report saved to {}", path.display());
        Ok((report, path))
    }
}
