//! Extreme Weather Classification
//!
//! Evaluates an observation against the fixed hazard threshold table and
//! reports every hazard it crosses, with a severity tier from 1 (minor)
//! to 4 (extreme).

mod classifier;
mod detection;
mod thresholds;

pub use classifier::{CurrentConditionsOnly, ForecastAware, HazardClassifier};
pub use detection::{Detection, DetectionSet, HazardKind, HazardReading};
pub use thresholds::{
    HazardThresholds, HeavyRainThreshold, SnowThreshold, TemperatureThreshold,
    TyphoonThreshold, THRESHOLDS,
};
