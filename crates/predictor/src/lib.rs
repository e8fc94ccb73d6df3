//! Weather Prediction
//!
//! Combines the numeric forecaster with an optional remote analyst. The
//! numeric forecast is always produced; remote analysis only adds the
//! narrative, and its failure degrades to a local-only result.

mod predictor;
mod result;

pub use predictor::{WeatherPredictor, FALLBACK_ANALYSIS};
pub use result::{
    ExtremeAssessment, MultiScalePrediction, PredictionMethod, PredictionMode, PredictionResult,
};
