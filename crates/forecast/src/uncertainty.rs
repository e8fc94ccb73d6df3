//! Forecast uncertainty summary

use serde::{Deserialize, Serialize};
use weather_model::{round2, ForecastPoint};

/// Spread of the forecast temperatures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Uncertainty {
    pub confidence_level: f64,
    /// Population standard deviation of point temperatures (°C)
    pub temperature_uncertainty: f64,
    pub method: String,
    pub description: String,
}

impl Uncertainty {
    pub fn estimate(points: &[ForecastPoint]) -> Self {
        Self {
            confidence_level: 0.95,
            temperature_uncertainty: round2(std_dev(points.iter().map(|p| p.temperature))),
            method: "monte_carlo".to_string(),
            description: "Uncertainty estimated from the spread of the generated forecast"
                .to_string(),
        }
    }
}

fn std_dev(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let n = values.clone().count();
    if n == 0 {
        return 0.0;
    }
    let mean = values.clone().sum::<f64>() / n as f64;
    let var = values.map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    var.sqrt()
}
