//! Hazard trigger thresholds.
//!
//! The table is fixed process-wide configuration. There is no setter:
//! callers read [`THRESHOLDS`] or a copy handed out by the classifier.

use serde::{Deserialize, Serialize};

/// Typhoon triggers: either condition is sufficient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TyphoonThreshold {
    /// Sustained wind speed at or above this triggers (m/s)
    pub wind_speed: f64,
    /// Pressure strictly below this triggers (hPa)
    pub pressure: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeavyRainThreshold {
    /// Rate at or above this triggers (mm/h)
    pub precipitation: f64,
    /// Informational only, not evaluated
    pub duration_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureThreshold {
    /// Trigger temperature (°C); direction depends on the hazard
    pub temperature: f64,
    /// Informational only, not evaluated
    pub duration_days: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnowThreshold {
    /// Snowfall at or above this triggers (mm)
    pub snowfall: f64,
    /// Informational only, not evaluated
    pub duration_hours: f64,
}

/// Trigger values for every hazard kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardThresholds {
    pub typhoon: TyphoonThreshold,
    pub heavy_rain: HeavyRainThreshold,
    pub high_temperature: TemperatureThreshold,
    pub low_temperature: TemperatureThreshold,
    pub heavy_snow: SnowThreshold,
}

/// The process-wide threshold table
pub static THRESHOLDS: HazardThresholds = HazardThresholds {
    typhoon: TyphoonThreshold {
        wind_speed: 32.7,
        pressure: 980.0,
    },
    heavy_rain: HeavyRainThreshold {
        precipitation: 50.0,
        duration_hours: 3.0,
    },
    high_temperature: TemperatureThreshold {
        temperature: 37.0,
        duration_days: 3.0,
    },
    low_temperature: TemperatureThreshold {
        temperature: -10.0,
        duration_days: 2.0,
    },
    heavy_snow: SnowThreshold {
        snowfall: 10.0,
        duration_hours: 12.0,
    },
};

impl Default for HazardThresholds {
    fn default() -> Self {
        THRESHOLDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        assert_eq!(THRESHOLDS.typhoon.wind_speed, 32.7);
        assert_eq!(THRESHOLDS.typhoon.pressure, 980.0);
        assert_eq!(THRESHOLDS.heavy_rain.precipitation, 50.0);
        assert_eq!(THRESHOLDS.high_temperature.temperature, 37.0);
        assert_eq!(THRESHOLDS.low_temperature.temperature, -10.0);
        assert_eq!(THRESHOLDS.heavy_snow.snowfall, 10.0);
    }

    #[test]
    fn test_serializes_with_hazard_keys() {
        let json = serde_json::to_value(THRESHOLDS).unwrap();
        assert_eq!(json["typhoon"]["wind_speed"], 32.7);
        assert_eq!(json["heavy_snow"]["duration_hours"], 12.0);
    }
}
