//! Observation Range Validator

use crate::error::ValidationError;
use crate::observation::WeatherObservation;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Temperature valid range (°C)
    pub temperature_range: (f64, f64),
    /// Humidity valid range (%)
    pub humidity_range: (f64, f64),
    /// Pressure valid range (hPa)
    pub pressure_range: (f64, f64),
    /// Wind speed valid range (m/s)
    pub wind_speed_range: (f64, f64),
    /// Precipitation valid range (mm/h)
    pub precipitation_range: (f64, f64),
    /// Snowfall valid range (mm)
    pub snowfall_range: (f64, f64),
    /// Visibility valid range (km)
    pub visibility_range: (f64, f64),
    /// AQI valid range
    pub aqi_range: (f64, f64),
    /// Cloud cover valid range (%)
    pub cloud_cover_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            temperature_range: (-90.0, 60.0),
            humidity_range: (0.0, 100.0),
            pressure_range: (850.0, 1100.0),
            wind_speed_range: (0.0, 120.0),
            precipitation_range: (0.0, 500.0),
            snowfall_range: (0.0, 1000.0),
            visibility_range: (0.0, 100.0),
            aqi_range: (0.0, 500.0),
            cloud_cover_range: (0.0, 100.0),
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

/// Range validator for weather observations
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate every present reading of an observation.
    ///
    /// Absent fields are skipped, they are never an error.
    pub fn validate_observation(&self, obs: &WeatherObservation) -> ValidationResult {
        let c = &self.config;
        let checks: [(&'static str, Option<f64>, (f64, f64)); 9] = [
            ("temperature", obs.temperature, c.temperature_range),
            ("humidity", obs.humidity, c.humidity_range),
            ("pressure", obs.pressure, c.pressure_range),
            ("wind_speed", obs.wind_speed, c.wind_speed_range),
            ("precipitation", obs.precipitation, c.precipitation_range),
            ("snowfall", obs.snowfall, c.snowfall_range),
            ("visibility", obs.visibility, c.visibility_range),
            ("aqi", obs.aqi, c.aqi_range),
            ("cloud_cover", obs.cloud_cover, c.cloud_cover_range),
        ];

        let mut fields_checked = 0;
        let mut errors = Vec::new();
        for (field, value, range) in checks {
            if let Some(value) = value {
                fields_checked += 1;
                if let Err(e) = self.validate_range(field, value, range) {
                    debug!("Observation rejected: {}", e);
                    errors.push(e);
                }
            }
        }

        ValidationResult {
            valid: errors.is_empty(),
            errors,
            fields_checked,
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
