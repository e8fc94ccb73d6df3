//! Weather Data Model
//!
//! Shared observation, forecast and region types, plus range validation
//! for observation fields.

mod error;
mod forecast;
mod observation;
mod region;
mod validator;

pub use error::ValidationError;
pub use forecast::{AirQuality, ForecastPoint, WeatherCondition};
pub use observation::{WeatherObservation, WindDirection};
pub use region::{Region, RegionLevel};
pub use validator::{ValidationConfig, ValidationResult, Validator};

/// Round a value to one decimal place, the precision used for all
/// generated readings.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round a value to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
