//! Weather observation snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Eight-point compass wind direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl WindDirection {
    /// All directions, clockwise from north
    pub const ALL: [WindDirection; 8] = [
        WindDirection::N,
        WindDirection::NE,
        WindDirection::E,
        WindDirection::SE,
        WindDirection::S,
        WindDirection::SW,
        WindDirection::W,
        WindDirection::NW,
    ];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            WindDirection::N => "N",
            WindDirection::NE => "NE",
            WindDirection::E => "E",
            WindDirection::SE => "SE",
            WindDirection::S => "S",
            WindDirection::SW => "SW",
            WindDirection::W => "W",
            WindDirection::NW => "NW",
        }
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single weather observation.
///
/// Every reading is optional. Consumers apply their own documented
/// defaults when a field they need is absent, so a partially filled
/// observation is always usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Observation time
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Region key the observation belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// WGS84 latitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// WGS84 longitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Air temperature (°C)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Relative humidity (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    /// Sea-level pressure (hPa)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Wind speed (m/s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<WindDirection>,
    /// Precipitation rate (mm/h)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
    /// Snowfall (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snowfall: Option<f64>,
    /// Visibility (km)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    /// Air quality index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aqi: Option<f64>,
    /// Cloud cover (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_cover: Option<f64>,
}

impl WeatherObservation {
    /// Create an empty observation taken at `timestamp`
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            ..Default::default()
        }
    }

    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature = Some(celsius);
        self
    }

    pub fn with_humidity(mut self, percent: f64) -> Self {
        self.humidity = Some(percent);
        self
    }

    pub fn with_pressure(mut self, hpa: f64) -> Self {
        self.pressure = Some(hpa);
        self
    }

    pub fn with_wind_speed(mut self, mps: f64) -> Self {
        self.wind_speed = Some(mps);
        self
    }

    pub fn with_precipitation(mut self, mm_per_hour: f64) -> Self {
        self.precipitation = Some(mm_per_hour);
        self
    }

    pub fn with_snowfall(mut self, mm: f64) -> Self {
        self.snowfall = Some(mm);
        self
    }

    pub fn with_visibility(mut self, km: f64) -> Self {
        self.visibility = Some(km);
        self
    }

    pub fn with_aqi(mut self, aqi: f64) -> Self {
        self.aqi = Some(aqi);
        self
    }

    /// Whether any numeric weather reading is present
    pub fn has_readings(&self) -> bool {
        [
            self.temperature,
            self.humidity,
            self.pressure,
            self.wind_speed,
            self.precipitation,
            self.snowfall,
            self.visibility,
            self.aqi,
            self.cloud_cover,
        ]
        .iter()
        .any(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let obs: WeatherObservation =
            serde_json::from_str(r#"{"temperature": 39.0, "wind_speed": 3.0}"#).unwrap();
        assert_eq!(obs.temperature, Some(39.0));
        assert_eq!(obs.wind_speed, Some(3.0));
        assert!(obs.pressure.is_none());
        assert!(obs.snowfall.is_none());
        assert!(obs.has_readings());
    }

    #[test]
    fn test_empty_observation_has_no_readings() {
        let obs = WeatherObservation::default();
        assert!(!obs.has_readings());
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let obs = WeatherObservation::default().with_pressure(975.0);
        let json = serde_json::to_value(&obs).unwrap();
        assert_eq!(json["pressure"], 975.0);
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_wind_direction_display() {
        assert_eq!(WindDirection::SW.to_string(), "SW");
        assert_eq!(WindDirection::ALL.len(), 8);
    }
}
