//! Forecast point types

use crate::observation::WindDirection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Air quality category derived from the AQI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirQuality {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AirQuality {
    /// Categorize an AQI value
    pub fn from_aqi(aqi: f64) -> Self {
        if aqi <= 50.0 {
            AirQuality::Good
        } else if aqi <= 100.0 {
            AirQuality::Moderate
        } else if aqi <= 150.0 {
            AirQuality::UnhealthyForSensitive
        } else if aqi <= 200.0 {
            AirQuality::Unhealthy
        } else if aqi <= 300.0 {
            AirQuality::VeryUnhealthy
        } else {
            AirQuality::Hazardous
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AirQuality::Good => "Good",
            AirQuality::Moderate => "Moderate",
            AirQuality::UnhealthyForSensitive => "Unhealthy for Sensitive Groups",
            AirQuality::Unhealthy => "Unhealthy",
            AirQuality::VeryUnhealthy => "Very Unhealthy",
            AirQuality::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for AirQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sky condition attached to a forecast point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Overcast,
    LightRain,
    ModerateRain,
    Thunderstorm,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 6] = [
        WeatherCondition::Sunny,
        WeatherCondition::Cloudy,
        WeatherCondition::Overcast,
        WeatherCondition::LightRain,
        WeatherCondition::ModerateRain,
        WeatherCondition::Thunderstorm,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Overcast => "Overcast",
            WeatherCondition::LightRain => "Light Rain",
            WeatherCondition::ModerateRain => "Moderate Rain",
            WeatherCondition::Thunderstorm => "Thunderstorm",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One forecast snapshot for a future time point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    /// Expected temperature (°C)
    pub temperature: f64,
    pub temperature_max: f64,
    pub temperature_min: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Pressure (hPa)
    pub pressure: f64,
    /// Wind speed (m/s)
    pub wind_speed: f64,
    pub wind_direction: WindDirection,
    /// Beaufort force (0-12)
    pub wind_level: u8,
    /// Chance of precipitation (%)
    pub precipitation_probability: f64,
    /// Visibility (km)
    pub visibility: f64,
    pub aqi: u16,
    pub air_quality: AirQuality,
    pub weather_condition: WeatherCondition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_quality_boundaries() {
        assert_eq!(AirQuality::from_aqi(0.0), AirQuality::Good);
        assert_eq!(AirQuality::from_aqi(50.0), AirQuality::Good);
        assert_eq!(AirQuality::from_aqi(51.0), AirQuality::Moderate);
        assert_eq!(AirQuality::from_aqi(150.0), AirQuality::UnhealthyForSensitive);
        assert_eq!(AirQuality::from_aqi(200.0), AirQuality::Unhealthy);
        assert_eq!(AirQuality::from_aqi(300.0), AirQuality::VeryUnhealthy);
        assert_eq!(AirQuality::from_aqi(301.0), AirQuality::Hazardous);
    }

    #[test]
    fn test_condition_labels() {
        assert_eq!(WeatherCondition::LightRain.to_string(), "Light Rain");
        assert_eq!(AirQuality::Hazardous.to_string(), "Hazardous");
    }
}
