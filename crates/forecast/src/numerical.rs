//! Perturbation-based numeric forecaster

use crate::horizon::Horizon;
use crate::indices::{beaufort_level, sample_condition};
use crate::make_rng;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use weather_model::{round1, AirQuality, ForecastPoint, WeatherObservation, WindDirection};

/// Values assumed for readings missing from the current observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastBaseline {
    /// Temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Pressure (hPa)
    pub pressure: f64,
    /// Wind speed (m/s)
    pub wind_speed: f64,
    /// Visibility (km)
    pub visibility: f64,
    /// Air quality index
    pub aqi: f64,
}

impl Default for ForecastBaseline {
    fn default() -> Self {
        Self {
            temperature: 20.0,
            humidity: 60.0,
            pressure: 1013.0,
            wind_speed: 5.0,
            visibility: 10.0,
            aqi: 50.0,
        }
    }
}

/// Generates forecast points by perturbing the current reading
pub struct NumericalForecaster {
    baseline: ForecastBaseline,
    rng: StdRng,
}

impl NumericalForecaster {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Deterministic forecaster for reproducible runs
    pub fn with_seed(seed: u64) -> Self {
        Self::build(Some(seed))
    }

    fn build(seed: Option<u64>) -> Self {
        Self {
            baseline: ForecastBaseline::default(),
            rng: make_rng(seed),
        }
    }

    pub fn baseline(&self) -> &ForecastBaseline {
        &self.baseline
    }

    /// One point per horizon time point, starting at `now`
    pub fn forecast(
        &mut self,
        current: &WeatherObservation,
        horizon: Horizon,
        now: DateTime<Utc>,
    ) -> Vec<ForecastPoint> {
        let b = self.baseline;
        let mut base_temp = current.temperature.unwrap_or(b.temperature);
        let base_humidity = current.humidity.unwrap_or(b.humidity);
        let base_pressure = current.pressure.unwrap_or(b.pressure);
        let base_wind = current.wind_speed.unwrap_or(b.wind_speed);
        let base_visibility = current.visibility.unwrap_or(b.visibility);
        let base_aqi = current.aqi.unwrap_or(b.aqi);

        let points: Vec<ForecastPoint> = horizon
            .time_points(now)
            .into_iter()
            .map(|timestamp| {
                let temp_change = self.normal(2.0);
                let temperature = base_temp + temp_change;
                let wind_speed = round1((base_wind + self.normal(2.0)).max(0.0));
                let aqi = (base_aqi + self.normal(20.0)).clamp(0.0, 500.0) as u16;

                let point = ForecastPoint {
                    timestamp,
                    temperature: round1(temperature),
                    temperature_max: round1(temperature + 2.0),
                    temperature_min: round1(temperature - 2.0),
                    humidity: round1((base_humidity + self.normal(5.0)).clamp(0.0, 100.0)),
                    pressure: round1(base_pressure + self.normal(3.0)),
                    wind_speed,
                    wind_direction: self.direction(),
                    wind_level: beaufort_level(wind_speed),
                    precipitation_probability: round1((30.0 + self.normal(20.0)).clamp(0.0, 100.0)),
                    visibility: round1((base_visibility + self.normal(2.0)).max(0.1)),
                    aqi,
                    air_quality: AirQuality::from_aqi(f64::from(aqi)),
                    weather_condition: sample_condition(&mut self.rng),
                };

                base_temp += temp_change * 0.3;
                point
            })
            .collect();

        debug!("Generated {} forecast points for {}", points.len(), horizon);
        points
    }

    fn normal(&mut self, sigma: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        z * sigma
    }

    fn direction(&mut self) -> WindDirection {
        *WindDirection::ALL
            .choose(&mut self.rng)
            .unwrap_or(&WindDirection::N)
    }
}

impl Default for NumericalForecaster {
    fn default() -> Self {
        Self::new()
    }
}
