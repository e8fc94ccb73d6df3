//! Synthetic Observation Collector

use crate::make_rng;
use chrono::{DateTime, Datelike, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Exp, StandardNormal};
use tracing::info;
use weather_model::{round1, Region, WeatherObservation, WindDirection};

/// Mean hourly precipitation of the exponential draw (mm/h)
const MEAN_PRECIPITATION: f64 = 2.0;

/// Produces hourly observation series for a region.
///
/// Readings are independent draws around a seasonal base temperature;
/// there is no autocorrelation between consecutive hours.
pub struct SyntheticCollector {
    rng: StdRng,
}

impl SyntheticCollector {
    pub fn new() -> Self {
        Self { rng: make_rng(None) }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: make_rng(Some(seed)),
        }
    }

    /// Hourly observations from `start` to `end`, both inclusive
    pub fn generate_series(
        &mut self,
        region: &Region,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<WeatherObservation> {
        let base_temp = seasonal_base_temperature(start.month());
        let mut series = Vec::new();
        let mut at = start;

        while at <= end {
            let obs = self.sample(region, at, base_temp);
            series.push(obs);
            at += Duration::hours(1);
        }

        info!(
            "Generated {} synthetic observations for {}",
            series.len(),
            region.name_en
        );
        series
    }

    /// Series covering the last `hours` hours up to now
    pub fn sample_history(&mut self, region: &Region, hours: u32) -> Vec<WeatherObservation> {
        let end = Utc::now();
        let start = end - Duration::hours(i64::from(hours));
        self.generate_series(region, start, end)
    }

    fn sample(&mut self, region: &Region, at: DateTime<Utc>, base_temp: f64) -> WeatherObservation {
        let variation: f64 = self.rng.sample::<f64, _>(StandardNormal) * 3.0;
        let precipitation = match Exp::new(1.0 / MEAN_PRECIPITATION) {
            Ok(exp) => self.rng.sample(exp),
            Err(_) => 0.0,
        };

        WeatherObservation {
            timestamp: at,
            region: Some(region.key.clone()),
            latitude: Some(region.latitude),
            longitude: Some(region.longitude),
            temperature: Some(round1(base_temp + variation)),
            humidity: Some(round1(self.rng.gen_range(40.0..90.0))),
            pressure: Some(round1(self.rng.gen_range(990.0..1020.0))),
            wind_speed: Some(round1(self.rng.gen_range(0.0..15.0))),
            wind_direction: WindDirection::ALL.choose(&mut self.rng).copied(),
            precipitation: Some(round1(precipitation.max(0.0))),
            cloud_cover: Some(round1(self.rng.gen_range(0.0..100.0))),
            visibility: Some(round1(self.rng.gen_range(5.0..20.0))),
            ..WeatherObservation::default()
        }
    }
}

impl Default for SyntheticCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Base temperature (°C) for the meteorological season of `month`
fn seasonal_base_temperature(month: u32) -> f64 {
    match month {
        12 | 1 | 2 => 0.0,
        3..=5 => 15.0,
        6..=8 => 28.0,
        _ => 18.0,
    }
}
