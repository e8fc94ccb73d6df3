//! Threshold-based hazard classifier

use crate::detection::{Detection, DetectionSet, HazardKind, HazardReading};
use crate::thresholds::{HazardThresholds, THRESHOLDS};
use tracing::{debug, info};
use weather_model::{ForecastPoint, WeatherObservation};

/// Temperature assumed when the observation has none (°C)
pub const DEFAULT_TEMPERATURE: f64 = 25.0;
/// Wind speed assumed when absent (m/s)
pub const DEFAULT_WIND_SPEED: f64 = 0.0;
/// Pressure assumed when absent (hPa)
pub const DEFAULT_PRESSURE: f64 = 1013.0;
/// Precipitation assumed when absent (mm/h)
pub const DEFAULT_PRECIPITATION: f64 = 0.0;
/// Snowfall assumed when absent (mm)
pub const DEFAULT_SNOWFALL: f64 = 0.0;

/// Extension point for temperature hazards that look at forecast snapshots.
///
/// The classifier first decides from current conditions, then hands the
/// result to the policy together with whatever forecast it was given.
pub trait ForecastAware {
    fn revise(
        &self,
        kind: HazardKind,
        current: Option<Detection>,
        forecast: &[ForecastPoint],
    ) -> Option<Detection>;
}

/// Default policy: forecasts never change the decision
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentConditionsOnly;

impl ForecastAware for CurrentConditionsOnly {
    fn revise(
        &self,
        _kind: HazardKind,
        current: Option<Detection>,
        _forecast: &[ForecastPoint],
    ) -> Option<Detection> {
        current
    }
}

/// Hazard classifier
pub struct HazardClassifier<F = CurrentConditionsOnly> {
    thresholds: HazardThresholds,
    forecast_policy: F,
}

impl HazardClassifier {
    /// Create a classifier over the standard threshold table
    pub fn new() -> Self {
        Self::with_forecast_policy(CurrentConditionsOnly)
    }
}

impl Default for HazardClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ForecastAware> HazardClassifier<F> {
    /// Create a classifier whose temperature checks consult `policy`
    pub fn with_forecast_policy(policy: F) -> Self {
        Self {
            thresholds: THRESHOLDS,
            forecast_policy: policy,
        }
    }

    pub fn thresholds(&self) -> &HazardThresholds {
        &self.thresholds
    }

    /// Evaluate every hazard kind against one observation
    pub fn classify(
        &self,
        obs: &WeatherObservation,
        forecast: Option<&[ForecastPoint]>,
    ) -> DetectionSet {
        let detections: Vec<Detection> = [
            self.detect_typhoon(obs),
            self.detect_heavy_rain(obs),
            self.detect_high_temperature(obs, forecast),
            self.detect_low_temperature(obs, forecast),
            self.detect_heavy_snow(obs),
        ]
        .into_iter()
        .flatten()
        .collect();

        for d in &detections {
            debug!("Detected {} ({}), severity {}", d.kind(), d.tier, d.severity);
        }

        let set = DetectionSet::new(detections);
        info!(
            "Classification complete: {} extreme weather event(s), max severity {}",
            set.len(),
            set.max_severity()
        );
        set
    }

    /// Typhoon: strong wind or deep low pressure
    pub fn detect_typhoon(&self, obs: &WeatherObservation) -> Option<Detection> {
        let wind_speed = obs.wind_speed.unwrap_or(DEFAULT_WIND_SPEED);
        let pressure = obs.pressure.unwrap_or(DEFAULT_PRESSURE);
        let t = &self.thresholds.typhoon;

        if wind_speed < t.wind_speed && pressure >= t.pressure {
            return None;
        }

        // Tiers follow wind speed alone; a pressure-only trigger lands on
        // the lowest tier.
        let (severity, tier) = if wind_speed >= 51.0 {
            (4, "super typhoon")
        } else if wind_speed >= 41.5 {
            (4, "strong typhoon")
        } else if wind_speed >= 32.7 {
            (3, "typhoon")
        } else {
            (2, "tropical storm")
        };

        Some(Detection::new(
            HazardReading::Typhoon {
                wind_speed,
                pressure,
            },
            severity,
            tier,
            format!(
                "{} detected: wind speed {} m/s, pressure {} hPa",
                sentence_case(tier),
                wind_speed,
                pressure
            ),
        ))
    }

    /// Heavy rain by hourly precipitation rate
    pub fn detect_heavy_rain(&self, obs: &WeatherObservation) -> Option<Detection> {
        let precipitation = obs.precipitation.unwrap_or(DEFAULT_PRECIPITATION);
        if precipitation < self.thresholds.heavy_rain.precipitation {
            return None;
        }

        // The last two arms sit below the gate.
        let (severity, tier) = if precipitation >= 100.0 {
            (4, "extreme rainstorm")
        } else if precipitation >= 50.0 {
            (3, "severe rainstorm")
        } else if precipitation >= 25.0 {
            (2, "rainstorm")
        } else {
            (1, "heavy rain")
        };

        Some(Detection::new(
            HazardReading::HeavyRain { precipitation },
            severity,
            tier,
            format!(
                "{} detected: precipitation {} mm/h",
                sentence_case(tier),
                precipitation
            ),
        ))
    }

    pub fn detect_high_temperature(
        &self,
        obs: &WeatherObservation,
        forecast: Option<&[ForecastPoint]>,
    ) -> Option<Detection> {
        let temperature = obs.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        let current = if temperature >= self.thresholds.high_temperature.temperature {
            let (severity, tier) = if temperature >= 40.0 {
                (4, "extreme heat")
            } else if temperature >= 38.0 {
                (3, "severe heat")
            } else {
                (2, "heat")
            };
            Some(Detection::new(
                HazardReading::HighTemperature { temperature },
                severity,
                tier,
                format!(
                    "{} detected: temperature {}°C",
                    sentence_case(tier),
                    temperature
                ),
            ))
        } else {
            None
        };

        self.forecast_policy.revise(
            HazardKind::HighTemperature,
            current,
            forecast.unwrap_or_default(),
        )
    }

    pub fn detect_low_temperature(
        &self,
        obs: &WeatherObservation,
        forecast: Option<&[ForecastPoint]>,
    ) -> Option<Detection> {
        let temperature = obs.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        let current = if temperature <= self.thresholds.low_temperature.temperature {
            let (severity, tier) = if temperature <= -20.0 {
                (4, "extreme cold")
            } else if temperature <= -15.0 {
                (3, "severe cold")
            } else {
                (2, "cold")
            };
            Some(Detection::new(
                HazardReading::LowTemperature { temperature },
                severity,
                tier,
                format!(
                    "{} detected: temperature {}°C",
                    sentence_case(tier),
                    temperature
                ),
            ))
        } else {
            None
        };

        self.forecast_policy.revise(
            HazardKind::LowTemperature,
            current,
            forecast.unwrap_or_default(),
        )
    }

    pub fn detect_heavy_snow(&self, obs: &WeatherObservation) -> Option<Detection> {
        let snowfall = obs.snowfall.unwrap_or(DEFAULT_SNOWFALL);
        if snowfall < self.thresholds.heavy_snow.snowfall {
            return None;
        }

        let (severity, tier) = if snowfall >= 30.0 {
            (4, "extreme blizzard")
        } else if snowfall >= 20.0 {
            (3, "severe blizzard")
        } else if snowfall >= 10.0 {
            (2, "blizzard")
        } else {
            (1, "heavy snow")
        };

        Some(Detection::new(
            HazardReading::HeavySnow { snowfall },
            severity,
            tier,
            format!("{} detected: snowfall {} mm", sentence_case(tier), snowfall),
        ))
    }
}

fn sentence_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
