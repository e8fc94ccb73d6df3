//! Forecast horizons

use crate::ForecastError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spacing between forecast points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStep {
    Hourly,
    Daily,
}

/// How far ahead a forecast reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "1day")]
    OneDay,
    #[serde(rename = "3day")]
    ThreeDays,
    #[serde(rename = "1week")]
    OneWeek,
    #[serde(rename = "short_term")]
    ShortTerm,
    #[serde(rename = "medium_term")]
    MediumTerm,
    #[serde(rename = "long_term")]
    LongTerm,
}

impl Horizon {
    /// Horizons covered by a multi-scale prediction, shortest first
    pub const MULTI_SCALE: [Horizon; 5] = [
        Horizon::OneHour,
        Horizon::SixHours,
        Horizon::OneDay,
        Horizon::ThreeDays,
        Horizon::OneWeek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::OneHour => "1h",
            Horizon::SixHours => "6h",
            Horizon::OneDay => "1day",
            Horizon::ThreeDays => "3day",
            Horizon::OneWeek => "1week",
            Horizon::ShortTerm => "short_term",
            Horizon::MediumTerm => "medium_term",
            Horizon::LongTerm => "long_term",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Horizon::OneHour => "next 1 hour",
            Horizon::SixHours | Horizon::ShortTerm => "next 6 hours",
            Horizon::OneDay => "next 1 day",
            Horizon::ThreeDays | Horizon::MediumTerm => "next 3 days",
            Horizon::OneWeek | Horizon::LongTerm => "next 1 week",
        }
    }

    pub fn step(&self) -> TimeStep {
        match self {
            Horizon::OneHour | Horizon::SixHours | Horizon::ShortTerm => TimeStep::Hourly,
            _ => TimeStep::Daily,
        }
    }

    /// Number of steps after `now`
    pub fn steps(&self) -> u32 {
        match self {
            Horizon::OneHour | Horizon::OneDay => 1,
            Horizon::ThreeDays | Horizon::MediumTerm => 3,
            Horizon::SixHours | Horizon::ShortTerm => 6,
            Horizon::OneWeek | Horizon::LongTerm => 7,
        }
    }

    /// `steps() + 1` instants starting at `now`
    pub fn time_points(&self, now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let unit = match self.step() {
            TimeStep::Hourly => Duration::hours(1),
            TimeStep::Daily => Duration::days(1),
        };
        (0..=self.steps()).map(|i| now + unit * i as i32).collect()
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Horizon {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1h" => Ok(Horizon::OneHour),
            "6h" => Ok(Horizon::SixHours),
            "1day" => Ok(Horizon::OneDay),
            "3day" => Ok(Horizon::ThreeDays),
            "1week" => Ok(Horizon::OneWeek),
            "short_term" => Ok(Horizon::ShortTerm),
            "medium_term" => Ok(Horizon::MediumTerm),
            "long_term" => Ok(Horizon::LongTerm),
            other => Err(ForecastError::UnknownHorizon(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_point_counts() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(Horizon::OneHour.time_points(now).len(), 2);
        assert_eq!(Horizon::SixHours.time_points(now).len(), 7);
        assert_eq!(Horizon::OneDay.time_points(now).len(), 2);
        assert_eq!(Horizon::ThreeDays.time_points(now).len(), 4);
        assert_eq!(Horizon::OneWeek.time_points(now).len(), 8);
    }

    #[test]
    fn test_week_uses_daily_steps() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let points = Horizon::OneWeek.time_points(now);
        assert_eq!(points[0], now);
        assert_eq!(points[7], now + Duration::days(7));
    }

    #[test]
    fn test_parse() {
        assert_eq!("6h".parse::<Horizon>(), Ok(Horizon::SixHours));
        assert_eq!("long_term".parse::<Horizon>(), Ok(Horizon::LongTerm));
        assert_eq!(
            "2h".parse::<Horizon>(),
            Err(ForecastError::UnknownHorizon("2h".to_string()))
        );
        for h in Horizon::MULTI_SCALE {
            assert_eq!(h.as_str().parse::<Horizon>(), Ok(h));
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Horizon::OneDay).unwrap(), "\"1day\"");
    }
}
