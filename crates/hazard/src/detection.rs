//! Detection records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hazard categories known to the classifier, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    Typhoon,
    HeavyRain,
    HighTemperature,
    LowTemperature,
    HeavySnow,
}

impl HazardKind {
    pub const ALL: [HazardKind; 5] = [
        HazardKind::Typhoon,
        HazardKind::HeavyRain,
        HazardKind::HighTemperature,
        HazardKind::LowTemperature,
        HazardKind::HeavySnow,
    ];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            HazardKind::Typhoon => "typhoon",
            HazardKind::HeavyRain => "heavy_rain",
            HazardKind::HighTemperature => "high_temperature",
            HazardKind::LowTemperature => "low_temperature",
            HazardKind::HeavySnow => "heavy_snow",
        }
    }

    /// Human-readable hazard name
    pub fn label(&self) -> &'static str {
        match self {
            HazardKind::Typhoon => "Typhoon",
            HazardKind::HeavyRain => "Heavy Rain",
            HazardKind::HighTemperature => "High Temperature",
            HazardKind::LowTemperature => "Low Temperature",
            HazardKind::HeavySnow => "Heavy Snow",
        }
    }

    /// Recommended actions; fixed per hazard, independent of severity
    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            HazardKind::Typhoon => &[
                "Stop all outdoor activities immediately",
                "Close doors and windows and secure loose structures",
                "Stock up on emergency supplies",
                "Follow official warning updates",
                "Move to a safe location if necessary",
            ],
            HazardKind::HeavyRain => &[
                "Avoid going out and stay away from low-lying areas",
                "Guard against urban waterlogging",
                "Check drainage systems",
                "Prepare emergency lighting",
                "Follow official warning updates",
            ],
            HazardKind::HighTemperature => &[
                "Avoid going out during the hottest hours",
                "Drink water regularly",
                "Take measures to prevent heatstroke",
                "Look after the elderly and children",
                "Reduce strenuous exercise",
            ],
            HazardKind::LowTemperature => &[
                "Keep warm and guard against frostbite",
                "Check heating facilities",
                "Protect water pipes from freezing",
                "Limit time spent outdoors",
                "Look after vulnerable groups",
            ],
            HazardKind::HeavySnow => &[
                "Limit trips and drive carefully",
                "Clear snow to keep roads from icing",
                "Take care against slipping and freezing",
                "Check power and heating facilities",
                "Stock up on daily necessities",
            ],
        }
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readings that triggered a detection, keyed by hazard kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HazardReading {
    Typhoon { wind_speed: f64, pressure: f64 },
    HeavyRain { precipitation: f64 },
    HighTemperature { temperature: f64 },
    LowTemperature { temperature: f64 },
    HeavySnow { snowfall: f64 },
}

impl HazardReading {
    pub fn kind(&self) -> HazardKind {
        match self {
            HazardReading::Typhoon { .. } => HazardKind::Typhoon,
            HazardReading::HeavyRain { .. } => HazardKind::HeavyRain,
            HazardReading::HighTemperature { .. } => HazardKind::HighTemperature,
            HazardReading::LowTemperature { .. } => HazardKind::LowTemperature,
            HazardReading::HeavySnow { .. } => HazardKind::HeavySnow,
        }
    }
}

/// One hazard whose threshold was crossed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(flatten)]
    pub reading: HazardReading,
    /// Hazard name, e.g. "Typhoon"
    pub label: String,
    /// Tier name within the hazard, e.g. "super typhoon"
    pub tier: String,
    /// 1 (minor) to 4 (extreme)
    pub severity: u8,
    pub description: String,
    pub suggestions: Vec<String>,
}

impl Detection {
    /// Build a detection with the hazard's standard label and suggestions
    pub fn new(reading: HazardReading, severity: u8, tier: &str, description: String) -> Self {
        let kind = reading.kind();
        Self {
            reading,
            label: kind.label().to_string(),
            tier: tier.to_string(),
            severity,
            description,
            suggestions: kind.suggestions().iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn kind(&self) -> HazardKind {
        self.reading.kind()
    }
}

/// Classification output for one observation.
///
/// `has_extreme` and `max_severity` are derived from the detection list
/// and never stored independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "DetectionSetRecord", from = "DetectionSetRecord")]
pub struct DetectionSet {
    detections: Vec<Detection>,
}

impl DetectionSet {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// True iff at least one hazard was detected
    pub fn has_extreme(&self) -> bool {
        !self.detections.is_empty()
    }

    /// Highest severity across detections, 0 when empty
    pub fn max_severity(&self) -> u8 {
        self.detections.iter().map(|d| d.severity).max().unwrap_or(0)
    }
}

/// Wire shape of a [`DetectionSet`], carrying the derived fields
#[derive(Serialize, Deserialize)]
struct DetectionSetRecord {
    detections: Vec<Detection>,
    #[serde(default)]
    has_extreme: bool,
    #[serde(default)]
    max_severity: u8,
}

impl From<DetectionSet> for DetectionSetRecord {
    fn from(set: DetectionSet) -> Self {
        Self {
            has_extreme: set.has_extreme(),
            max_severity: set.max_severity(),
            detections: set.detections,
        }
    }
}

impl From<DetectionSetRecord> for DetectionSet {
    fn from(record: DetectionSetRecord) -> Self {
        DetectionSet::new(record.detections)
    }
}
