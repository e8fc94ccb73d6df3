//! Forecast regions

use serde::{Deserialize, Serialize};

/// Administrative granularity of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionLevel {
    City,
    District,
}

impl RegionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionLevel::City => "city",
            RegionLevel::District => "district",
        }
    }
}

/// A forecast region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Stable lookup key, e.g. "xuancheng"
    pub key: String,
    /// Local name
    pub name: String,
    /// English name used in reports
    pub name_en: String,
    pub latitude: f64,
    pub longitude: f64,
    pub level: RegionLevel,
}

impl Region {
    /// Built-in regions used when configuration names none
    pub fn defaults() -> Vec<Region> {
        vec![
            Region {
                key: "xuancheng".to_string(),
                name: "宣城".to_string(),
                name_en: "Xuancheng".to_string(),
                latitude: 30.9,
                longitude: 118.8,
                level: RegionLevel::City,
            },
            Region {
                key: "xuanzhou".to_string(),
                name: "宣城宣州区".to_string(),
                name_en: "Xuanzhou District".to_string(),
                latitude: 30.9,
                longitude: 118.75,
                level: RegionLevel::District,
            },
        ]
    }
}
