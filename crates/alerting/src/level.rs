//! Alert levels

use crate::AlertError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Four-color public warning scale, serialized as its number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AlertLevel {
    Blue = 1,
    Yellow = 2,
    Orange = 3,
    Red = 4,
}

impl AlertLevel {
    /// Map a detection severity to a level, clamping into 1..=4
    pub fn from_severity(severity: u8) -> Self {
        match severity {
            0 | 1 => AlertLevel::Blue,
            2 => AlertLevel::Yellow,
            3 => AlertLevel::Orange,
            _ => AlertLevel::Red,
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertLevel::Blue => "Blue Alert (General)",
            AlertLevel::Yellow => "Yellow Alert (Serious)",
            AlertLevel::Orange => "Orange Alert (Severe)",
            AlertLevel::Red => "Red Alert (Extremely Severe)",
        }
    }
}

impl TryFrom<u8> for AlertLevel {
    type Error = AlertError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AlertLevel::Blue),
            2 => Ok(AlertLevel::Yellow),
            3 => Ok(AlertLevel::Orange),
            4 => Ok(AlertLevel::Red),
            other => Err(AlertError::InvalidLevel(other)),
        }
    }
}

impl From<AlertLevel> for u8 {
    fn from(level: AlertLevel) -> u8 {
        level.as_u8()
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
