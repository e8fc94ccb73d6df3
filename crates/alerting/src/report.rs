//! Alert statistics report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reporting period as given by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start: String,
    pub end: String,
}

impl ReportPeriod {
    pub fn new(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: start.unwrap_or("beginning").to_string(),
            end: end.unwrap_or("end").to_string(),
        }
    }
}

/// Summary of the alert history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AlertReport {
    /// History was empty
    Empty {
        total_alerts: usize,
        message: String,
        period: ReportPeriod,
    },
    Summary {
        total_alerts: usize,
        /// Alerts per level label
        level_distribution: BTreeMap<String, usize>,
        /// Events per hazard label, across all alerts
        event_distribution: BTreeMap<String, usize>,
        period: ReportPeriod,
        generated_at: DateTime<Utc>,
    },
}

impl AlertReport {
    pub fn empty(period: ReportPeriod) -> Self {
        AlertReport::Empty {
            total_alerts: 0,
            message: "No alerts recorded in the reporting period".to_string(),
            period,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, AlertReport::Empty { .. })
    }

    pub fn total_alerts(&self) -> usize {
        match self {
            AlertReport::Empty { total_alerts, .. } | AlertReport::Summary { total_alerts, .. } => {
                *total_alerts
            }
        }
    }
}
