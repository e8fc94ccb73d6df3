//! Alert bulletins

use crate::level::AlertLevel;
use crate::AlertError;
use chrono::{DateTime, Utc};
use hazard::{Detection, HazardKind};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

const RULE_WIDTH: usize = 60;

/// One hazard event copied into a bulletin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub kind: HazardKind,
    /// Hazard name, e.g. "Heavy Snow"
    pub label: String,
    /// Tier within the hazard, e.g. "severe blizzard"
    pub tier: String,
    pub severity: u8,
    pub description: String,
}

impl From<&Detection> for AlertEvent {
    fn from(d: &Detection) -> Self {
        Self {
            kind: d.kind(),
            label: d.label.clone(),
            tier: d.tier.clone(),
            severity: d.severity,
            description: d.description.clone(),
        }
    }
}

/// A published alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertBulletin {
    /// Unique id, `ALERT_<yyyymmddHHMMSS>_<seq>`
    pub id: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Alert level (1-4)
    pub level: AlertLevel,
    /// Display label of `level`
    pub level_name: String,
    /// Raw maximum severity of the detections
    pub severity: u8,
    /// Events in detection order
    pub events: Vec<AlertEvent>,
    /// De-duplicated recommended actions, first-seen order
    pub suggestions: Vec<String>,
    /// Rendered text form
    pub message: String,
}

impl AlertBulletin {
    /// Assemble a bulletin and render its message
    pub fn build(
        id: String,
        timestamp: DateTime<Utc>,
        severity: u8,
        detections: &[Detection],
    ) -> Self {
        let level = AlertLevel::from_severity(severity);
        let events = detections.iter().map(AlertEvent::from).collect();

        let mut suggestions: Vec<String> = Vec::new();
        for s in detections.iter().flat_map(|d| d.suggestions.iter()) {
            if !suggestions.contains(s) {
                suggestions.push(s.clone());
            }
        }

        let mut bulletin = Self {
            id,
            timestamp,
            level,
            level_name: level.label().to_string(),
            severity,
            events,
            suggestions,
            message: String::new(),
        };
        bulletin.message = bulletin.render();
        bulletin
    }

    fn render(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "WEATHER ALERT - {}", self.level_name);
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out);
        let _ = writeln!(out, "Alert ID: {}", self.id);
        let _ = writeln!(
            out,
            "Issued At: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(out, "Alert Level: {}", self.level_name);
        let _ = writeln!(out);
        let _ = writeln!(out, "Extreme weather events:");
        for (i, event) in self.events.iter().enumerate() {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}. {} ({})", i + 1, event.label, event.tier);
            let _ = writeln!(out, "   {}", event.description);
        }

        if !self.suggestions.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", rule);
            let _ = writeln!(out, "Recommended actions:");
            for (i, s) in self.suggestions.iter().enumerate() {
                let _ = writeln!(out, "{}. {}", i + 1, s);
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(
            out,
            "Stay alert to changing weather conditions and take precautions!"
        );
        let _ = writeln!(out, "{}", rule);
        out
    }
}

/// Result of an issue request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IssueOutcome {
    Issued(AlertBulletin),
    NotIssued { message: String },
}

impl IssueOutcome {
    pub fn issued(&self) -> bool {
        matches!(self, IssueOutcome::Issued(_))
    }

    pub fn bulletin(&self) -> Option<&AlertBulletin> {
        match self {
            IssueOutcome::Issued(b) => Some(b),
            IssueOutcome::NotIssued { .. } => None,
        }
    }
}

/// Reload a bulletin persisted by the file sink
pub fn load_bulletin(path: impl AsRef<Path>) -> Result<AlertBulletin, AlertError> {
    Ok(storage::load_json_file(path.as_ref())?)
}
