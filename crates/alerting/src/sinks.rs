//! Alert dispatch sinks

use crate::bulletin::AlertBulletin;
use crate::AlertError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use storage::OutputStore;
use tracing::{debug, info, warn};

/// Alert configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Print bulletins to stdout
    pub enable_console: bool,
    /// Write `<id>.json` and `<id>.txt` under `output_dir`
    pub enable_file: bool,
    /// Email delivery (no transport configured)
    pub enable_email: bool,
    /// SMS delivery (no transport configured)
    pub enable_sms: bool,
    /// Directory for persisted bulletins
    pub output_dir: PathBuf,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enable_console: true,
            enable_file: true,
            enable_email: false,
            enable_sms: false,
            output_dir: PathBuf::from("outputs/alerts"),
        }
    }
}

impl AlertConfig {
    /// Configuration with every sink switched off
    pub fn silent() -> Self {
        Self {
            enable_console: false,
            enable_file: false,
            enable_email: false,
            enable_sms: false,
            ..Self::default()
        }
    }

    /// Instantiate the enabled sinks, console first
    pub fn build_sinks(&self) -> Vec<Box<dyn AlertSink>> {
        let mut sinks: Vec<Box<dyn AlertSink>> = Vec::new();
        if self.enable_console {
            sinks.push(Box::new(ConsoleSink));
        }
        if self.enable_file {
            sinks.push(Box::new(FileSink::new(self.output_dir.clone())));
        }
        if self.enable_email {
            sinks.push(Box::new(EmailSink));
        }
        if self.enable_sms {
            sinks.push(Box::new(SmsSink));
        }
        sinks
    }
}

/// A delivery channel for bulletins
pub trait AlertSink: Send + Sync {
    fn name(&self) -> &'static str;

    fn publish(&self, bulletin: &AlertBulletin) -> Result<(), AlertError>;
}

/// Prints the rendered message
pub struct ConsoleSink;

impl AlertSink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    fn publish(&self, bulletin: &AlertBulletin) -> Result<(), AlertError> {
        println!("\n{}", bulletin.message);
        info!(alert_id = %bulletin.id, "Alert written to console");
        Ok(())
    }
}

/// Persists the JSON record and the text message
pub struct FileSink {
    store: OutputStore,
}

impl FileSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: OutputStore::new(output_dir),
        }
    }
}

impl AlertSink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    fn publish(&self, bulletin: &AlertBulletin) -> Result<(), AlertError> {
        let json_path = self
            .store
            .save_json(format!("{}.json", bulletin.id), bulletin)?;
        self.store
            .save_text(format!("{}.txt", bulletin.id), &bulletin.message)?;
        info!(alert_id = %bulletin.id, "Alert saved to {}", json_path.display());
        Ok(())
    }
}

/// Email channel without a configured mail server
pub struct EmailSink;

impl AlertSink for EmailSink {
    fn name(&self) -> &'static str {
        "email"
    }

    fn publish(&self, bulletin: &AlertBulletin) -> Result<(), AlertError> {
        warn!(
            alert_id = %bulletin.id,
            "Email alerting not configured (requires a mail server)"
        );
        Ok(())
    }
}

/// SMS channel without a configured gateway
pub struct SmsSink;

impl AlertSink for SmsSink {
    fn name(&self) -> &'static str {
        "sms"
    }

    fn publish(&self, bulletin: &AlertBulletin) -> Result<(), AlertError> {
        warn!(
            alert_id = %bulletin.id,
            "SMS alerting not configured (requires an SMS gateway)"
        );
        Ok(())
    }
}

/// Publish to every sink; failures are logged and swallowed
pub(crate) fn dispatch(sinks: &[Box<dyn AlertSink>], bulletin: &AlertBulletin) {
    for sink in sinks {
        match sink.publish(bulletin) {
            Ok(()) => debug!(sink = sink.name(), "Alert dispatched"),
            Err(e) => warn!(
                sink = sink.name(),
                alert_id = %bulletin.id,
                "Alert dispatch failed: {}",
                e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sinks() {
        let names: Vec<_> = AlertConfig::default()
            .build_sinks()
            .iter()
            .map(|s| s.name())
            .collect();
        assert_eq!(names, vec!["console", "file"]);
    }

    #[test]
    fn test_all_sinks_enabled() {
        let config = AlertConfig {
            enable_email: true,
            enable_sms: true,
            ..AlertConfig::default()
        };
        assert_eq!(config.build_sinks().len(), 4);
        assert!(AlertConfig::silent().build_sinks().is_empty());
    }
}
