//! Alerting System
//!
//! Turns hazard detections into leveled alert bulletins, keeps the alert
//! history, and dispatches bulletins to the configured sinks.

mod bulletin;
mod clock;
mod level;
mod manager;
mod report;
mod sinks;

pub use bulletin::{load_bulletin, AlertBulletin, AlertEvent, IssueOutcome};
pub use clock::{AlertIdGenerator, Clock, FixedClock, SystemClock};
pub use level::AlertLevel;
pub use manager::{AlertManager, DEFAULT_HISTORY_LIMIT};
pub use report::{AlertReport, ReportPeriod};
pub use sinks::{AlertConfig, AlertSink, ConsoleSink, EmailSink, FileSink, SmsSink};

use thiserror::Error;

/// Alerting errors
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("Invalid alert level: {0}")]
    InvalidLevel(u8),
    #[error("Sink {sink} failed: {reason}")]
    Sink { sink: &'static str, reason: String },
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}
