//! Time source and alert id generation

use chrono::{DateTime, Utc};

/// Source of the current time for bulletins
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Produces `ALERT_<yyyymmddHHMMSS>_<seq>` ids.
///
/// The sequence is per generator and strictly increasing, so ids issued
/// within the same second stay distinct.
#[derive(Debug, Default)]
pub struct AlertIdGenerator {
    seq: u32,
}

impl AlertIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, at: DateTime<Utc>) -> String {
        self.seq += 1;
        format!("ALERT_{}_{:04}", at.format("%Y%m%d%H%M%S"), self.seq)
    }
}
