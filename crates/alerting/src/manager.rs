//! Alert Manager Implementation

use crate::bulletin::{AlertBulletin, IssueOutcome};
use crate::clock::{AlertIdGenerator, Clock, SystemClock};
use crate::report::{AlertReport, ReportPeriod};
use crate::sinks::{dispatch, AlertConfig, AlertSink};
use hazard::DetectionSet;
use std::collections::BTreeMap;
use tracing::info;

/// Default number of bulletins returned by [`AlertManager::history`]
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Issues bulletins and owns the alert history
pub struct AlertManager {
    /// Configuration
    config: AlertConfig,
    /// Time source for bulletin timestamps and ids
    clock: Box<dyn Clock>,
    /// Id sequence
    ids: AlertIdGenerator,
    /// Enabled delivery channels
    sinks: Vec<Box<dyn AlertSink>>,
    /// Issued bulletins, oldest first
    history: Vec<AlertBulletin>,
}

impl AlertManager {
    /// Create a new alert manager
    pub fn new(config: AlertConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Create an alert manager reading time from `clock`
    pub fn with_clock(config: AlertConfig, clock: Box<dyn Clock>) -> Self {
        info!("Creating alert manager with config: {:?}", config);
        let sinks = config.build_sinks();
        Self {
            config,
            clock,
            ids: AlertIdGenerator::new(),
            sinks,
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Register an additional sink
    pub fn add_sink(&mut self, sink: Box<dyn AlertSink>) {
        self.sinks.push(sink);
    }

    /// Issue a bulletin for a detection set.
    ///
    /// Nothing happens when the set has no detections.
    pub fn issue_alert(&mut self, detections: &DetectionSet) -> IssueOutcome {
        if !detections.has_extreme() {
            info!("No extreme weather detected, no alert issued");
            return IssueOutcome::NotIssued {
                message: "No active extreme weather alerts".to_string(),
            };
        }

        let now = self.clock.now();
        let id = self.ids.next_id(now);
        let bulletin =
            AlertBulletin::build(id, now, detections.max_severity(), detections.detections());

        self.history.push(bulletin.clone());
        dispatch(&self.sinks, &bulletin);

        info!(
            alert_id = %bulletin.id,
            "Alert issued, level: {}",
            bulletin.level_name
        );
        IssueOutcome::Issued(bulletin)
    }

    /// The most recent `limit` bulletins, oldest first
    pub fn history(&self, limit: usize) -> &[AlertBulletin] {
        let start = self.history.len().saturating_sub(limit);
        &self.history[start..]
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        info!("Alert history cleared");
    }

    /// Summarize the history.
    ///
    /// `start` and `end` are echoed in the period but do not filter.
    pub fn generate_report(&self, start: Option<&str>, end: Option<&str>) -> AlertReport {
        let period = ReportPeriod::new(start, end);
        if self.history.is_empty() {
            return AlertReport::empty(period);
        }

        let mut level_distribution = BTreeMap::new();
        let mut event_distribution = BTreeMap::new();
        for bulletin in &self.history {
            *level_distribution
                .entry(bulletin.level_name.clone())
                .or_insert(0) += 1;
            for event in &bulletin.events {
                *event_distribution.entry(event.label.clone()).or_insert(0) += 1;
            }
        }

        info!("Alert report generated over {} alerts", self.history.len());
        AlertReport::Summary {
            total_alerts: self.history.len(),
            level_distribution,
            event_distribution,
            period,
            generated_at: self.clock.now(),
        }
    }
}

impl Default for AlertManager {
    fn default() -> Self {
        Self::new(AlertConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bulletin::load_bulletin;
    use crate::clock::FixedClock;
    use crate::level::AlertLevel;
    use crate::AlertError;
    use chrono::{TimeZone, Utc};
    use hazard::{Detection, HazardClassifier, HazardReading};
    use weather_model::WeatherObservation;

    fn manager() -> AlertManager {
        let at = Utc.with_ymd_and_hms(2024, 7, 15, 8, 0, 0).unwrap();
        AlertManager::with_clock(AlertConfig::silent(), Box::new(FixedClock(at)))
    }

    fn snow(severity: u8) -> Detection {
        Detection::new(
            HazardReading::HeavySnow { snowfall: 25.0 },
            severity,
            "severe blizzard",
            "Severe blizzard detected: snowfall 25 mm".to_string(),
        )
    }

    #[test]
    fn test_no_extreme_means_no_alert() {
        let mut m = manager();
        let outcome = m.issue_alert(&DetectionSet::empty());
        assert!(!outcome.issued());
        assert_eq!(m.history_len(), 0);
    }

    #[test]
    fn test_single_snow_detection() {
        let mut m = manager();
        let outcome = m.issue_alert(&DetectionSet::new(vec![snow(3)]));
        let b = outcome.bulletin().unwrap();
        assert_eq!(b.level, AlertLevel::Orange);
        assert_eq!(b.level_name, "Orange Alert (Severe)");
        assert_eq!(b.severity, 3);
        assert_eq!(b.events.len(), 1);
        assert_eq!(b.id, "ALERT_20240715080000_0001");
        assert_eq!(m.history_len(), 1);
    }

    #[test]
    fn test_history_tail_in_issue_order() {
        let mut m = manager();
        let ids: Vec<String> = (0..5)
            .map(|_| {
                m.issue_alert(&DetectionSet::new(vec![snow(2)]))
                    .bulletin()
                    .map(|b| b.id.clone())
                    .unwrap()
            })
            .collect();

        let tail: Vec<_> = m.history(2).iter().map(|b| b.id.clone()).collect();
        assert_eq!(tail, ids[3..].to_vec());
        assert_eq!(m.history(DEFAULT_HISTORY_LIMIT).len(), 5);

        m.clear_history();
        assert!(m.history(DEFAULT_HISTORY_LIMIT).is_empty());
    }

    #[test]
    fn test_shared_suggestion_listed_once() {
        let obs = WeatherObservation::default()
            .with_wind_speed(45.0)
            .with_precipitation(60.0);
        let set = HazardClassifier::new().classify(&obs, None);
        assert_eq!(set.len(), 2);

        let mut m = manager();
        let outcome = m.issue_alert(&set);
        let b = outcome.bulletin().unwrap();
        let shared = b
            .suggestions
            .iter()
            .filter(|s| s.as_str() == "Follow official warning updates")
            .count();
        assert_eq!(shared, 1);
        assert_eq!(b.suggestions.len(), 9);
        assert_eq!(b.level, AlertLevel::Red);
    }

    #[test]
    fn test_empty_report() {
        let report = manager().generate_report(None, None);
        assert!(report.is_empty());
        assert_eq!(report.total_alerts(), 0);
    }

    #[test]
    fn test_report_distributions() {
        let mut m = manager();
        m.issue_alert(&DetectionSet::new(vec![snow(3)]));
        m.issue_alert(&DetectionSet::new(vec![snow(2), snow(4)]));

        match m.generate_report(Some("2024-07-01"), None) {
            AlertReport::Summary {
                total_alerts,
                level_distribution,
                event_distribution,
                period,
                ..
            } => {
                assert_eq!(total_alerts, 2);
                assert_eq!(level_distribution["Orange Alert (Severe)"], 1);
                assert_eq!(level_distribution["Red Alert (Extremely Severe)"], 1);
                assert_eq!(event_distribution["Heavy Snow"], 3);
                assert_eq!(period.start, "2024-07-01");
                assert_eq!(period.end, "end");
            }
            other => panic!("unexpected report: {:?}", other),
        }
    }

    #[test]
    fn test_persisted_bulletin_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let config = AlertConfig {
            enable_console: false,
            output_dir: dir.path().to_path_buf(),
            ..AlertConfig::default()
        };
        let mut m = AlertManager::new(config);
        let outcome = m.issue_alert(&DetectionSet::new(vec![snow(3), snow(2)]));
        let b = outcome.bulletin().unwrap();

        let reloaded = load_bulletin(dir.path().join(format!("{}.json", b.id))).unwrap();
        assert_eq!(reloaded.level, b.level);
        assert_eq!(reloaded.events.len(), 2);
        assert_eq!(reloaded.message, b.message);

        let text = std::fs::read_to_string(dir.path().join(format!("{}.txt", b.id))).unwrap();
        assert_eq!(text, b.message);
    }

    struct BrokenSink;

    impl AlertSink for BrokenSink {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn publish(&self, _bulletin: &AlertBulletin) -> Result<(), AlertError> {
            Err(AlertError::Sink {
                sink: "broken",
                reason: "unreachable".to_string(),
            })
        }
    }

    #[test]
    fn test_sink_failure_does_not_propagate() {
        let mut m = manager();
        m.add_sink(Box::new(BrokenSink));
        assert!(m.issue_alert(&DetectionSet::new(vec![snow(2)])).issued());
        assert_eq!(m.history_len(), 1);
    }
}
