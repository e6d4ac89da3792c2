//! Ordered threshold tables mapping a reading to a tier.

use crate::types::{AlertLevel, Severity, VolumeSeverity};

/// Ordered list of `(threshold, tier)` steps checked highest first.
///
/// A reading strictly greater than a step's threshold takes that step's tier;
/// anything else falls through to `floor`.
#[derive(Debug, Clone, PartialEq)]
pub struct TierTable<T> {
    steps: Vec<(f64, T)>,
    floor: T,
}

impl<T: Copy> TierTable<T> {
    /// Build a table; steps are sorted by descending threshold.
    pub fn new(mut steps: Vec<(f64, T)>, floor: T) -> Self {
        steps.sort_by(|a, b| b.0.total_cmp(&a.0));
        Self { steps, floor }
    }

    pub fn classify(&self, value: f64) -> T {
        self.steps
            .iter()
            .find(|(threshold, _)| value > *threshold)
            .map(|(_, tier)| *tier)
            .unwrap_or(self.floor)
    }
}

/// Price severity by |z|: high above 1.5x threshold, medium above threshold.
pub fn price_severity(threshold: f64) -> TierTable<Severity> {
    TierTable::new(
        vec![
            (threshold * 1.5, Severity::High),
            (threshold, Severity::Medium),
        ],
        Severity::Low,
    )
}

/// Volume severity by ratio to mean.
pub fn volume_severity() -> TierTable<VolumeSeverity> {
    TierTable::new(
        vec![
            (5.0, VolumeSeverity::Extreme),
            (3.0, VolumeSeverity::High),
            (2.0, VolumeSeverity::Medium),
        ],
        VolumeSeverity::Normal,
    )
}

/// Whale alert by recent whale count.
pub fn whale_alert() -> TierTable<AlertLevel> {
    TierTable::new(
        vec![
            (5.0, AlertLevel::Critical),
            (2.0, AlertLevel::High),
            (0.0, AlertLevel::Medium),
        ],
        AlertLevel::Normal,
    )
}

/// Overall risk alert by aggregated score.
pub fn risk_alert() -> TierTable<AlertLevel> {
    TierTable::new(
        vec![
            (0.7, AlertLevel::Critical),
            (0.5, AlertLevel::High),
            (0.3, AlertLevel::Medium),
        ],
        AlertLevel::Normal,
    )
}
