use serde::{Deserialize, Serialize};

/// Direction of an anomalous price return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    Spike,
    Drop,
}

impl AnomalyKind {
    pub fn from_z_score(z: f64) -> Self {
        if z > 0.0 {
            AnomalyKind::Spike
        } else {
            AnomalyKind::Drop
        }
    }
}

/// Severity of the current price move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// Severity of the current volume relative to its mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeSeverity {
    Normal,
    Medium,
    High,
    Extreme,
}

impl VolumeSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            VolumeSeverity::Normal => "normal",
            VolumeSeverity::Medium => "medium",
            VolumeSeverity::High => "high",
            VolumeSeverity::Extreme => "extreme",
        }
    }
}

/// Alert level shared by whale activity and the aggregated risk report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    #[default]
    Normal,
    Medium,
    High,
    Critical,
}

impl AlertLevel {
    pub fn label(&self) -> &'static str {
        match self {
            AlertLevel::Normal => "normal",
            AlertLevel::Medium => "medium",
            AlertLevel::High => "high",
            AlertLevel::Critical => "critical",
        }
    }
}

/// A single anomalous return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAnomaly {
    /// Index into the return series (the move from bar `index` to `index + 1`).
    pub index: usize,
    pub kind: AnomalyKind,
    /// Absolute z-score.
    pub magnitude: f64,
    /// Return in percent.
    pub return_pct: f64,
    /// Price at the end of the move.
    pub price: f64,
}

/// Price return anomaly report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAnomalyReport {
    /// Whether the most recent return itself is anomalous.
    pub has_anomaly: bool,
    pub current_z_score: f64,
    /// Total anomalies in the window.
    pub anomaly_count: usize,
    /// Most recent anomalies, oldest first.
    pub anomalies: Vec<PriceAnomaly>,
    pub severity: Severity,
}

impl PriceAnomalyReport {
    /// Neutral report for flat or too-short series.
    pub fn quiet() -> Self {
        Self {
            has_anomaly: false,
            current_z_score: 0.0,
            anomaly_count: 0,
            anomalies: Vec::new(),
            severity: Severity::Low,
        }
    }
}

/// A single volume spike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSpike {
    pub index: usize,
    pub volume: f64,
    /// Volume over the window mean.
    pub ratio: f64,
    pub z_score: f64,
}

/// Volume spike report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeAnomalyReport {
    /// Whether the most recent volume is a spike.
    pub has_spike: bool,
    pub current_ratio: f64,
    pub current_z_score: f64,
    pub spike_count: usize,
    /// Most recent spikes, oldest first.
    pub recent_spikes: Vec<VolumeSpike>,
    pub severity: VolumeSeverity,
}

impl VolumeAnomalyReport {
    /// Neutral report for constant volume.
    pub fn quiet(current_ratio: f64) -> Self {
        Self {
            has_spike: false,
            current_ratio,
            current_z_score: 0.0,
            spike_count: 0,
            recent_spikes: Vec::new(),
            severity: VolumeSeverity::Normal,
        }
    }
}

/// Large transaction ("whale") activity report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhaleReport {
    /// Whether any whale transaction falls in the recent window.
    pub whale_detected: bool,
    pub whale_count: usize,
    pub recent_whale_count: usize,
    /// Transaction size at the configured percentile.
    pub whale_threshold: f64,
    /// Share of total value moved by whale transactions, in percent.
    pub whale_percentage: f64,
    pub average_whale_size: f64,
    pub largest_transaction: f64,
    pub alert_level: AlertLevel,
}

impl WhaleReport {
    /// Report for an empty transaction set.
    pub fn empty() -> Self {
        Self {
            whale_detected: false,
            whale_count: 0,
            recent_whale_count: 0,
            whale_threshold: 0.0,
            whale_percentage: 0.0,
            average_whale_size: 0.0,
            largest_transaction: 0.0,
            alert_level: AlertLevel::Normal,
        }
    }
}
