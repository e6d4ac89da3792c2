//! Large transaction ("whale") detection.

use super::tiers::whale_alert;
use crate::services::series;
use crate::types::WhaleReport;
use tracing::{debug, warn};

/// Flags transactions larger than a percentile of the observed sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhaleDetector {
    /// Percentile in [0, 100].
    percentile: f64,
    /// Trailing share of the sequence treated as recent.
    recent_fraction: f64,
}

impl Default for WhaleDetector {
    fn default() -> Self {
        Self {
            percentile: 95.0,
            recent_fraction: 0.1,
        }
    }
}

impl WhaleDetector {
    pub fn new(percentile: f64, recent_fraction: f64) -> Self {
        Self {
            percentile,
            recent_fraction,
        }
    }

    /// Size of the trailing window counted as recent activity (at least 1).
    pub fn recent_window(&self, len: usize) -> usize {
        ((len as f64 * self.recent_fraction).floor() as usize).max(1)
    }

    /// Analyze transaction sizes. Empty input yields an empty report.
    pub fn detect(&self, sizes: &[f64]) -> WhaleReport {
        if sizes.is_empty() {
            warn!("No transactions supplied, skipping whale detection");
            return WhaleReport::empty();
        }

        let whale_threshold = series::percentile(sizes, self.percentile);
        let whales: Vec<f64> = sizes
            .iter()
            .copied()
            .filter(|size| *size > whale_threshold)
            .collect();

        let total_value: f64 = sizes.iter().sum();
        let whale_value: f64 = whales.iter().sum();
        let whale_percentage = if total_value > 0.0 {
            whale_value / total_value * 100.0
        } else {
            0.0
        };

        let recent = &sizes[sizes.len() - self.recent_window(sizes.len()).min(sizes.len())..];
        let recent_whale_count = recent.iter().filter(|size| **size > whale_threshold).count();

        let largest_transaction = sizes.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        debug!(
            "Whale threshold {:.4} over {} transactions: {} whales, {} recent",
            whale_threshold,
            sizes.len(),
            whales.len(),
            recent_whale_count
        );

        WhaleReport {
            whale_detected: recent_whale_count > 0,
            whale_count: whales.len(),
            recent_whale_count,
            whale_threshold,
            whale_percentage,
            average_whale_size: series::mean(&whales),
            largest_transaction,
            alert_level: whale_alert().classify(recent_whale_count as f64),
        }
    }
}
