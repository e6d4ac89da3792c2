//! Volume spike detection.

use super::tiers::volume_severity;
use crate::error::{AnalysisError, Result};
use crate::services::series;
use crate::types::{VolumeAnomalyReport, VolumeSpike};
use tracing::debug;

/// Flags volumes whose z-score against the whole window exceeds a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeAnomalyDetector {
    threshold: f64,
    sensitivity: f64,
    max_listed: usize,
}

impl Default for VolumeAnomalyDetector {
    fn default() -> Self {
        Self {
            threshold: 2.5,
            sensitivity: 0.95,
            max_listed: 3,
        }
    }
}

impl VolumeAnomalyDetector {
    pub fn new(threshold: f64, sensitivity: f64, max_listed: usize) -> Self {
        Self {
            threshold,
            sensitivity,
            max_listed,
        }
    }

    /// Detect volume spikes. Needs at least one volume.
    pub fn detect(&self, volumes: &[f64]) -> Result<VolumeAnomalyReport> {
        let Some(&current) = volumes.last() else {
            return Err(AnalysisError::insufficient("volume anomalies", 1, 0));
        };

        let mean_volume = series::mean(volumes);
        let ratio_to_mean = |volume: f64| {
            if mean_volume != 0.0 {
                volume / mean_volume
            } else {
                1.0
            }
        };
        let current_ratio = ratio_to_mean(current);

        let Some(z_scores) = series::z_scores(volumes) else {
            debug!("Constant volume over {} bars, no spike", volumes.len());
            return Ok(VolumeAnomalyReport::quiet(current_ratio));
        };

        let spikes: Vec<VolumeSpike> = z_scores
            .iter()
            .enumerate()
            .filter(|(_, z)| **z > self.threshold)
            .map(|(index, &z_score)| VolumeSpike {
                index,
                volume: volumes[index],
                ratio: ratio_to_mean(volumes[index]),
                z_score,
            })
            .collect();

        let current_z_score = z_scores[z_scores.len() - 1];
        let spike_count = spikes.len();
        let skip = spike_count.saturating_sub(self.max_listed);

        Ok(VolumeAnomalyReport {
            has_spike: current_z_score > self.threshold * self.sensitivity,
            current_ratio,
            current_z_score,
            spike_count,
            recent_spikes: spikes.into_iter().skip(skip).collect(),
            severity: volume_severity().classify(current_ratio),
        })
    }
}
