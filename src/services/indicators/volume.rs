//! Volume ratio indicator.

use crate::services::series;

/// Current volume relative to its SMA.
///
/// Reads 1.0 when history is shorter than the period or the average volume
/// is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeRatio {
    period: usize,
}

impl Default for VolumeRatio {
    fn default() -> Self {
        Self { period: 20 }
    }
}

impl VolumeRatio {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn latest(&self, volume: &[f64]) -> f64 {
        let Some(&current) = volume.last() else {
            return 1.0;
        };
        if volume.len() < self.period {
            return 1.0;
        }

        let average = series::mean(&volume[volume.len() - self.period..]);
        if average > 0.0 {
            current / average
        } else {
            1.0
        }
    }
}
