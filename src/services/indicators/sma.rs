//! Simple Moving Average (SMA) indicator.

use crate::services::series;

/// SMA (Simple Moving Average) indicator.
///
/// Average close over a fixed window. Only full windows produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// SMA for every full window, aligned to the window's last bar.
    pub fn series(&self, closes: &[f64]) -> Vec<f64> {
        series::rolling_mean(closes, self.period)
    }

    /// SMA of the most recent window, `None` when history is shorter than the period.
    pub fn latest(&self, closes: &[f64]) -> Option<f64> {
        if closes.len() < self.period {
            return None;
        }
        Some(series::mean(&closes[closes.len() - self.period..]))
    }
}
