//! Exponential Moving Average (EMA) indicator.

use crate::services::series;

/// EMA (Exponential Moving Average) indicator.
///
/// Like SMA but gives more weight to recent prices. Seeded with the first
/// close, so every bar has a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn series(&self, values: &[f64]) -> Vec<f64> {
        series::ema(values, self.period)
    }

    pub fn latest(&self, values: &[f64]) -> Option<f64> {
        self.series(values).last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_tracks_uptrend_with_lag() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let ema = Ema::new(12).latest(&closes).unwrap();
        assert!(ema < 149.0);
        assert!(ema > 130.0);
    }

    #[test]
    fn test_ema_single_value() {
        assert_eq!(Ema::new(12).latest(&[42.0]), Some(42.0));
        assert_eq!(Ema::new(12).latest(&[]), None);
    }
}
