//! Bollinger Bands indicator.

use crate::services::series;

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20), left-padded with its first value so the series
///   lines up with the closes
/// - Upper band: middle + 2 * rolling StdDev(20)
/// - Lower band: middle - 2 * rolling StdDev(20)
///
/// With fewer closes than the period the middle band averages every close
/// available and the deviation uses the partial prefix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

/// Full band series, aligned with the closes.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Band values for one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerReading {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    /// %B clamped to [0, 1]; 0.5 when the bands collapse.
    pub position: f64,
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn series(&self, closes: &[f64]) -> BollingerSeries {
        if closes.is_empty() {
            return BollingerSeries {
                upper: Vec::new(),
                middle: Vec::new(),
                lower: Vec::new(),
            };
        }

        let window = self.period.min(closes.len());
        let middle = series::pad_left(&series::rolling_mean(closes, window), closes.len());
        let std = series::rolling_std(closes, self.period);

        let upper = middle
            .iter()
            .zip(std.iter())
            .map(|(m, s)| m + self.std_dev_multiplier * s)
            .collect();
        let lower = middle
            .iter()
            .zip(std.iter())
            .map(|(m, s)| m - self.std_dev_multiplier * s)
            .collect();

        BollingerSeries {
            upper,
            middle,
            lower,
        }
    }

    pub fn latest(&self, closes: &[f64]) -> Option<BollingerReading> {
        let price = *closes.last()?;
        let bands = self.series(closes);
        let upper = *bands.upper.last()?;
        let middle = *bands.middle.last()?;
        let lower = *bands.lower.last()?;

        Some(BollingerReading {
            upper,
            middle,
            lower,
            position: Self::position(price, upper, lower),
        })
    }

    /// %B = (price - lower) / (upper - lower), clamped to [0, 1].
    pub fn position(price: f64, upper: f64, lower: f64) -> f64 {
        let band_width = upper - lower;
        if band_width == 0.0 {
            return 0.5;
        }
        ((price - lower) / band_width).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bollinger_flat_series_collapses() {
        let reading = BollingerBands::default().latest(&[10.0; 30]).unwrap();
        assert_eq!(reading.upper, reading.lower);
        assert_eq!(reading.position, 0.5);
    }

    #[test]
    fn test_bollinger_middle_left_padded() {
        let closes: Vec<f64> = (0..25).map(|i| i as f64).collect();
        let bands = BollingerBands::default().series(&closes);
        assert_eq!(bands.middle.len(), 25);
        // First SMA(20) covers 0..=19, mean 9.5, repeated over the first 20 bars.
        for value in &bands.middle[..20] {
            assert_eq!(*value, 9.5);
        }
        assert_eq!(bands.middle[24], 14.5);
    }

    #[test]
    fn test_bollinger_short_history() {
        let reading = BollingerBands::default().latest(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(reading.middle, 2.0);
        assert!(reading.upper > reading.middle);
        assert!(reading.lower < reading.middle);
    }

    #[test]
    fn test_bollinger_bands_ordered() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64 * 0.4).sin() * 5.0).collect();
        let bands = BollingerBands::default().series(&closes);
        for i in 0..closes.len() {
            assert!(bands.upper[i] >= bands.middle[i]);
            assert!(bands.middle[i] >= bands.lower[i]);
        }
    }

    #[test]
    fn test_position_bounds() {
        assert_eq!(BollingerBands::position(5.0, 5.0, 5.0), 0.5);
        assert_eq!(BollingerBands::position(110.0, 105.0, 95.0), 1.0);
        assert_eq!(BollingerBands::position(90.0, 105.0, 95.0), 0.0);
        assert_eq!(BollingerBands::position(100.0, 105.0, 95.0), 0.5);
    }
}
