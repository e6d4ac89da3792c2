//! Stochastic Oscillator indicator.

use crate::services::series;

/// Stochastic Oscillator.
///
/// Compares closing price to price range over a period:
/// %K = (Current Close - Lowest Low) / (Highest High - Lowest Low) * 100
/// %D = EMA(%K, 3)
///
/// A zero range reads as 50. Bars before a full lookback use every bar seen
/// so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
        }
    }
}

/// %K and %D series aligned with the closes.
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticSeries {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochasticReading {
    pub k: f64,
    pub d: f64,
}

impl Stochastic {
    pub fn new(k_period: usize, d_period: usize) -> Self {
        Self { k_period, d_period }
    }

    pub fn k_period(&self) -> usize {
        self.k_period
    }

    pub fn series(&self, high: &[f64], low: &[f64], close: &[f64]) -> StochasticSeries {
        let len = close.len().min(high.len()).min(low.len());
        let lookback = self.k_period.max(1);

        let k: Vec<f64> = (0..len)
            .map(|i| {
                let start = (i + 1).saturating_sub(lookback);
                let highest_high = high[start..=i]
                    .iter()
                    .copied()
                    .fold(f64::NEG_INFINITY, f64::max);
                let lowest_low = low[start..=i].iter().copied().fold(f64::INFINITY, f64::min);

                if highest_high != lowest_low {
                    100.0 * (close[i] - lowest_low) / (highest_high - lowest_low)
                } else {
                    50.0
                }
            })
            .collect();
        let d = series::ema(&k, self.d_period);

        StochasticSeries { k, d }
    }

    pub fn latest(&self, high: &[f64], low: &[f64], close: &[f64]) -> Option<StochasticReading> {
        let series = self.series(high, low, close);
        Some(StochasticReading {
            k: *series.k.last()?,
            d: *series.d.last()?,
        })
    }
}
