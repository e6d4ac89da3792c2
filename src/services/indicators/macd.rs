//! MACD (Moving Average Convergence Divergence) indicator.

use crate::services::series;

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
/// - Histogram = MACD Line - Signal Line
///
/// All EMAs are seeded with their first input, so every series is aligned
/// 1:1 with the closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// Full MACD series.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub fast_ema: Vec<f64>,
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// MACD values for one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdReading {
    pub fast_ema: f64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
        }
    }

    pub fn slow_period(&self) -> usize {
        self.slow_period
    }

    pub fn series(&self, closes: &[f64]) -> MacdSeries {
        let fast_ema = series::ema(closes, self.fast_period);
        let slow_ema = series::ema(closes, self.slow_period);

        let macd: Vec<f64> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect();
        let signal = series::ema(&macd, self.signal_period);
        let histogram = macd.iter().zip(signal.iter()).map(|(m, s)| m - s).collect();

        MacdSeries {
            fast_ema,
            macd,
            signal,
            histogram,
        }
    }

    pub fn latest(&self, closes: &[f64]) -> Option<MacdReading> {
        let series = self.series(closes);
        Some(MacdReading {
            fast_ema: *series.fast_ema.last()?,
            macd: *series.macd.last()?,
            signal: *series.signal.last()?,
            histogram: *series.histogram.last()?,
        })
    }
}
