//! Relative Strength Index (RSI) indicator.

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold
/// - Above 70: Overbought
///
/// Averages are seeded with the mean gain/loss of the first window and then
/// smoothed Wilder-style. When fewer than `period` price changes exist the
/// seed window shrinks to whatever is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Minimum closes for a full seed window.
    pub fn min_periods(&self) -> usize {
        self.period + 1
    }

    /// RSI from the seed bar onward.
    ///
    /// The first value belongs to bar `min(period, len - 1)`. Empty for fewer
    /// than two closes.
    pub fn series(&self, closes: &[f64]) -> Vec<f64> {
        if closes.len() < 2 {
            return Vec::new();
        }

        let mut gains = Vec::with_capacity(closes.len() - 1);
        let mut losses = Vec::with_capacity(closes.len() - 1);
        for w in closes.windows(2) {
            let change = w[1] - w[0];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        let seed = self.period.min(gains.len()).max(1);
        let mut avg_gain = gains[..seed].iter().sum::<f64>() / seed as f64;
        let mut avg_loss = losses[..seed].iter().sum::<f64>() / seed as f64;

        let mut out = Vec::with_capacity(gains.len() - seed + 1);
        out.push(Self::rsi_value(avg_gain, avg_loss));

        let period = self.period as f64;
        for i in seed..gains.len() {
            avg_gain = (avg_gain * (period - 1.0) + gains[i]) / period;
            avg_loss = (avg_loss * (period - 1.0) + losses[i]) / period;
            out.push(Self::rsi_value(avg_gain, avg_loss));
        }

        out
    }

    pub fn latest(&self, closes: &[f64]) -> Option<f64> {
        self.series(closes).last().copied()
    }

    fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            return 100.0;
        }
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }
}
