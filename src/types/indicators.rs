use serde::{Deserialize, Serialize};

/// Point-in-time indicator readings for the last bar of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Last close.
    pub price: f64,
    pub sma_20: f64,
    pub sma_50: f64,
    pub ema_12: f64,
    /// Relative Strength Index (0-100).
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
    pub bb_upper: f64,
    pub bb_middle: f64,
    pub bb_lower: f64,
    /// Price position within the Bollinger envelope, 0.5 when the bands collapse.
    pub bb_position: f64,
    /// Stochastic %K (0-100).
    pub stoch_k: f64,
    /// Stochastic %D.
    pub stoch_d: f64,
    /// Current volume over its SMA. Absent when no volume series was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_ratio: Option<f64>,
}

impl IndicatorSnapshot {
    /// Volume ratio, 1.0 when no volume series was supplied.
    pub fn volume_ratio_or_default(&self) -> f64 {
        self.volume_ratio.unwrap_or(1.0)
    }

    /// Named readings in a fixed order.
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        let mut entries = vec![
            ("price", self.price),
            ("sma_20", self.sma_20),
            ("sma_50", self.sma_50),
            ("ema_12", self.ema_12),
            ("rsi", self.rsi),
            ("macd", self.macd),
            ("macd_signal", self.macd_signal),
            ("macd_histogram", self.macd_histogram),
            ("bb_upper", self.bb_upper),
            ("bb_middle", self.bb_middle),
            ("bb_lower", self.bb_lower),
            ("bb_position", self.bb_position),
            ("stoch_k", self.stoch_k),
            ("stoch_d", self.stoch_d),
        ];
        if let Some(ratio) = self.volume_ratio {
            entries.push(("volume_ratio", ratio));
        }
        entries
    }

    /// Look up a reading by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Scale-free features handed to external multivariate scorers.
    ///
    /// Order: rsi, macd_histogram / price, bb_position, stoch_k, stoch_d,
    /// price / sma_20 - 1, volume ratio.
    pub fn feature_vector(&self) -> Vec<f64> {
        let histogram_pct = if self.price != 0.0 {
            self.macd_histogram / self.price
        } else {
            0.0
        };
        let trend_gap = if self.sma_20 != 0.0 {
            self.price / self.sma_20 - 1.0
        } else {
            0.0
        };
        vec![
            self.rsi,
            histogram_pct,
            self.bb_position,
            self.stoch_k,
            self.stoch_d,
            trend_gap,
            self.volume_ratio_or_default(),
        ]
    }
}
