//! Voting rules over an indicator snapshot.

use crate::types::{IndicatorSnapshot, Vote, VoteSide};

/// A rule reads one aspect of the snapshot and casts a vote.
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule.
    fn id(&self) -> &str;

    /// Vote for the snapshot, or None to abstain.
    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> Option<Vote>;
}

/// RSI oversold/overbought zones.
pub struct RsiRule;

impl Rule for RsiRule {
    fn id(&self) -> &str {
        "rsi"
    }

    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> Option<Vote> {
        let rsi = snapshot.rsi;
        let vote = if rsi < 30.0 {
            Vote::buy(self.id(), 2.0, "RSI oversold")
        } else if rsi < 40.0 {
            Vote::buy(self.id(), 1.0, "RSI approaching oversold")
        } else if rsi > 70.0 {
            Vote::sell(self.id(), 2.0, "RSI overbought")
        } else if rsi > 60.0 {
            Vote::sell(self.id(), 1.0, "RSI approaching overbought")
        } else {
            Vote::hold(self.id(), 0.5, "RSI neutral")
        };
        Some(vote)
    }
}

/// MACD line against its signal line, confirmed by the histogram.
pub struct MacdRule;

impl Rule for MacdRule {
    fn id(&self) -> &str {
        "macd"
    }

    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> Option<Vote> {
        let (macd, signal, histogram) = (
            snapshot.macd,
            snapshot.macd_signal,
            snapshot.macd_histogram,
        );
        let vote = if macd > signal && histogram > 0.0 {
            Vote::buy(self.id(), 1.5, "MACD bullish crossover")
        } else if macd < signal && histogram < 0.0 {
            Vote::sell(self.id(), 1.5, "MACD bearish crossover")
        } else {
            Vote::hold(self.id(), 0.5, "MACD neutral")
        };
        Some(vote)
    }
}

/// Price position inside the Bollinger envelope.
pub struct BollingerRule;

impl Rule for BollingerRule {
    fn id(&self) -> &str {
        "bollinger"
    }

    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> Option<Vote> {
        let position = snapshot.bb_position;
        let vote = if position < 0.1 {
            Vote::buy(self.id(), 1.5, "Price near lower Bollinger Band")
        } else if position < 0.3 {
            Vote::buy(self.id(), 0.8, "Price below middle Bollinger Band")
        } else if position > 0.9 {
            Vote::sell(self.id(), 1.5, "Price near upper Bollinger Band")
        } else if position > 0.7 {
            Vote::sell(self.id(), 0.8, "Price above middle Bollinger Band")
        } else {
            Vote::hold(self.id(), 0.5, "Price in Bollinger Band middle")
        };
        Some(vote)
    }
}

/// Stochastic %K extremes.
pub struct StochasticRule;

impl Rule for StochasticRule {
    fn id(&self) -> &str {
        "stochastic"
    }

    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> Option<Vote> {
        let k = snapshot.stoch_k;
        let vote = if k < 20.0 {
            Vote::buy(self.id(), 1.2, "Stochastic oversold")
        } else if k > 80.0 {
            Vote::sell(self.id(), 1.2, "Stochastic overbought")
        } else {
            Vote::hold(self.id(), 0.3, "Stochastic neutral")
        };
        Some(vote)
    }
}

/// Price and fast EMA relative to the 20-period SMA.
pub struct TrendRule;

impl Rule for TrendRule {
    fn id(&self) -> &str {
        "trend"
    }

    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> Option<Vote> {
        let vote = if snapshot.price > snapshot.sma_20 && snapshot.ema_12 > snapshot.sma_20 {
            Vote::buy(self.id(), 1.0, "Price above moving averages")
        } else if snapshot.price < snapshot.sma_20 && snapshot.ema_12 < snapshot.sma_20 {
            Vote::sell(self.id(), 1.0, "Price below moving averages")
        } else {
            Vote::hold(self.id(), 0.3, "Mixed moving average signals")
        };
        Some(vote)
    }
}

/// High relative volume confirms whichever side already leads.
///
/// Abstains when no volume ratio is available or the ratio is unremarkable.
pub struct VolumeConfirmation {
    min_ratio: f64,
}

impl Default for VolumeConfirmation {
    fn default() -> Self {
        Self { min_ratio: 1.5 }
    }
}

impl Rule for VolumeConfirmation {
    fn id(&self) -> &str {
        "volume"
    }

    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> Option<Vote> {
        snapshot
            .volume_ratio
            .filter(|ratio| *ratio > self.min_ratio)
            .map(|_| Vote::new(self.id(), VoteSide::Confirm, 0.5, "High volume confirmation"))
    }
}

/// Rules in evaluation order.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(RsiRule),
        Box::new(MacdRule),
        Box::new(BollingerRule),
        Box::new(StochasticRule),
        Box::new(TrendRule),
        Box::new(VolumeConfirmation::default()),
    ]
}
