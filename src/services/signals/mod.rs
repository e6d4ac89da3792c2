//! Trading signal synthesis.
//!
//! Each rule in [`rules`] casts a weighted vote on the latest indicator
//! snapshot. Votes are tallied per side and the strictly highest side wins;
//! any tie resolves to hold.

pub mod rules;

pub use rules::{all_rules, Rule};

use crate::error::{AnalysisError, Result};
use crate::services::indicators::IndicatorEngine;
use crate::types::{Bar, IndicatorSnapshot, SeriesView, SignalKind, SignalResult, Vote, VoteSide};
use tracing::debug;

/// Winning buy/sell score above which the signal is strong.
pub const STRONG_SIGNAL_SCORE: f64 = 6.0;
/// Confidence ceiling.
pub const MAX_CONFIDENCE: f64 = 0.95;
/// Confidence reported when no rule contributed any weight.
pub const DEFAULT_CONFIDENCE: f64 = 0.33;
/// Votes heavier than this are quoted as reasons.
pub const REASON_MIN_WEIGHT: f64 = 0.5;

/// Per-side vote totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Tally {
    buy: f64,
    sell: f64,
    hold: f64,
}

impl Tally {
    fn add(&mut self, side: VoteSide, weight: f64) {
        match side {
            VoteSide::Buy => self.buy += weight,
            VoteSide::Sell => self.sell += weight,
            VoteSide::Hold => self.hold += weight,
            VoteSide::Confirm => {}
        }
    }

    /// Side with a strictly highest score, None on any tie for first.
    fn leader(&self) -> Option<VoteSide> {
        if self.buy > self.sell && self.buy > self.hold {
            Some(VoteSide::Buy)
        } else if self.sell > self.buy && self.sell > self.hold {
            Some(VoteSide::Sell)
        } else if self.hold > self.buy && self.hold > self.sell {
            Some(VoteSide::Hold)
        } else {
            None
        }
    }

    fn total(&self) -> f64 {
        self.buy + self.sell + self.hold
    }

    fn max(&self) -> f64 {
        self.buy.max(self.sell).max(self.hold)
    }
}

/// Turns bar history into a trading signal.
///
/// `analyze` stores the latest snapshot; `synthesize` reduces the rule votes
/// over it. The stored snapshot is the only state kept between calls.
pub struct SignalSynthesizer {
    engine: IndicatorEngine,
    rules: Vec<Box<dyn Rule>>,
    last_snapshot: Option<IndicatorSnapshot>,
}

impl Default for SignalSynthesizer {
    fn default() -> Self {
        Self::new(IndicatorEngine::default())
    }
}

impl SignalSynthesizer {
    pub fn new(engine: IndicatorEngine) -> Self {
        Self {
            engine,
            rules: all_rules(),
            last_snapshot: None,
        }
    }

    pub fn engine(&self) -> &IndicatorEngine {
        &self.engine
    }

    pub fn last_snapshot(&self) -> Option<&IndicatorSnapshot> {
        self.last_snapshot.as_ref()
    }

    /// Compute and store the snapshot for the last bar of `input`.
    ///
    /// A failed computation clears any previously stored snapshot.
    pub fn analyze(&mut self, input: SeriesView<'_>) -> Result<&IndicatorSnapshot> {
        self.last_snapshot = None;
        let snapshot = self.engine.compute(input)?;
        Ok(&*self.last_snapshot.insert(snapshot))
    }

    pub fn analyze_bars(&mut self, bars: &[Bar]) -> Result<&IndicatorSnapshot> {
        self.last_snapshot = None;
        let snapshot = self.engine.compute_bars(bars)?;
        Ok(&*self.last_snapshot.insert(snapshot))
    }

    /// Signal for the stored snapshot.
    pub fn synthesize(&self) -> Result<SignalResult> {
        self.last_snapshot
            .as_ref()
            .map(|snapshot| self.synthesize_from(snapshot))
            .ok_or(AnalysisError::NotAnalyzed)
    }

    /// Signal for an arbitrary snapshot.
    pub fn synthesize_from(&self, snapshot: &IndicatorSnapshot) -> SignalResult {
        let votes: Vec<Vote> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(snapshot))
            .collect();

        let mut tally = Tally::default();
        for vote in &votes {
            tally.add(vote.side, vote.weight);
        }

        // Confirmation only reinforces a side that already leads outright.
        let confirmation: f64 = votes
            .iter()
            .filter(|vote| vote.side == VoteSide::Confirm)
            .map(|vote| vote.weight)
            .sum();
        if confirmation > 0.0 {
            if let Some(side) = tally.leader() {
                tally.add(side, confirmation);
            }
        }

        let signal = match tally.leader() {
            Some(VoteSide::Buy) if tally.buy > STRONG_SIGNAL_SCORE => SignalKind::StrongBuy,
            Some(VoteSide::Buy) => SignalKind::Buy,
            Some(VoteSide::Sell) if tally.sell > STRONG_SIGNAL_SCORE => SignalKind::StrongSell,
            Some(VoteSide::Sell) => SignalKind::Sell,
            _ => SignalKind::Hold,
        };

        let total = tally.total();
        let confidence = if total > 0.0 {
            (tally.max() / total).min(MAX_CONFIDENCE)
        } else {
            DEFAULT_CONFIDENCE
        };

        let reasons = votes
            .iter()
            .filter(|vote| vote.weight > REASON_MIN_WEIGHT)
            .map(|vote| vote.reason.clone())
            .collect();

        debug!(
            "Signal {} (buy={:.2} sell={:.2} hold={:.2}, confidence {:.2})",
            signal.label(),
            tally.buy,
            tally.sell,
            tally.hold,
            confidence
        );

        SignalResult {
            signal,
            confidence,
            buy_score: tally.buy,
            sell_score: tally.sell,
            hold_score: tally.hold,
            reasons,
            votes,
            indicators: snapshot.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_buy_snapshot() -> IndicatorSnapshot {
        IndicatorSnapshot {
            price: 110.0,
            sma_20: 100.0,
            sma_50: 95.0,
            ema_12: 105.0,
            rsi: 20.0,
            macd: 1.0,
            macd_signal: 0.5,
            macd_histogram: 0.5,
            bb_upper: 120.0,
            bb_middle: 110.0,
            bb_lower: 100.0,
            bb_position: 0.05,
            stoch_k: 10.0,
            stoch_d: 12.0,
            volume_ratio: None,
        }
    }

    fn all_sell_snapshot() -> IndicatorSnapshot {
        IndicatorSnapshot {
            price: 90.0,
            ema_12: 95.0,
            rsi: 80.0,
            macd: -1.0,
            macd_signal: -0.5,
            macd_histogram: -0.5,
            bb_position: 0.95,
            stoch_k: 90.0,
            ..all_buy_snapshot()
        }
    }

    /// buy 2.5 (rsi 1.0 + bollinger 1.5) vs sell 2.5 (macd 1.5 + trend 1.0).
    fn tied_snapshot() -> IndicatorSnapshot {
        IndicatorSnapshot {
            price: 90.0,
            ema_12: 95.0,
            rsi: 35.0,
            macd: -1.0,
            macd_signal: -0.5,
            macd_histogram: -0.5,
            bb_position: 0.05,
            stoch_k: 50.0,
            ..all_buy_snapshot()
        }
    }

    #[test]
    fn test_all_buy_is_strong_buy() {
        let result = SignalSynthesizer::default().synthesize_from(&all_buy_snapshot());
        assert_eq!(result.signal, SignalKind::StrongBuy);
        assert!((result.buy_score - 7.2).abs() < 1e-12);
        assert_eq!(result.sell_score, 0.0);
        assert_eq!(result.hold_score, 0.0);
        assert!((result.confidence - 0.95).abs() < 1e-12);
        assert_eq!(result.reasons.len(), 5);
        assert_eq!(result.reasons[0], "RSI oversold");
    }

    #[test]
    fn test_all_sell_is_strong_sell() {
        let result = SignalSynthesizer::default().synthesize_from(&all_sell_snapshot());
        assert_eq!(result.signal, SignalKind::StrongSell);
        assert!((result.sell_score - 7.2).abs() < 1e-12);
    }

    #[test]
    fn test_tie_resolves_to_hold() {
        let result = SignalSynthesizer::default().synthesize_from(&tied_snapshot());
        assert_eq!(result.signal, SignalKind::Hold);
        assert!((result.buy_score - 2.5).abs() < 1e-12);
        assert!((result.sell_score - 2.5).abs() < 1e-12);
        assert!((result.hold_score - 0.3).abs() < 1e-12);
        assert!((result.confidence - 2.5 / 5.3).abs() < 1e-12);
    }

    #[test]
    fn test_volume_confirmation_never_breaks_tie() {
        let snapshot = IndicatorSnapshot {
            volume_ratio: Some(3.0),
            ..tied_snapshot()
        };
        let result = SignalSynthesizer::default().synthesize_from(&snapshot);
        assert_eq!(result.signal, SignalKind::Hold);
        assert!((result.buy_score - 2.5).abs() < 1e-12);
        assert!((result.sell_score - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_volume_confirmation_reinforces_leader() {
        let snapshot = IndicatorSnapshot {
            volume_ratio: Some(2.0),
            ..all_buy_snapshot()
        };
        let result = SignalSynthesizer::default().synthesize_from(&snapshot);
        assert!((result.buy_score - 7.7).abs() < 1e-12);
        assert_eq!(result.votes.len(), 6);
        assert_eq!(result.votes[5].side, VoteSide::Confirm);
        // 0.5 is not above the reason cutoff
        assert_eq!(result.reasons.len(), 5);
    }

    #[test]
    fn test_confirmation_can_promote_to_strong() {
        // buy 6.0 without volume: rsi 2.0 + macd 1.5 + bollinger 1.5 + trend 1.0
        let snapshot = IndicatorSnapshot {
            stoch_k: 50.0,
            ..all_buy_snapshot()
        };
        let synthesizer = SignalSynthesizer::default();
        assert_eq!(synthesizer.synthesize_from(&snapshot).signal, SignalKind::Buy);

        let loud = IndicatorSnapshot {
            volume_ratio: Some(2.0),
            ..snapshot
        };
        assert_eq!(synthesizer.synthesize_from(&loud).signal, SignalKind::StrongBuy);
    }

    #[test]
    fn test_neutral_snapshot_holds() {
        let snapshot = IndicatorSnapshot {
            price: 100.0,
            sma_20: 100.0,
            ema_12: 100.0,
            rsi: 50.0,
            macd: 0.0,
            macd_signal: 0.0,
            macd_histogram: 0.0,
            bb_position: 0.5,
            stoch_k: 50.0,
            ..all_buy_snapshot()
        };
        let result = SignalSynthesizer::default().synthesize_from(&snapshot);
        assert_eq!(result.signal, SignalKind::Hold);
        assert!((result.hold_score - 2.1).abs() < 1e-12);
        assert!((result.confidence - 0.95).abs() < 1e-12);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_synthesize_requires_analyze() {
        let synthesizer = SignalSynthesizer::default();
        assert!(matches!(
            synthesizer.synthesize(),
            Err(AnalysisError::NotAnalyzed)
        ));
    }

    #[test]
    fn test_failed_analyze_clears_snapshot() {
        let mut synthesizer = SignalSynthesizer::default();
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        synthesizer.analyze(SeriesView::closes(&closes)).unwrap();
        assert!(synthesizer.synthesize().is_ok());

        assert!(synthesizer.analyze(SeriesView::closes(&[1.0])).is_err());
        assert!(synthesizer.last_snapshot().is_none());
        assert!(matches!(
            synthesizer.synthesize(),
            Err(AnalysisError::NotAnalyzed)
        ));
    }

    #[test]
    fn test_analyze_then_synthesize_uptrend() {
        let mut synthesizer = SignalSynthesizer::default();
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 2.0).collect();
        let snapshot = synthesizer.analyze(SeriesView::closes(&closes)).unwrap().clone();
        assert_eq!(snapshot.rsi, 100.0);

        let result = synthesizer.synthesize().unwrap();
        assert_eq!(result.indicators, snapshot);
        assert!(result.sell_score > result.buy_score);
    }
}
