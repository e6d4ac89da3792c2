use super::indicators::IndicatorSnapshot;
use serde::{Deserialize, Serialize};

/// Synthesized trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl SignalKind {
    /// Get display label for this signal.
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::StrongBuy => "Strong Buy",
            SignalKind::Buy => "Buy",
            SignalKind::Hold => "Hold",
            SignalKind::Sell => "Sell",
            SignalKind::StrongSell => "Strong Sell",
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, SignalKind::StrongBuy | SignalKind::Buy)
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, SignalKind::StrongSell | SignalKind::Sell)
    }
}

/// Side a rule votes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteSide {
    Buy,
    Sell,
    Hold,
    /// Non-voting confirmation of whichever side leads.
    Confirm,
}

/// A single rule's vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    /// Rule that produced the vote.
    pub rule: String,
    pub side: VoteSide,
    pub weight: f64,
    /// Human-readable reason.
    pub reason: String,
}

impl Vote {
    pub fn new(rule: &str, side: VoteSide, weight: f64, reason: &str) -> Self {
        Self {
            rule: rule.to_string(),
            side,
            weight,
            reason: reason.to_string(),
        }
    }

    pub fn buy(rule: &str, weight: f64, reason: &str) -> Self {
        Self::new(rule, VoteSide::Buy, weight, reason)
    }

    pub fn sell(rule: &str, weight: f64, reason: &str) -> Self {
        Self::new(rule, VoteSide::Sell, weight, reason)
    }

    pub fn hold(rule: &str, weight: f64, reason: &str) -> Self {
        Self::new(rule, VoteSide::Hold, weight, reason)
    }
}

/// Output of signal synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub signal: SignalKind,
    /// Winning share of the total score, capped at 0.95.
    pub confidence: f64,
    pub buy_score: f64,
    pub sell_score: f64,
    pub hold_score: f64,
    /// Reasons of rules with weight above 0.5, in evaluation order.
    pub reasons: Vec<String>,
    /// Every vote cast, in evaluation order.
    pub votes: Vec<Vote>,
    pub indicators: IndicatorSnapshot,
}
