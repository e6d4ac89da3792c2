//! Output contracts of external models.
//!
//! The core never trains or owns these models; it only accepts their results.

use serde::{Deserialize, Serialize};

/// Result of a multivariate outlier model for the current feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultivariateScore {
    pub is_anomaly: bool,
    /// Raw model score; larger magnitude means more anomalous.
    pub score: f64,
}

/// Price forecast for one horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonForecast {
    /// Horizon label, e.g. "24h", "7d".
    pub horizon: String,
    pub predicted_price: f64,
    pub current_price: f64,
    pub change_percent: f64,
    pub confidence_lower: f64,
    pub confidence_upper: f64,
    /// Model confidence (0-1).
    pub confidence_score: f64,
}

/// Dominant sentiment class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

/// Aggregated text sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub overall: Sentiment,
    /// Positive minus negative weight, in [-1, 1].
    pub score: f64,
    pub confidence: f64,
    pub sample_size: usize,
}
