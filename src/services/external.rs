//! Capability interfaces for externally owned models.
//!
//! Implementations wrap whatever model the caller runs (sequence forecaster,
//! text classifier, outlier detector). The analyzer only consumes their
//! results and treats a missing capability as "no input".

use crate::types::{Bar, HorizonForecast, MultivariateScore, SentimentSummary};

/// Scores an indicator feature vector for multivariate outliers.
pub trait MultivariateScorer: Send + Sync {
    /// Returns None when the model is unavailable or not yet trained.
    fn score(&self, features: &[f64]) -> Option<MultivariateScore>;
}

/// Forecasts future prices from a bar history.
pub trait Forecaster: Send + Sync {
    /// One entry per supported horizon; empty when no forecast is possible.
    fn forecast(&self, bars: &[Bar]) -> Vec<HorizonForecast>;
}

/// Supplies aggregated market sentiment.
pub trait SentimentScorer: Send + Sync {
    fn sentiment(&self) -> Option<SentimentSummary>;
}
