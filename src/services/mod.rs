//! Analysis services: indicators, anomaly detection, risk and signals.

pub mod analyzer;
pub mod anomaly;
pub mod external;
pub mod indicators;
pub mod risk;
pub mod series;
pub mod signals;

pub use analyzer::{load_market_file, MarketAnalyzer};
pub use anomaly::{AnomalyEngine, AnomalySet};
pub use external::{Forecaster, MultivariateScorer, SentimentScorer};
pub use indicators::IndicatorEngine;
pub use risk::RiskAggregator;
pub use signals::SignalSynthesizer;
