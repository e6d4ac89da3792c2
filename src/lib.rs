//! Augur - technical indicators, statistical anomaly detection and trading
//! signal synthesis over OHLCV bar series.

pub mod config;
pub mod error;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use config::{AnomalyConfig, Config, IndicatorConfig, RiskConfig};
pub use error::{AnalysisError, Result};
pub use services::{
    AnomalyEngine, IndicatorEngine, MarketAnalyzer, RiskAggregator, SignalSynthesizer,
};
pub use types::*;
