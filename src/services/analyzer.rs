//! Per-symbol composite analysis: signal pipeline plus risk pipeline.

use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::services::anomaly::AnomalyEngine;
use crate::services::external::{Forecaster, MultivariateScorer, SentimentScorer};
use crate::services::indicators::IndicatorEngine;
use crate::services::risk::RiskAggregator;
use crate::services::signals::SignalSynthesizer;
use crate::types::{Bar, MarketAnalysis, MarketFile, MarketInput};
use tracing::{info, warn};

/// Read a batch of symbols from a JSON file.
pub fn load_market_file(path: impl AsRef<Path>) -> Result<MarketFile> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Runs indicators, signal synthesis, anomaly detection and risk aggregation
/// for one symbol at a time.
///
/// Optional external capabilities are consulted when present. Their absence
/// leaves every other output field unchanged.
pub struct MarketAnalyzer {
    signals: SignalSynthesizer,
    anomaly: AnomalyEngine,
    risk: RiskAggregator,
    multivariate: Option<Box<dyn MultivariateScorer>>,
    forecaster: Option<Box<dyn Forecaster>>,
    sentiment: Option<Box<dyn SentimentScorer>>,
}

impl Default for MarketAnalyzer {
    fn default() -> Self {
        Self {
            signals: SignalSynthesizer::default(),
            anomaly: AnomalyEngine::default(),
            risk: RiskAggregator::default(),
            multivariate: None,
            forecaster: None,
            sentiment: None,
        }
    }
}

impl MarketAnalyzer {
    /// Build all engines from a validated configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            signals: SignalSynthesizer::new(IndicatorEngine::new(config.indicators.clone())?),
            anomaly: AnomalyEngine::new(config.anomaly.clone())?,
            risk: RiskAggregator::new(config.risk.clone())?,
            multivariate: None,
            forecaster: None,
            sentiment: None,
        })
    }

    pub fn with_multivariate(mut self, scorer: impl MultivariateScorer + 'static) -> Self {
        self.multivariate = Some(Box::new(scorer));
        self
    }

    pub fn with_forecaster(mut self, forecaster: impl Forecaster + 'static) -> Self {
        self.forecaster = Some(Box::new(forecaster));
        self
    }

    pub fn with_sentiment(mut self, scorer: impl SentimentScorer + 'static) -> Self {
        self.sentiment = Some(Box::new(scorer));
        self
    }

    pub fn anomaly_engine(&self) -> &AnomalyEngine {
        &self.anomaly
    }

    /// Analyze one symbol.
    pub fn analyze(&self, input: &MarketInput) -> Result<MarketAnalysis> {
        self.analyze_series(&input.symbol, &input.bars, &input.transactions)
    }

    pub fn analyze_series(
        &self,
        symbol: &str,
        bars: &[Bar],
        transactions: &[f64],
    ) -> Result<MarketAnalysis> {
        if !Bar::is_ordered(bars) {
            warn!("{}: bar timestamps are not strictly increasing", symbol);
        }

        let snapshot = self.signals.engine().compute_bars(bars)?;
        let signal = self.signals.synthesize_from(&snapshot);

        let anomalies = self.anomaly.detect_all(bars, transactions)?;
        let multivariate = self
            .multivariate
            .as_ref()
            .and_then(|scorer| scorer.score(&snapshot.feature_vector()));
        let risk = self.risk.assess(anomalies, multivariate);

        let forecasts = self
            .forecaster
            .as_ref()
            .map(|forecaster| forecaster.forecast(bars))
            .unwrap_or_default();
        let sentiment = self.sentiment.as_ref().and_then(|scorer| scorer.sentiment());

        info!(
            "{}: {} ({:.0}% confidence), risk {} ({:.2})",
            symbol,
            signal.signal.label(),
            signal.confidence * 100.0,
            risk.alert_level.label(),
            risk.overall_risk_score
        );

        Ok(MarketAnalysis {
            symbol: symbol.to_string(),
            signal,
            risk,
            forecasts,
            sentiment,
        })
    }
}
