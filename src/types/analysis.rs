use super::bar::Bar;
use super::external::{HorizonForecast, SentimentSummary};
use super::risk::RiskReport;
use super::signals::SignalResult;
use serde::{Deserialize, Serialize};

/// Raw input for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketInput {
    pub symbol: String,
    pub bars: Vec<Bar>,
    /// Individual transaction sizes, any caller-consistent unit.
    #[serde(default)]
    pub transactions: Vec<f64>,
}

/// Batch of symbols read by the binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketFile {
    pub markets: Vec<MarketInput>,
}

/// Combined signal and risk output for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub symbol: String,
    pub signal: SignalResult,
    pub risk: RiskReport,
    /// Forecasts from an injected forecaster, empty when none is configured.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forecasts: Vec<HorizonForecast>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentSummary>,
}
