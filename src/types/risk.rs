use super::anomaly::{AlertLevel, PriceAnomalyReport, VolumeAnomalyReport, WhaleReport};
use super::external::MultivariateScore;
use serde::{Deserialize, Serialize};

/// Source of a contributed risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSource {
    Price,
    Volume,
    Whale,
    Multivariate,
}

/// One contributed risk factor in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub source: RiskSource,
    pub value: f64,
}

/// Aggregated market risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub alert_level: AlertLevel,
    /// Mean of contributed factors, 0 when nothing fired.
    pub overall_risk_score: f64,
    pub price: PriceAnomalyReport,
    pub volume: VolumeAnomalyReport,
    pub whale: WhaleReport,
    /// Externally supplied multivariate score, when one was provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multivariate: Option<MultivariateScore>,
    /// Factors that contributed to the overall score, in evaluation order.
    pub factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
}
