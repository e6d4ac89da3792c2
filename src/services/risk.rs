//! Risk aggregation over anomaly sub-reports.

use crate::config::RiskConfig;
use crate::error::Result;
use crate::services::anomaly::{tiers::risk_alert, AnomalySet};
use crate::types::{
    AlertLevel, MultivariateScore, PriceAnomalyReport, RiskFactor, RiskReport, RiskSource,
    VolumeAnomalyReport, WhaleReport,
};
use tracing::debug;

const NORMAL_CONDITIONS: &str =
    "Market conditions appear normal. No significant anomalies detected.";

/// Merges anomaly sub-reports into a single alert level and recommendations.
#[derive(Debug, Clone, Default)]
pub struct RiskAggregator {
    config: RiskConfig,
}

impl RiskAggregator {
    pub fn new(config: RiskConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Aggregate a full anomaly pass.
    pub fn assess(&self, set: AnomalySet, multivariate: Option<MultivariateScore>) -> RiskReport {
        self.aggregate(set.price, set.volume, set.whale, multivariate)
    }

    /// Combine sub-reports into a [`RiskReport`].
    ///
    /// Only sub-reports that fired contribute a factor. The overall score is
    /// the mean of contributed factors and 0 when none fired.
    pub fn aggregate(
        &self,
        price: PriceAnomalyReport,
        volume: VolumeAnomalyReport,
        whale: WhaleReport,
        multivariate: Option<MultivariateScore>,
    ) -> RiskReport {
        let mut factors = Vec::new();
        let mut recommendations = Vec::new();

        if price.has_anomaly {
            factors.push(RiskFactor {
                source: RiskSource::Price,
                value: (price.current_z_score.abs() / self.config.price_z_scale).min(1.0),
            });
            recommendations.push(price_recommendation(price.current_z_score));
        }

        if volume.has_spike {
            factors.push(RiskFactor {
                source: RiskSource::Volume,
                value: (volume.current_ratio / self.config.volume_ratio_scale).min(1.0),
            });
            recommendations.push(format!(
                "Volume spike detected ({:.1}x average). Significant market interest.",
                volume.current_ratio
            ));
        }

        if whale.whale_detected {
            factors.push(RiskFactor {
                source: RiskSource::Whale,
                value: (whale.recent_whale_count as f64 / self.config.whale_count_scale).min(1.0),
            });
            recommendations.push(format!(
                "Whale activity detected ({} large transactions). Market may be volatile.",
                whale.recent_whale_count
            ));
        }

        if let Some(score) = multivariate.filter(|m| m.is_anomaly) {
            factors.push(RiskFactor {
                source: RiskSource::Multivariate,
                value: score.score.abs().min(1.0),
            });
            recommendations.push(format!(
                "Unusual indicator combination flagged by multivariate model (score {:.2}).",
                score.score
            ));
        }

        let overall_risk_score = if factors.is_empty() {
            0.0
        } else {
            factors.iter().map(|f| f.value).sum::<f64>() / factors.len() as f64
        };
        let alert_level = risk_alert().classify(overall_risk_score);

        if let Some(message) = tier_message(alert_level) {
            recommendations.push(message.to_string());
        }
        if recommendations.is_empty() {
            recommendations.push(NORMAL_CONDITIONS.to_string());
        }

        debug!(
            "Risk {:.3} ({}) from {} factors",
            overall_risk_score,
            alert_level.label(),
            factors.len()
        );

        RiskReport {
            alert_level,
            overall_risk_score,
            price,
            volume,
            whale,
            multivariate,
            factors,
            recommendations,
        }
    }
}

fn price_recommendation(current_z_score: f64) -> String {
    if current_z_score > 0.0 {
        "Unusual upward price movement detected. Consider taking profits.".to_string()
    } else {
        "Unusual downward price movement detected. Monitor closely for entry points.".to_string()
    }
}

fn tier_message(level: AlertLevel) -> Option<&'static str> {
    match level {
        AlertLevel::Critical => Some(
            "CRITICAL: Multiple anomalies detected. Consider reducing position size or exiting.",
        ),
        AlertLevel::High => Some("HIGH RISK: Significant market anomalies. Trade with caution."),
        AlertLevel::Medium => Some("MEDIUM RISK: Some unusual activity. Monitor position closely."),
        AlertLevel::Normal => None,
    }
}
