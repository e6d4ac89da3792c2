//! Statistical anomaly detection over prices, volumes and transaction sizes.
//!
//! The three detectors are independent of each other and of the indicator
//! engine.

pub mod price;
pub mod tiers;
pub mod volume;
pub mod whale;

pub use price::{rolling_volatility, PriceAnomalyDetector};
pub use tiers::TierTable;
pub use volume::VolumeAnomalyDetector;
pub use whale::WhaleDetector;

use crate::config::AnomalyConfig;
use crate::error::Result;
use crate::types::{Bar, PriceAnomalyReport, VolumeAnomalyReport, WhaleReport};

/// Sub-reports from one pass of the anomaly engine.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalySet {
    pub price: PriceAnomalyReport,
    pub volume: VolumeAnomalyReport,
    pub whale: WhaleReport,
}

/// Runs the price, volume and whale detectors with shared configuration.
#[derive(Debug, Clone)]
pub struct AnomalyEngine {
    config: AnomalyConfig,
    price: PriceAnomalyDetector,
    volume: VolumeAnomalyDetector,
    whale: WhaleDetector,
}

impl Default for AnomalyEngine {
    fn default() -> Self {
        Self::build(AnomalyConfig::default())
    }
}

impl AnomalyEngine {
    /// Create an engine, rejecting invalid thresholds.
    pub fn new(config: AnomalyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AnomalyConfig) -> Self {
        Self {
            price: PriceAnomalyDetector::new(
                config.price_z_threshold,
                config.sensitivity,
                config.max_listed_anomalies,
            ),
            volume: VolumeAnomalyDetector::new(
                config.volume_z_threshold,
                config.sensitivity,
                config.max_listed_spikes,
            ),
            whale: WhaleDetector::new(config.whale_percentile, config.recent_fraction),
            config,
        }
    }

    pub fn config(&self) -> &AnomalyConfig {
        &self.config
    }

    pub fn detect_price_anomalies(&self, prices: &[f64]) -> Result<PriceAnomalyReport> {
        self.price.detect(prices)
    }

    pub fn detect_volume_anomalies(&self, volumes: &[f64]) -> Result<VolumeAnomalyReport> {
        self.volume.detect(volumes)
    }

    pub fn detect_whale_activity(&self, sizes: &[f64]) -> WhaleReport {
        self.whale.detect(sizes)
    }

    /// Rolling return volatility; `None` uses the configured window.
    pub fn price_volatility(&self, prices: &[f64], window: Option<usize>) -> Vec<f64> {
        rolling_volatility(prices, window.unwrap_or(self.config.volatility_window))
    }

    /// Run all three detectors over a bar series and its transactions.
    pub fn detect_all(&self, bars: &[Bar], transactions: &[f64]) -> Result<AnomalySet> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<f64> = bars.iter().map(|b| b.volume.unwrap_or(0.0)).collect();

        Ok(AnomalySet {
            price: self.detect_price_anomalies(&closes)?,
            volume: self.detect_volume_anomalies(&volumes)?,
            whale: self.detect_whale_activity(transactions),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    #[test]
    fn test_engine_rejects_bad_percentile() {
        let config = AnomalyConfig {
            whale_percentile: 150.0,
            ..AnomalyConfig::default()
        };
        assert!(matches!(
            AnomalyEngine::new(config),
            Err(AnalysisError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_detect_all_flat_market() {
        let bars: Vec<Bar> = (0..30)
            .map(|i| Bar::new(i, 10.0, 10.0, 10.0, 10.0, 500.0))
            .collect();
        let set = AnomalyEngine::default().detect_all(&bars, &[]).unwrap();
        assert!(!set.price.has_anomaly);
        assert!(!set.volume.has_spike);
        assert!(!set.whale.whale_detected);
    }

    #[test]
    fn test_detect_all_requires_two_bars() {
        let bars = vec![Bar::new(0, 1.0, 1.0, 1.0, 1.0, 1.0)];
        assert!(AnomalyEngine::default().detect_all(&bars, &[]).is_err());
    }

    #[test]
    fn test_price_volatility_window() {
        let engine = AnomalyEngine::default();
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + (i % 4) as f64).collect();
        let configured = engine.price_volatility(&prices, None);
        assert_eq!(configured.len(), 40);
        assert_eq!(configured[19], 0.0);
        assert!(configured[20] > 0.0);

        let short = engine.price_volatility(&prices, Some(5));
        assert_eq!(short[4], 0.0);
        assert!(short[5] > 0.0);
    }

    #[test]
    fn test_thresholds_follow_config() {
        let config = AnomalyConfig {
            volume_z_threshold: 10.0,
            ..AnomalyConfig::default()
        };
        let engine = AnomalyEngine::new(config).unwrap();
        let mut volumes = vec![100.0; 19];
        volumes.push(1000.0);
        let report = engine.detect_volume_anomalies(&volumes).unwrap();
        assert!(!report.has_spike);
        assert_eq!(report.spike_count, 0);
    }
}
