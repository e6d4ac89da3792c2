//! Price return anomaly detection.

use super::tiers::price_severity;
use crate::error::{AnalysisError, Result};
use crate::services::series;
use crate::types::{AnomalyKind, PriceAnomaly, PriceAnomalyReport};
use tracing::debug;

/// Flags returns whose z-score against the whole window exceeds a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceAnomalyDetector {
    threshold: f64,
    sensitivity: f64,
    max_listed: usize,
}

impl Default for PriceAnomalyDetector {
    fn default() -> Self {
        Self {
            threshold: 3.0,
            sensitivity: 0.95,
            max_listed: 5,
        }
    }
}

impl PriceAnomalyDetector {
    pub fn new(threshold: f64, sensitivity: f64, max_listed: usize) -> Self {
        Self {
            threshold,
            sensitivity,
            max_listed,
        }
    }

    /// Detect anomalous returns. Needs at least two prices.
    pub fn detect(&self, prices: &[f64]) -> Result<PriceAnomalyReport> {
        if prices.len() < 2 {
            return Err(AnalysisError::insufficient("price anomalies", 2, prices.len()));
        }

        let returns = series::simple_returns(prices);
        let Some(z_scores) = series::z_scores(&returns) else {
            debug!("Zero-variance returns over {} prices, no anomaly", prices.len());
            return Ok(PriceAnomalyReport::quiet());
        };

        let anomalies: Vec<PriceAnomaly> = z_scores
            .iter()
            .enumerate()
            .filter(|(_, z)| z.abs() > self.threshold)
            .map(|(index, &z)| PriceAnomaly {
                index,
                kind: AnomalyKind::from_z_score(z),
                magnitude: z.abs(),
                return_pct: returns[index] * 100.0,
                price: prices[index + 1],
            })
            .collect();

        let current_z_score = z_scores[z_scores.len() - 1];
        let anomaly_count = anomalies.len();
        let skip = anomaly_count.saturating_sub(self.max_listed);

        Ok(PriceAnomalyReport {
            has_anomaly: current_z_score.abs() > self.threshold * self.sensitivity,
            current_z_score,
            anomaly_count,
            anomalies: anomalies.into_iter().skip(skip).collect(),
            severity: price_severity(self.threshold).classify(current_z_score.abs()),
        })
    }
}

/// Rolling standard deviation of returns.
///
/// Entry `i` is the std of the `window` returns ending just before bar `i`;
/// bars without a full window read 0.
pub fn rolling_volatility(prices: &[f64], window: usize) -> Vec<f64> {
    let returns = series::simple_returns(prices);
    let mut volatility = vec![0.0; prices.len()];
    if window == 0 {
        return volatility;
    }
    for (i, slot) in volatility.iter_mut().enumerate().skip(window) {
        *slot = series::population_std(&returns[i - window..i]);
    }
    volatility
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    /// Gentle oscillation with a crash on the last bar.
    fn create_crash_prices() -> Vec<f64> {
        let mut prices: Vec<f64> = (0..60)
            .map(|i| 100.0 + if i % 2 == 0 { 0.5 } else { -0.5 })
            .collect();
        let last = *prices.last().unwrap();
        prices.push(last * 0.8);
        prices
    }

    #[test]
    fn test_constant_prices_quiet() {
        let report = PriceAnomalyDetector::default().detect(&[50.0; 30]).unwrap();
        assert!(!report.has_anomaly);
        assert_eq!(report.current_z_score, 0.0);
        assert_eq!(report.anomaly_count, 0);
        assert_eq!(report.severity, Severity::Low);
    }

    #[test]
    fn test_insufficient_prices() {
        assert!(PriceAnomalyDetector::default().detect(&[1.0]).is_err());
    }

    #[test]
    fn test_crash_detected_as_current_drop() {
        let prices = create_crash_prices();
        let report = PriceAnomalyDetector::default().detect(&prices).unwrap();
        assert!(report.has_anomaly);
        assert!(report.current_z_score < -3.0);
        assert_eq!(report.severity, Severity::High);
        assert_eq!(report.anomaly_count, 1);

        let anomaly = &report.anomalies[0];
        assert_eq!(anomaly.kind, AnomalyKind::Drop);
        assert_eq!(anomaly.index, prices.len() - 2);
        assert_eq!(anomaly.price, *prices.last().unwrap());
        assert!((anomaly.return_pct + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_historical_anomaly_without_current_flag() {
        let mut prices = create_crash_prices();
        // Recover with ordinary noise so the latest return is unremarkable.
        let base = *prices.last().unwrap();
        for i in 0..20 {
            prices.push(base + if i % 2 == 0 { 0.4 } else { 0.0 });
        }
        let report = PriceAnomalyDetector::default().detect(&prices).unwrap();
        assert!(report.anomaly_count >= 1);
        assert!(!report.has_anomaly);
    }

    #[test]
    fn test_listed_anomalies_capped() {
        let mut prices = Vec::new();
        for block in 0..10 {
            for i in 0..30 {
                prices.push(100.0 + if i % 2 == 0 { 0.1 } else { -0.1 });
            }
            // a jump up and back down every block
            prices.push(if block % 2 == 0 { 130.0 } else { 70.0 });
        }
        let detector = PriceAnomalyDetector::new(3.0, 0.95, 5);
        let report = detector.detect(&prices).unwrap();
        assert!(report.anomaly_count > 5);
        assert_eq!(report.anomalies.len(), 5);
        let indices: Vec<usize> = report.anomalies.iter().map(|a| a.index).collect();
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        assert_eq!(indices, sorted);
    }

    #[test]
    fn test_rolling_volatility_shape() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + (i % 3) as f64).collect();
        let vol = rolling_volatility(&prices, 20);
        assert_eq!(vol.len(), 30);
        assert!(vol[..20].iter().all(|v| *v == 0.0));
        assert!(vol[20..].iter().all(|v| *v > 0.0));
    }
}
