//! Integration tests for the anomaly engine

use augur::services::anomaly::{PriceAnomalyDetector, VolumeAnomalyDetector, WhaleDetector};
use augur::services::AnomalyEngine;
use augur::types::*;
use augur::AnomalyConfig;

// ============================================================================
// Price
// ============================================================================

#[test]
fn test_constant_price_has_no_anomaly() {
    let report = PriceAnomalyDetector::default().detect(&[250.0; 50]).unwrap();
    assert!(!report.has_anomaly);
    assert_eq!(report.current_z_score, 0.0);
    assert_eq!(report.anomaly_count, 0);
    assert!(report.anomalies.is_empty());
}

#[test]
fn test_pump_is_spike() {
    let mut prices: Vec<f64> = (0..50)
        .map(|i| 10.0 + if i % 2 == 0 { 0.05 } else { -0.05 })
        .collect();
    prices.push(13.0);
    let report = PriceAnomalyDetector::default().detect(&prices).unwrap();
    assert!(report.has_anomaly);
    assert!(report.current_z_score > 0.0);
    assert_eq!(report.anomalies.last().map(|a| a.kind), Some(AnomalyKind::Spike));
    assert_eq!(report.severity, Severity::High);
}

// ============================================================================
// Volume
// ============================================================================

#[test]
fn test_volume_spike_is_extreme() {
    let mut volumes = vec![100.0; 19];
    volumes.push(1000.0);
    let report = VolumeAnomalyDetector::default().detect(&volumes).unwrap();
    assert!(report.has_spike);
    assert!(report.current_ratio > 5.0);
    assert_eq!(report.severity, VolumeSeverity::Extreme);
}

#[test]
fn test_moderate_volume_severity() {
    let mut volumes = vec![100.0; 49];
    volumes.push(260.0);
    let report = VolumeAnomalyDetector::default().detect(&volumes).unwrap();
    assert!(report.current_ratio > 2.0 && report.current_ratio < 3.0);
    assert_eq!(report.severity, VolumeSeverity::Medium);
}

// ============================================================================
// Whale
// ============================================================================

#[test]
fn test_whales_in_tail() {
    let mut sizes = vec![1.0; 95];
    sizes.extend(vec![100.0; 5]);
    let report = WhaleDetector::default().detect(&sizes);
    assert!(report.whale_count >= 5);
    assert!(report.whale_percentage > 50.0);
    assert!(report.whale_detected);
}

#[test]
fn test_no_transactions_is_not_an_error() {
    let report = WhaleDetector::default().detect(&[]);
    assert!(!report.whale_detected);
    assert_eq!(report.whale_count, 0);
    assert_eq!(report.recent_whale_count, 0);
    assert_eq!(report.alert_level, AlertLevel::Normal);
}

// ============================================================================
// Engine
// ============================================================================

#[test]
fn test_engine_runs_all_detectors() {
    let mut bars: Vec<Bar> = (0..40)
        .map(|i| {
            let close = 100.0 + if i % 2 == 0 { 0.3 } else { -0.3 };
            Bar::new(i, close, close, close, close, 100.0)
        })
        .collect();
    bars.push(Bar::new(40, 100.0, 100.0, 70.0, 70.0, 5_000.0));

    let mut sizes = vec![2.0; 95];
    sizes.extend(vec![80.0; 5]);

    let set = AnomalyEngine::default().detect_all(&bars, &sizes).unwrap();
    assert!(set.price.has_anomaly);
    assert!(set.price.current_z_score < 0.0);
    assert!(set.volume.has_spike);
    assert_eq!(set.volume.severity, VolumeSeverity::Extreme);
    assert!(set.whale.whale_detected);
}

#[test]
fn test_engine_listing_caps_from_config() {
    let config = AnomalyConfig {
        max_listed_spikes: 1,
        ..AnomalyConfig::default()
    };
    let engine = AnomalyEngine::new(config).unwrap();
    let mut volumes = Vec::new();
    for _ in 0..3 {
        volumes.extend(vec![100.0; 30]);
        volumes.push(3_000.0);
    }
    let report = engine.detect_volume_anomalies(&volumes).unwrap();
    assert_eq!(report.spike_count, 3);
    assert_eq!(report.recent_spikes.len(), 1);
}

#[test]
fn test_engine_rejects_bad_sensitivity() {
    let config = AnomalyConfig {
        sensitivity: 0.0,
        ..AnomalyConfig::default()
    };
    assert!(AnomalyEngine::new(config).is_err());
}
