use crate::error::{AnalysisError, Result};
use std::env;
use std::str::FromStr;

/// Indicator engine periods.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConfig {
    /// Short trend SMA period (default: 20).
    pub sma_period: usize,
    /// Long trend SMA period (default: 50).
    pub long_sma_period: usize,
    /// Trend EMA period compared against the short SMA (default: 12).
    pub ema_period: usize,
    /// RSI period (default: 14).
    pub rsi_period: usize,
    /// MACD fast EMA period (default: 12).
    pub macd_fast: usize,
    /// MACD slow EMA period (default: 26).
    pub macd_slow: usize,
    /// MACD signal EMA period (default: 9).
    pub macd_signal: usize,
    /// Bollinger middle band period (default: 20).
    pub bollinger_period: usize,
    /// Bollinger band width in standard deviations (default: 2.0).
    pub bollinger_std_dev: f64,
    /// Stochastic %K lookback (default: 14).
    pub stochastic_k: usize,
    /// Stochastic %D smoothing (default: 3).
    pub stochastic_d: usize,
    /// Volume SMA period for the volume ratio (default: 20).
    pub volume_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_period: 20,
            long_sma_period: 50,
            ema_period: 12,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            stochastic_k: 14,
            stochastic_d: 3,
            volume_period: 20,
        }
    }
}

impl IndicatorConfig {
    /// Load indicator periods from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            sma_period: env_or("SMA_PERIOD", defaults.sma_period),
            long_sma_period: env_or("LONG_SMA_PERIOD", defaults.long_sma_period),
            ema_period: env_or("EMA_PERIOD", defaults.ema_period),
            rsi_period: env_or("RSI_PERIOD", defaults.rsi_period),
            macd_fast: env_or("MACD_FAST", defaults.macd_fast),
            macd_slow: env_or("MACD_SLOW", defaults.macd_slow),
            macd_signal: env_or("MACD_SIGNAL", defaults.macd_signal),
            bollinger_period: env_or("BOLLINGER_PERIOD", defaults.bollinger_period),
            bollinger_std_dev: env_or("BOLLINGER_STD_DEV", defaults.bollinger_std_dev),
            stochastic_k: env_or("STOCHASTIC_K", defaults.stochastic_k),
            stochastic_d: env_or("STOCHASTIC_D", defaults.stochastic_d),
            volume_period: env_or("VOLUME_PERIOD", defaults.volume_period),
        }
    }

    /// Reject zero periods and non-positive band widths.
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("sma_period", self.sma_period),
            ("long_sma_period", self.long_sma_period),
            ("ema_period", self.ema_period),
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("bollinger_period", self.bollinger_period),
            ("stochastic_k", self.stochastic_k),
            ("stochastic_d", self.stochastic_d),
            ("volume_period", self.volume_period),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(AnalysisError::invalid(format!("{} must be positive", name)));
            }
        }
        positive("bollinger_std_dev", self.bollinger_std_dev)?;
        Ok(())
    }
}

/// Statistical anomaly thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyConfig {
    /// Z-score threshold for price return anomalies (default: 3.0).
    pub price_z_threshold: f64,
    /// Z-score threshold for volume spikes (default: 2.5).
    pub volume_z_threshold: f64,
    /// Multiplier applied to thresholds for the current-bar gate (default: 0.95).
    pub sensitivity: f64,
    /// Percentile (0-100) defining the whale transaction size (default: 95).
    pub whale_percentile: f64,
    /// Trailing fraction of transactions counted as recent (default: 0.1).
    pub recent_fraction: f64,
    /// Maximum price anomalies listed in a report (default: 5).
    pub max_listed_anomalies: usize,
    /// Maximum volume spikes listed in a report (default: 3).
    pub max_listed_spikes: usize,
    /// Rolling window for return volatility (default: 20).
    pub volatility_window: usize,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            price_z_threshold: 3.0,
            volume_z_threshold: 2.5,
            sensitivity: 0.95,
            whale_percentile: 95.0,
            recent_fraction: 0.1,
            max_listed_anomalies: 5,
            max_listed_spikes: 3,
            volatility_window: 20,
        }
    }
}

impl AnomalyConfig {
    /// Load anomaly thresholds from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            price_z_threshold: env_or("PRICE_Z_THRESHOLD", defaults.price_z_threshold),
            volume_z_threshold: env_or("VOLUME_Z_THRESHOLD", defaults.volume_z_threshold),
            sensitivity: env_or("ANOMALY_SENSITIVITY", defaults.sensitivity),
            whale_percentile: env_or("WHALE_PERCENTILE", defaults.whale_percentile),
            recent_fraction: env_or("WHALE_RECENT_FRACTION", defaults.recent_fraction),
            max_listed_anomalies: env_or("MAX_LISTED_ANOMALIES", defaults.max_listed_anomalies),
            max_listed_spikes: env_or("MAX_LISTED_SPIKES", defaults.max_listed_spikes),
            volatility_window: env_or("VOLATILITY_WINDOW", defaults.volatility_window),
        }
    }

    pub fn validate(&self) -> Result<()> {
        positive("price_z_threshold", self.price_z_threshold)?;
        positive("volume_z_threshold", self.volume_z_threshold)?;
        if !(self.sensitivity > 0.0 && self.sensitivity <= 1.0) {
            return Err(AnalysisError::invalid(format!(
                "sensitivity must be in (0, 1], got {}",
                self.sensitivity
            )));
        }
        if !(0.0..=100.0).contains(&self.whale_percentile) {
            return Err(AnalysisError::invalid(format!(
                "whale_percentile must be in [0, 100], got {}",
                self.whale_percentile
            )));
        }
        if !(self.recent_fraction > 0.0 && self.recent_fraction <= 1.0) {
            return Err(AnalysisError::invalid(format!(
                "recent_fraction must be in (0, 1], got {}",
                self.recent_fraction
            )));
        }
        if self.volatility_window == 0 {
            return Err(AnalysisError::invalid("volatility_window must be positive"));
        }
        Ok(())
    }
}

/// Normalisers turning sub-report readings into risk factors in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct RiskConfig {
    /// |z| that maps to a full price factor (default: 3.0).
    pub price_z_scale: f64,
    /// Volume ratio that maps to a full volume factor (default: 5.0).
    pub volume_ratio_scale: f64,
    /// Recent whale count that maps to a full whale factor (default: 10).
    pub whale_count_scale: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            price_z_scale: 3.0,
            volume_ratio_scale: 5.0,
            whale_count_scale: 10.0,
        }
    }
}

impl RiskConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            price_z_scale: env_or("RISK_PRICE_Z_SCALE", defaults.price_z_scale),
            volume_ratio_scale: env_or("RISK_VOLUME_RATIO_SCALE", defaults.volume_ratio_scale),
            whale_count_scale: env_or("RISK_WHALE_COUNT_SCALE", defaults.whale_count_scale),
        }
    }

    pub fn validate(&self) -> Result<()> {
        positive("price_z_scale", self.price_z_scale)?;
        positive("volume_ratio_scale", self.volume_ratio_scale)?;
        positive("whale_count_scale", self.whale_count_scale)?;
        Ok(())
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON market data file read by the binary.
    pub data_path: String,
    /// Indicator periods.
    pub indicators: IndicatorConfig,
    /// Anomaly thresholds.
    pub anomaly: AnomalyConfig,
    /// Risk factor normalisers.
    pub risk: RiskConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            data_path: env::var("MARKET_DATA_PATH")
                .unwrap_or_else(|_| "market_data.json".to_string()),
            indicators: IndicatorConfig::from_env(),
            anomaly: AnomalyConfig::from_env(),
            risk: RiskConfig::from_env(),
        }
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.indicators.validate()?;
        self.anomaly.validate()?;
        self.risk.validate()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::invalid(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}
