//! Technical indicator implementations and the snapshot engine.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod volume;

pub use bollinger::{BollingerBands, BollingerReading, BollingerSeries};
pub use ema::Ema;
pub use macd::{Macd, MacdReading, MacdSeries};
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::{Stochastic, StochasticReading, StochasticSeries};
pub use volume::VolumeRatio;

use crate::config::IndicatorConfig;
use crate::error::{AnalysisError, Result};
use crate::types::{Bar, BarColumns, IndicatorSnapshot, SeriesView};
use tracing::debug;

/// Fewest bars the engine accepts.
pub const MIN_BARS: usize = 2;

/// Computes an [`IndicatorSnapshot`] for the last bar of a series.
///
/// Holds only configuration; every call is a pure function of its input.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
    sma: Sma,
    long_sma: Sma,
    ema: Ema,
    rsi: Rsi,
    macd: Macd,
    bollinger: BollingerBands,
    stochastic: Stochastic,
    volume: VolumeRatio,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::build(IndicatorConfig::default())
    }
}

impl IndicatorEngine {
    /// Create an engine, rejecting zero periods.
    pub fn new(config: IndicatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: IndicatorConfig) -> Self {
        Self {
            sma: Sma::new(config.sma_period),
            long_sma: Sma::new(config.long_sma_period),
            ema: Ema::new(config.ema_period),
            rsi: Rsi::new(config.rsi_period),
            macd: Macd::new(config.macd_fast, config.macd_slow, config.macd_signal),
            bollinger: BollingerBands::new(config.bollinger_period, config.bollinger_std_dev),
            stochastic: Stochastic::new(config.stochastic_k, config.stochastic_d),
            volume: VolumeRatio::new(config.volume_period),
            config,
        }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Longest lookback among the configured indicators.
    pub fn warmup_period(&self) -> usize {
        [
            self.sma.period(),
            self.rsi.min_periods(),
            self.macd.slow_period(),
            self.bollinger.period(),
            self.stochastic.k_period(),
        ]
        .into_iter()
        .max()
        .unwrap_or(MIN_BARS)
    }

    /// Snapshot from a slice of bars, using their volume.
    pub fn compute_bars(&self, bars: &[Bar]) -> Result<IndicatorSnapshot> {
        let columns = BarColumns::from_bars(bars);
        self.compute(columns.view())
    }

    /// Snapshot for the last bar of `input`.
    ///
    /// Fails with `InsufficientData` for fewer than two closes or when an
    /// optional column is shorter than the closes. Histories shorter than the
    /// warm-up period are computed with best-effort windows.
    pub fn compute(&self, input: SeriesView<'_>) -> Result<IndicatorSnapshot> {
        let len = input.len();
        if len < MIN_BARS {
            return Err(AnalysisError::insufficient("indicator snapshot", MIN_BARS, len));
        }
        for (context, column) in [
            ("high series", input.high),
            ("low series", input.low),
            ("volume series", input.volume),
        ] {
            if let Some(column) = column {
                if column.len() != len {
                    return Err(AnalysisError::insufficient(context, len, column.len()));
                }
            }
        }

        let warmup = self.warmup_period();
        if len <= warmup {
            debug!(
                "Short history ({} bars, warm-up {}), using best-effort windows",
                len, warmup
            );
        }

        let closes = input.close;
        let price = closes[len - 1];

        let macd = self.macd.latest(closes).ok_or_else(|| {
            AnalysisError::insufficient("macd", MIN_BARS, len)
        })?;
        let bands = self.bollinger.latest(closes).ok_or_else(|| {
            AnalysisError::insufficient("bollinger bands", MIN_BARS, len)
        })?;
        let stochastic = self
            .stochastic
            .latest(input.high(), input.low(), closes)
            .ok_or_else(|| AnalysisError::insufficient("stochastic", MIN_BARS, len))?;
        let rsi = self
            .rsi
            .latest(closes)
            .ok_or_else(|| AnalysisError::insufficient("rsi", MIN_BARS, len))?;

        let snapshot = IndicatorSnapshot {
            price,
            sma_20: self.sma.latest(closes).unwrap_or(price),
            sma_50: self.long_sma.latest(closes).unwrap_or(price),
            ema_12: self.ema.latest(closes).unwrap_or(price),
            rsi,
            macd: macd.macd,
            macd_signal: macd.signal,
            macd_histogram: macd.histogram,
            bb_upper: bands.upper,
            bb_middle: bands.middle,
            bb_lower: bands.lower,
            bb_position: bands.position,
            stoch_k: stochastic.k,
            stoch_d: stochastic.d,
            volume_ratio: input.volume.map(|volume| self.volume.latest(volume)),
        };

        debug!(
            "Computed indicators over {} bars: price={:.4} rsi={:.2} macd={:.4} bb_position={:.3}",
            len, snapshot.price, snapshot.rsi, snapshot.macd, snapshot.bb_position
        );

        Ok(snapshot)
    }
}
