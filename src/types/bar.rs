use serde::{Deserialize, Serialize};

/// OHLCV bar for one fixed time interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Opaque, strictly increasing ordinal (typically unix millis).
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Traded volume, absent for feeds that only carry prices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Bar {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume: Some(volume),
        }
    }

    /// Bar from a price-only feed.
    pub fn without_volume(timestamp: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    /// Check that timestamps are strictly increasing.
    pub fn is_ordered(bars: &[Bar]) -> bool {
        bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp)
    }
}

/// Column-oriented view of a bar series.
///
/// Close is required; high, low and volume are optional and fall back to
/// close (for high/low) or to "no volume" when absent.
#[derive(Debug, Clone, Copy)]
pub struct SeriesView<'a> {
    pub close: &'a [f64],
    pub high: Option<&'a [f64]>,
    pub low: Option<&'a [f64]>,
    pub volume: Option<&'a [f64]>,
}

impl<'a> SeriesView<'a> {
    /// View over close prices only.
    pub fn closes(close: &'a [f64]) -> Self {
        Self {
            close,
            high: None,
            low: None,
            volume: None,
        }
    }

    pub fn with_high_low(mut self, high: &'a [f64], low: &'a [f64]) -> Self {
        self.high = Some(high);
        self.low = Some(low);
        self
    }

    pub fn with_volume(mut self, volume: &'a [f64]) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// High series, defaulting to close.
    pub fn high(&self) -> &'a [f64] {
        self.high.unwrap_or(self.close)
    }

    /// Low series, defaulting to close.
    pub fn low(&self) -> &'a [f64] {
        self.low.unwrap_or(self.close)
    }
}

/// Owned columns extracted from a slice of bars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarColumns {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    /// Present only when every bar carries volume.
    pub volume: Option<Vec<f64>>,
}

impl BarColumns {
    pub fn from_bars(bars: &[Bar]) -> Self {
        let mut columns = Self {
            open: Vec::with_capacity(bars.len()),
            high: Vec::with_capacity(bars.len()),
            low: Vec::with_capacity(bars.len()),
            close: Vec::with_capacity(bars.len()),
            volume: None,
        };
        for bar in bars {
            columns.open.push(bar.open);
            columns.high.push(bar.high);
            columns.low.push(bar.low);
            columns.close.push(bar.close);
        }
        columns.volume = bars.iter().map(|bar| bar.volume).collect();
        columns
    }

    /// Borrow all columns. Volume is attached only when the bars carried it.
    pub fn view(&self) -> SeriesView<'_> {
        let view = SeriesView::closes(&self.close).with_high_low(&self.high, &self.low);
        match &self.volume {
            Some(volume) => view.with_volume(volume),
            None => view,
        }
    }
}
