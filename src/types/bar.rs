use serde::{Deserialize, Serialize};

/// OHLCV bar.
///
/// Values are taken as given: noisy or synthetic feeds may violate
/// `high >= max(open, close) >= min(open, close) >= low` and indicators
/// still compute on whatever is present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// A bar with open, high, low and close all at `price`.
    pub fn flat(timestamp: i64, price: f64, volume: f64) -> Self {
        Self::new(timestamp, price, price, price, price, volume)
    }

    /// High minus low.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// True range against the previous bar's close.
    pub fn true_range(&self, previous_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - previous_close).abs();
        let lc = (self.low - previous_close).abs();
        hl.max(hc).max(lc)
    }
}
