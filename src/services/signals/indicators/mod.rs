//! Technical indicator implementations.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod pivot;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod volume;

pub use atr::Atr;
pub use bollinger::{Bands, BollingerBands};
pub use ema::Ema;
pub use macd::{Macd, MacdOutput};
pub use pivot::{PivotLevels, PivotPoints};
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::Stochastic;
pub use volume::VolumeRatio;

use super::Indicator;
use crate::types::{Bar, IndicatorMode, IndicatorSnapshot};

/// Closes of the last `period` bars, oldest first.
pub(crate) fn last_closes(bars: &[Bar], period: usize) -> Option<Vec<f64>> {
    if period == 0 || bars.len() < period {
        return None;
    }
    Some(bars[bars.len() - period..].iter().map(|b| b.close).collect())
}

/// Arithmetic mean, zero for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// The fixed indicator set, recomputed from the full window on every call.
pub struct IndicatorEngine {
    sma20: Sma,
    sma50: Sma,
    ema12: Ema,
    ema26: Ema,
    rsi: Rsi,
    macd: Macd,
    bollinger: BollingerBands,
    stochastic: Stochastic,
    atr: Atr,
    volume: VolumeRatio,
    pivot: PivotPoints,
}

impl IndicatorEngine {
    pub fn new(mode: IndicatorMode) -> Self {
        Self {
            sma20: Sma::new(20),
            sma50: Sma::new(50),
            ema12: Ema::new(12, mode),
            ema26: Ema::new(26, mode),
            rsi: Rsi::default(),
            macd: Macd::new(mode),
            bollinger: BollingerBands::default(),
            stochastic: Stochastic::default(),
            atr: Atr::default(),
            volume: VolumeRatio::default(),
            pivot: PivotPoints,
        }
    }

    /// Largest lookback across the set.
    pub fn min_periods(&self) -> usize {
        [
            self.sma20.min_periods(),
            self.sma50.min_periods(),
            self.ema12.min_periods(),
            self.ema26.min_periods(),
            self.rsi.min_periods(),
            self.macd.min_periods(),
            self.bollinger.min_periods(),
            self.stochastic.min_periods(),
            self.atr.min_periods(),
            self.volume.min_periods(),
            self.pivot.min_periods(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    /// Compute every indicator. `None` if the window is too short for any
    /// of them; degenerate RSI, Stochastic and volume readings are reported
    /// as unavailable fields instead.
    pub fn compute(&self, bars: &[Bar]) -> Option<IndicatorSnapshot> {
        if bars.len() < self.min_periods() {
            return None;
        }

        let macd = self.macd.calculate(bars)?;
        let bands = self.bollinger.calculate(bars)?;
        let pivot = self.pivot.calculate(bars)?;

        Some(IndicatorSnapshot {
            sma20: self.sma20.calculate(bars)?,
            sma50: self.sma50.calculate(bars)?,
            ema12: self.ema12.calculate(bars)?,
            ema26: self.ema26.calculate(bars)?,
            rsi: self.rsi.calculate(bars),
            macd: macd.macd,
            macd_signal: macd.signal,
            histogram: macd.histogram,
            upper_band: bands.upper,
            lower_band: bands.lower,
            stochastic: self.stochastic.calculate(bars),
            atr: self.atr.calculate(bars)?,
            volume_ratio: self.volume.calculate(bars),
            pivot_point: pivot.pivot,
            support1: pivot.support1,
            support2: pivot.support2,
            resistance1: pivot.resistance1,
            resistance2: pivot.resistance2,
        })
    }
}
