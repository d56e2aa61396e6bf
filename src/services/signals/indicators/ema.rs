//! Exponential Moving Average (EMA) indicator.

use super::{last_closes, mean};
use crate::services::signals::Indicator;
use crate::types::{Bar, IndicatorMode};

/// EMA (Exponential Moving Average) indicator.
///
/// In [`IndicatorMode::Compatible`] this is the plain mean of the last
/// `period` closes, not exponential smoothing. [`IndicatorMode::Standard`]
/// runs the recursive form over the whole window, seeded with the SMA of the
/// first `period` closes.
pub struct Ema {
    period: usize,
    mode: IndicatorMode,
}

impl Ema {
    pub fn new(period: usize, mode: IndicatorMode) -> Self {
        Self { period, mode }
    }
}

/// Recursive EMA over `values`. The first element is the SMA of the first
/// `period` values; one element follows for each remaining value.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut ema = Vec::with_capacity(values.len() - period + 1);

    let mut current = mean(&values[..period]);
    ema.push(current);

    for value in &values[period..] {
        current = (value - current) * multiplier + current;
        ema.push(current);
    }

    ema
}

impl Indicator for Ema {
    type Output = f64;

    fn id(&self) -> &str {
        match self.period {
            12 => "ema12",
            26 => "ema26",
            _ => "ema",
        }
    }

    fn name(&self) -> &str {
        match self.period {
            12 => "EMA (12)",
            26 => "EMA (26)",
            _ => "EMA",
        }
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, bars: &[Bar]) -> Option<f64> {
        match self.mode {
            IndicatorMode::Compatible => Some(mean(&last_closes(bars, self.period)?)),
            IndicatorMode::Standard => {
                if bars.len() < self.period {
                    return None;
                }
                let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
                ema_series(&closes, self.period).last().copied()
            }
        }
    }
}
