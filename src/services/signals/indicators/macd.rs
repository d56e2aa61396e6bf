//! MACD (Moving Average Convergence Divergence) indicator.

use super::ema::{ema_series, Ema};
use crate::services::signals::Indicator;
use crate::types::{Bar, IndicatorMode};

/// MACD line, signal line and histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdOutput {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// MACD indicator.
///
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line ([`IndicatorMode::Standard`]), or the
///   MACD line itself ([`IndicatorMode::Compatible`], histogram always 0)
/// - Histogram = MACD Line - Signal Line
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    mode: IndicatorMode,
}

impl Macd {
    pub fn new(mode: IndicatorMode) -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
            mode,
        }
    }

    fn standard(&self, bars: &[Bar]) -> Option<MacdOutput> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        let fast_ema = ema_series(&closes, self.fast_period);
        let slow_ema = ema_series(&closes, self.slow_period);

        if fast_ema.is_empty() || slow_ema.is_empty() {
            return None;
        }

        // Fast series starts earlier; align on the slow one.
        let offset = self.slow_period - self.fast_period;
        let macd_line: Vec<f64> = fast_ema
            .iter()
            .skip(offset)
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect();

        let signal_line = ema_series(&macd_line, self.signal_period);

        let macd = *macd_line.last()?;
        let signal = *signal_line.last()?;

        Some(MacdOutput {
            macd,
            signal,
            histogram: macd - signal,
        })
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(IndicatorMode::default())
    }
}

impl Indicator for Macd {
    type Output = MacdOutput;

    fn id(&self) -> &str {
        "macd"
    }

    fn name(&self) -> &str {
        "MACD"
    }

    fn min_periods(&self) -> usize {
        match self.mode {
            IndicatorMode::Compatible => self.slow_period,
            IndicatorMode::Standard => self.slow_period + self.signal_period - 1,
        }
    }

    fn calculate(&self, bars: &[Bar]) -> Option<MacdOutput> {
        if bars.len() < self.min_periods() {
            return None;
        }

        match self.mode {
            IndicatorMode::Compatible => {
                let fast = Ema::new(self.fast_period, self.mode).calculate(bars)?;
                let slow = Ema::new(self.slow_period, self.mode).calculate(bars)?;
                let macd = fast - slow;
                Some(MacdOutput {
                    macd,
                    signal: macd,
                    histogram: 0.0,
                })
            }
            IndicatorMode::Standard => self.standard(bars),
        }
    }
}
