//! Relative Strength Index (RSI) indicator.

use crate::services::signals::Indicator;
use crate::types::Bar;

/// RSI (Relative Strength Index) indicator.
///
/// Average gain over average loss across the last `period` close-to-close
/// changes, both divided by `period`. Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
///
/// A window with losses but no gains reads 0. A window with gains but no
/// losses uses RS = 100, so RSI saturates at ~99.01 rather than 100. A window
/// with no movement at all has no RSI.
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Rsi {
    /// RS used when there were gains and no losses.
    pub const SATURATED_RS: f64 = 100.0;

    pub fn new(period: usize) -> Self {
        Self { period }
    }

    fn from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
        if avg_gain == 0.0 && avg_loss == 0.0 {
            return None;
        }
        let rs = if avg_loss == 0.0 {
            Self::SATURATED_RS
        } else {
            avg_gain / avg_loss
        };
        Some(100.0 - (100.0 / (1.0 + rs)))
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn id(&self) -> &str {
        "rsi"
    }

    fn name(&self) -> &str {
        "RSI (14)"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, bars: &[Bar]) -> Option<f64> {
        if self.period == 0 || bars.len() < self.min_periods() {
            return None;
        }

        let recent = &bars[bars.len() - self.min_periods()..];
        let mut gains = 0.0;
        let mut losses = 0.0;

        for pair in recent.windows(2) {
            let change = pair[1].close - pair[0].close;
            if change > 0.0 {
                gains += change;
            } else {
                losses -= change;
            }
        }

        let period = self.period as f64;
        Self::from_averages(gains / period, losses / period)
    }
}
