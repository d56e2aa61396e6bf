//! Average True Range (ATR) indicator.

use crate::services::signals::Indicator;
use crate::types::Bar;

/// ATR (Average True Range) indicator.
///
/// Plain mean of the true ranges of the last `period` bars, each against the
/// close before it:
/// TR = max(High-Low, |High-PrevClose|, |Low-PrevClose|)
pub struct Atr {
    period: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Indicator for Atr {
    type Output = f64;

    fn id(&self) -> &str {
        "atr"
    }

    fn name(&self) -> &str {
        "ATR (14)"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, bars: &[Bar]) -> Option<f64> {
        if self.period == 0 || bars.len() < self.min_periods() {
            return None;
        }

        let recent = &bars[bars.len() - self.min_periods()..];
        let total: f64 = recent
            .windows(2)
            .map(|pair| pair[1].true_range(pair[0].close))
            .sum();

        Some(total / self.period as f64)
    }
}
