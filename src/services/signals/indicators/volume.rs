//! Volume ratio.

use super::mean;
use crate::services::signals::Indicator;
use crate::types::Bar;

/// Latest volume over the mean volume of the last `period` bars.
///
/// `None` when that mean is zero.
pub struct VolumeRatio {
    period: usize,
}

impl Default for VolumeRatio {
    fn default() -> Self {
        Self { period: 20 }
    }
}

impl Indicator for VolumeRatio {
    type Output = f64;

    fn id(&self) -> &str {
        "volume_ratio"
    }

    fn name(&self) -> &str {
        "Volume Ratio (20)"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, bars: &[Bar]) -> Option<f64> {
        if self.period == 0 || bars.len() < self.period {
            return None;
        }

        let volumes: Vec<f64> = bars[bars.len() - self.period..]
            .iter()
            .map(|b| b.volume)
            .collect();
        let average = mean(&volumes);
        if average == 0.0 {
            return None;
        }

        Some(bars.last()?.volume / average)
    }
}
