//! Classic pivot point with two support and resistance tiers.

use crate::services::signals::Indicator;
use crate::types::Bar;

/// Pivot levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotLevels {
    pub pivot: f64,
    pub support1: f64,
    pub support2: f64,
    pub resistance1: f64,
    pub resistance2: f64,
}

/// Classic floor pivots from the most recent bar:
/// - P = (H + L + C) / 3
/// - R1 = 2P - L, S1 = 2P - H
/// - R2 = P + (H - L), S2 = P - (H - L)
#[derive(Default)]
pub struct PivotPoints;

impl Indicator for PivotPoints {
    type Output = PivotLevels;

    fn id(&self) -> &str {
        "pivot"
    }

    fn name(&self) -> &str {
        "Pivot Points"
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn calculate(&self, bars: &[Bar]) -> Option<PivotLevels> {
        let last = bars.last()?;
        let pivot = (last.high + last.low + last.close) / 3.0;
        let range = last.range();

        Some(PivotLevels {
            pivot,
            support1: 2.0 * pivot - last.high,
            support2: pivot - range,
            resistance1: 2.0 * pivot - last.low,
            resistance2: pivot + range,
        })
    }
}
