//! Simple Moving Average (SMA) indicator.

use super::{last_closes, mean};
use crate::services::signals::Indicator;
use crate::types::Bar;

/// SMA (Simple Moving Average) indicator.
///
/// Arithmetic mean of the last `period` closes.
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn id(&self) -> &str {
        match self.period {
            20 => "sma20",
            50 => "sma50",
            _ => "sma",
        }
    }

    fn name(&self) -> &str {
        match self.period {
            20 => "SMA (20)",
            50 => "SMA (50)",
            _ => "SMA",
        }
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, bars: &[Bar]) -> Option<f64> {
        let window = last_closes(bars, self.period)?;
        Some(mean(&window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_bars(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::flat(1_000_000 + i as i64 * 60_000, c, 1000.0))
            .collect()
    }

    #[test]
    fn test_sma_id_and_name() {
        assert_eq!(Sma::new(20).id(), "sma20");
        assert_eq!(Sma::new(50).name(), "SMA (50)");
        assert_eq!(Sma::new(7).id(), "sma");
    }

    #[test]
    fn test_sma_insufficient_data() {
        let bars = create_bars(&[1.0, 2.0, 3.0]);
        assert!(Sma::new(5).calculate(&bars).is_none());
    }

    #[test]
    fn test_sma_uses_most_recent_closes() {
        let bars = create_bars(&[100.0, 1.0, 2.0, 3.0, 4.0]);
        let sma = Sma::new(4).calculate(&bars).unwrap();
        assert!((sma - 2.5).abs() < 1e-12);
    }
}
