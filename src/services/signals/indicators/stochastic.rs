//! Stochastic Oscillator indicator.

use crate::services::signals::Indicator;
use crate::types::Bar;

/// Stochastic Oscillator (%K).
///
/// Compares the latest close to the range of the last `k_period` bars:
/// %K = (Current Close - Lowest Low) / (Highest High - Lowest Low) * 100
///
/// Returns `None` when the range is empty (highest high == lowest low).
///
/// Signals:
/// - Below 20: Oversold (bullish)
/// - Above 80: Overbought (bearish)
pub struct Stochastic {
    k_period: usize,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self { k_period: 14 }
    }
}

impl Indicator for Stochastic {
    type Output = f64;

    fn id(&self) -> &str {
        "stochastic"
    }

    fn name(&self) -> &str {
        "Stochastic"
    }

    fn min_periods(&self) -> usize {
        self.k_period
    }

    fn calculate(&self, bars: &[Bar]) -> Option<f64> {
        if self.k_period == 0 || bars.len() < self.k_period {
            return None;
        }

        let window = &bars[bars.len() - self.k_period..];
        let lowest_low = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let highest_high = window
            .iter()
            .map(|b| b.high)
            .fold(f64::NEG_INFINITY, f64::max);

        let range = highest_high - lowest_low;
        if range == 0.0 || !range.is_finite() {
            return None;
        }

        let current_close = bars.last()?.close;
        Some((current_close - lowest_low) / range * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_uptrend_bars(count: usize) -> Vec<Bar> {
        (0..count)
            .map(|i| {
                let base = 100.0 + i as f64 * 1.5;
                Bar::new(
                    1_000_000 + i as i64 * 60_000,
                    base,
                    base + 2.0,
                    base - 1.0,
                    base + 1.0,
                    1000.0,
                )
            })
            .collect()
    }

    #[test]
    fn test_stochastic_id_and_name() {
        let stoch = Stochastic::default();
        assert_eq!(stoch.id(), "stochastic");
        assert_eq!(stoch.name(), "Stochastic");
        assert_eq!(stoch.min_periods(), 14);
    }

    #[test]
    fn test_stochastic_insufficient_data() {
        let bars = create_uptrend_bars(10);
        assert!(Stochastic::default().calculate(&bars).is_none());
    }

    #[test]
    fn test_stochastic_uptrend_high_k() {
        let bars = create_uptrend_bars(30);
        let k = Stochastic::default().calculate(&bars).unwrap();
        assert!(k > 50.0, "Stochastic %K in uptrend should be > 50, got {}", k);
        assert!((0.0..=100.0).contains(&k));
    }

    #[test]
    fn test_stochastic_exact_value() {
        // Last 14 bars: lows from 0, highs to 10, close at 2.5.
        let mut bars: Vec<Bar> = (0..14)
            .map(|i| Bar::new(i, 5.0, 5.0, 5.0, 5.0, 1.0))
            .collect();
        bars[0].low = 0.0;
        bars[5].high = 10.0;
        bars[13].close = 2.5;
        let k = Stochastic::default().calculate(&bars).unwrap();
        assert!((k - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_stochastic_degenerate_range_is_unavailable() {
        let bars: Vec<Bar> = (0..20).map(|i| Bar::flat(i, 1.2345, 500.0)).collect();
        assert!(Stochastic::default().calculate(&bars).is_none());
    }
}
