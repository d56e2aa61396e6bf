//! Bollinger Bands indicator.

use super::{last_closes, mean};
use crate::services::signals::Indicator;
use crate::types::Bar;

/// Middle, upper and lower band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub middle: f64,
    pub upper: f64,
    pub lower: f64,
}

impl Bands {
    /// Strictly between the bands.
    pub fn contains(&self, price: f64) -> bool {
        price > self.lower && price < self.upper
    }
}

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
///
/// StdDev is the population standard deviation of the same 20 closes.
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

impl BollingerBands {
    /// Calculate standard deviation.
    fn std_dev(values: &[f64], mean: f64) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let variance: f64 =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        variance.sqrt()
    }
}

impl Indicator for BollingerBands {
    type Output = Bands;

    fn id(&self) -> &str {
        "bollinger"
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, bars: &[Bar]) -> Option<Bands> {
        let closes = last_closes(bars, self.period)?;
        let middle = mean(&closes);
        let std_dev = Self::std_dev(&closes, middle);

        Some(Bands {
            middle,
            upper: middle + self.std_dev_multiplier * std_dev,
            lower: middle - self.std_dev_multiplier * std_dev,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::flat(1_000_000 + i as i64 * 60_000, c, 1000.0))
            .collect()
    }

    #[test]
    fn test_bollinger_population_std_dev() {
        // Ten 1.0s and ten 3.0s: mean 2, population std dev 1.
        let mut closes = vec![1.0; 10];
        closes.extend(vec![3.0; 10]);
        let bands = BollingerBands::default()
            .calculate(&create_bars_from_closes(&closes))
            .unwrap();
        assert!((bands.middle - 2.0).abs() < 1e-12);
        assert!((bands.upper - 4.0).abs() < 1e-12);
        assert!((bands.lower - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_flat_bands_collapse() {
        let bands = BollingerBands::default()
            .calculate(&create_bars_from_closes(&[1.5; 25]))
            .unwrap();
        assert_eq!(bands.upper, bands.lower);
        assert!(!bands.contains(1.5));
    }

    #[test]
    fn test_bollinger_insufficient_data() {
        let bars = create_bars_from_closes(&[1.0; 19]);
        assert!(BollingerBands::default().calculate(&bars).is_none());
    }
}
