//! One full analysis pass over a window of bars.

use crate::error::{AppError, Result};
use crate::services::signals::indicators::IndicatorEngine;
use crate::services::signals::{plan, scorer};
use crate::types::{
    round_to, Analysis, AnalysisSettings, Bar, MarketSentiment, Trend, VolatilityLevel,
};

/// Bars back the momentum prediction compares against.
const MOMENTUM_LOOKBACK: usize = 10;

/// Runs indicators, scoring and plan derivation. Holds no state between calls.
pub struct Analyzer {
    engine: IndicatorEngine,
    settings: AnalysisSettings,
}

impl Analyzer {
    pub fn new(settings: AnalysisSettings) -> Self {
        Self {
            engine: IndicatorEngine::new(settings.indicator_mode),
            settings,
        }
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Bars required before [`Analyzer::analyze`] succeeds.
    pub fn required_history(&self) -> usize {
        self.settings
            .min_history
            .max(AnalysisSettings::MIN_HISTORY_FLOOR)
            .max(self.engine.min_periods())
    }

    /// Analyze `bars` (oldest first).
    pub fn analyze(&self, bars: &[Bar]) -> Result<Analysis> {
        let need = self.required_history();
        let insufficient = || AppError::InsufficientHistory {
            have: bars.len(),
            need,
        };
        if bars.len() < need {
            return Err(insufficient());
        }

        let indicators = self.engine.compute(bars).ok_or_else(insufficient)?;
        let last = bars[bars.len() - 1];
        let previous = bars[bars.len() - 2];
        let current_price = last.close;

        let price_change = current_price - previous.close;
        let price_change_percent = percent_change(previous.close, current_price);

        let signal = scorer::score(&indicators, current_price);
        let plan = plan::build_plan(signal.signal_type, &indicators, current_price);

        let reference = bars[bars.len() - MOMENTUM_LOOKBACK].close;
        let momentum = if reference != 0.0 {
            (current_price - reference) / reference
        } else {
            0.0
        };
        let prediction = round_to(
            current_price * (1.0 + momentum * 0.5),
            self.settings.price_decimals,
        );

        let trend = if current_price > indicators.sma20 {
            Trend::Bullish
        } else {
            Trend::Bearish
        };

        Ok(Analysis {
            timestamp: last.timestamp,
            current_price,
            price_change,
            price_change_percent,
            volatility: VolatilityLevel::from_atr(indicators.atr),
            sentiment: MarketSentiment::from_strength(signal.strength),
            indicators,
            signal,
            plan,
            prediction,
            trend,
        })
    }
}

/// Percent change from `from` to `to`, zero when `from` is zero.
pub fn percent_change(from: f64, to: f64) -> f64 {
    if from == 0.0 {
        return 0.0;
    }
    (to - from) / from * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IndicatorMode, TradeDirection};

    fn create_bars(closes: impl Iterator<Item = f64>) -> Vec<Bar> {
        closes
            .enumerate()
            .map(|(i, c)| {
                Bar::new(
                    1_000_000 + i as i64 * 60_000,
                    c,
                    c + 0.0005,
                    c - 0.0005,
                    c,
                    40_000.0,
                )
            })
            .collect()
    }

    #[test]
    fn test_analyze_insufficient_history() {
        let analyzer = Analyzer::new(AnalysisSettings::default());
        let bars = create_bars((0..49).map(|_| 1.1));
        match analyzer.analyze(&bars) {
            Err(AppError::InsufficientHistory { have, need }) => {
                assert_eq!(have, 49);
                assert_eq!(need, 50);
            }
            other => panic!("expected InsufficientHistory, got {:?}", other),
        }
    }

    #[test]
    fn test_min_history_never_below_floor() {
        let settings = AnalysisSettings {
            min_history: 10,
            ..AnalysisSettings::default()
        };
        assert_eq!(Analyzer::new(settings).required_history(), 50);
    }

    #[test]
    fn test_analyze_uptrend() {
        let analyzer = Analyzer::new(AnalysisSettings::default());
        let bars = create_bars((0..60).map(|i| 1.0 + i as f64 * 0.001));
        let analysis = analyzer.analyze(&bars).unwrap();
        assert_eq!(analysis.trend, Trend::Bullish);
        assert!(analysis.price_change > 0.0);
        assert!(analysis.prediction > analysis.current_price);
        // Saturated RSI and a stochastic pinned near the top pull the
        // strength back, but the trend rules still dominate.
        assert!(analysis.signal.strength > 0);
        assert!(analysis.sentiment.bullish > 50.0);
        assert_eq!(analysis.timestamp, bars[59].timestamp);
    }

    #[test]
    fn test_analyze_downtrend_short_plan() {
        let analyzer = Analyzer::new(AnalysisSettings::default());
        let bars = create_bars((0..60).map(|i| 1.2 - i as f64 * 0.001));
        let analysis = analyzer.analyze(&bars).unwrap();
        assert!(analysis.signal.strength < 0);
        assert!(!analysis.signal.signal_type.is_bullish());
        assert_eq!(analysis.plan.direction, TradeDirection::Short);
        assert!(analysis.plan.take_profit1 < analysis.plan.entry);
        assert!(analysis.plan.stop_loss > analysis.plan.entry);
        assert!(analysis.sentiment.bearish > 50.0);
    }

    #[test]
    fn test_standard_mode_changes_macd_only_family() {
        let bars = create_bars((0..100).map(|i| 1.1 + (i as f64 / 6.0).sin() * 0.003));
        let compatible = Analyzer::new(AnalysisSettings::default()).analyze(&bars).unwrap();
        let standard = Analyzer::new(AnalysisSettings {
            indicator_mode: IndicatorMode::Standard,
            ..AnalysisSettings::default()
        })
        .analyze(&bars)
        .unwrap();
        assert_eq!(compatible.indicators.sma20, standard.indicators.sma20);
        assert_eq!(compatible.indicators.rsi, standard.indicators.rsi);
        assert_ne!(compatible.indicators.ema12, standard.indicators.ema12);
    }

    #[test]
    fn test_percent_change() {
        assert!((percent_change(2.0, 2.02) - 1.0).abs() < 1e-9);
        assert_eq!(percent_change(0.0, 1.0), 0.0);
    }
}
