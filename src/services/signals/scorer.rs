//! Weighted rule scoring of an indicator snapshot.
//!
//! Each rule that holds adds its weight to an integer strength and may record
//! a reason or a warning. Reasons are kept in rule order and capped at
//! [`MAX_REASONS`]; warnings are not capped. The final strength is classified
//! by [`SignalType::from_strength`] and the confidence follows from the
//! category and strength alone.

use crate::types::{IndicatorSnapshot, Signal, SignalType};

/// Reasons retained on a signal.
pub const MAX_REASONS: usize = 5;

const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;
const STOCH_OVERSOLD: f64 = 20.0;
const STOCH_OVERBOUGHT: f64 = 80.0;
const HIGH_VOLUME_RATIO: f64 = 1.3;
const LOW_VOLUME_RATIO: f64 = 0.7;

/// What a matching rule records besides its weight.
enum Note {
    Reason(&'static str),
    Warning(&'static str),
    Silent,
}

#[derive(Default)]
struct Scorecard {
    strength: i32,
    reasons: Vec<String>,
    warnings: Vec<String>,
}

impl Scorecard {
    fn rule(&mut self, holds: bool, weight: i32, note: Note) {
        if !holds {
            return;
        }
        self.strength += weight;
        match note {
            Note::Reason(text) => self.reasons.push(text.to_string()),
            Note::Warning(text) => self.warnings.push(text.to_string()),
            Note::Silent => {}
        }
    }

    fn warn(&mut self, holds: bool, text: &'static str) {
        self.rule(holds, 0, Note::Warning(text));
    }
}

/// Score `snapshot` against the latest close.
pub fn score(snapshot: &IndicatorSnapshot, price: f64) -> Signal {
    let s = snapshot;
    let rsi_between = |low: f64, high: f64| s.rsi.is_some_and(|r| r > low && r < high);
    let rsi_below = |level: f64| s.rsi.is_some_and(|r| r < level);
    let rsi_above = |level: f64| s.rsi.is_some_and(|r| r > level);
    let stochastic_below = |level: f64| s.stochastic.is_some_and(|k| k < level);
    let stochastic_above = |level: f64| s.stochastic.is_some_and(|k| k > level);
    let volume_above = |level: f64| s.volume_ratio.is_some_and(|v| v > level);
    let volume_below = |level: f64| s.volume_ratio.is_some_and(|v| v < level);

    let mut card = Scorecard::default();

    // Bullish
    card.rule(price > s.sma20, 15, Note::Reason("Price above SMA20"));
    card.rule(price > s.sma50, 15, Note::Reason("Price above SMA50"));
    card.rule(s.sma20 > s.sma50, 10, Note::Reason("Bullish MA crossover (SMA20 > SMA50)"));
    card.rule(
        rsi_between(RSI_OVERSOLD, RSI_OVERBOUGHT),
        10,
        Note::Reason("RSI in neutral zone"),
    );
    card.rule(rsi_below(RSI_OVERSOLD), 20, Note::Reason("RSI oversold - opportunity"));
    card.rule(s.macd > 0.0, 15, Note::Reason("MACD positive"));
    card.rule(s.histogram > 0.0, 5, Note::Reason("MACD histogram positive"));
    card.rule(price > s.lower_band && price < s.upper_band, 5, Note::Silent);
    card.rule(stochastic_below(STOCH_OVERSOLD), 15, Note::Reason("Stochastic oversold"));
    card.rule(volume_above(HIGH_VOLUME_RATIO), 10, Note::Reason("High volume confirms move"));

    // Bearish
    card.rule(price < s.sma20, -15, Note::Reason("Price below SMA20"));
    card.rule(price < s.sma50, -15, Note::Reason("Price below SMA50"));
    card.rule(s.sma20 < s.sma50, -10, Note::Reason("Bearish MA crossover (SMA20 < SMA50)"));
    card.rule(rsi_above(RSI_OVERBOUGHT), -20, Note::Warning("RSI overbought - caution"));
    card.rule(s.macd < 0.0, -15, Note::Reason("MACD negative"));
    card.rule(s.histogram < 0.0, -5, Note::Silent);
    card.rule(stochastic_above(STOCH_OVERBOUGHT), -15, Note::Reason("Stochastic overbought"));

    // Warnings
    card.warn(price > s.upper_band, "Price above upper Bollinger band");
    card.warn(price < s.lower_band, "Price below lower Bollinger band");
    card.warn(volume_below(LOW_VOLUME_RATIO), "Low volume - signal unreliable");

    let signal_type = SignalType::from_strength(card.strength);
    card.reasons.truncate(MAX_REASONS);

    Signal {
        signal_type,
        strength: card.strength,
        confidence: confidence_for(signal_type, card.strength),
        reasons: card.reasons,
        warnings: card.warnings,
    }
}

/// Confidence for a classified strength.
pub fn confidence_for(signal_type: SignalType, strength: i32) -> f64 {
    let magnitude = strength.unsigned_abs() as f64;
    match signal_type {
        SignalType::StrongBuy | SignalType::StrongSell => magnitude.min(95.0),
        SignalType::Buy | SignalType::Sell => (20.0 + magnitude).min(80.0),
        SignalType::Neutral => 50.0 - magnitude / 2.0,
    }
}
