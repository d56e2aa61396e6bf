//! Trading plan derived from signal direction and pivot levels.

use crate::types::{IndicatorSnapshot, SignalType, TradeDirection, TradingPlan};

/// Build the entry/stop/target plan at `entry`.
///
/// Long plans stop at S1 and target R1/R2; everything else is planned short,
/// stopping at R1 and targeting S1/S2.
pub fn build_plan(signal_type: SignalType, snapshot: &IndicatorSnapshot, entry: f64) -> TradingPlan {
    let direction = signal_type.direction();
    let (stop_loss, take_profit1, take_profit2) = match direction {
        TradeDirection::Long => (snapshot.support1, snapshot.resistance1, snapshot.resistance2),
        TradeDirection::Short => (snapshot.resistance1, snapshot.support1, snapshot.support2),
    };

    TradingPlan {
        direction,
        entry,
        stop_loss,
        take_profit1,
        take_profit2,
        risk_reward: risk_reward(entry, stop_loss, take_profit1),
    }
}

/// `|target - entry| / |entry - stop|`, `None` when entry equals the stop.
pub fn risk_reward(entry: f64, stop_loss: f64, take_profit: f64) -> Option<f64> {
    let risk = (entry - stop_loss).abs();
    if risk == 0.0 || !risk.is_finite() {
        return None;
    }
    Some((take_profit - entry).abs() / risk)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels() -> IndicatorSnapshot {
        IndicatorSnapshot {
            sma20: 1.1,
            sma50: 1.1,
            ema12: 1.1,
            ema26: 1.1,
            rsi: Some(50.0),
            macd: 0.0,
            macd_signal: 0.0,
            histogram: 0.0,
            upper_band: 1.2,
            lower_band: 1.0,
            stochastic: Some(50.0),
            atr: 0.001,
            volume_ratio: Some(1.0),
            pivot_point: 1.10,
            support1: 1.08,
            support2: 1.06,
            resistance1: 1.13,
            resistance2: 1.15,
        }
    }

    #[test]
    fn test_long_plan() {
        let plan = build_plan(SignalType::Buy, &levels(), 1.10);
        assert_eq!(plan.direction, TradeDirection::Long);
        assert_eq!(plan.stop_loss, 1.08);
        assert_eq!(plan.take_profit1, 1.13);
        assert_eq!(plan.take_profit2, 1.15);
        assert!(plan.take_profit1 > plan.entry && plan.entry > plan.stop_loss);
        assert!((plan.risk_reward.unwrap() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_short_plan() {
        for signal_type in [SignalType::Sell, SignalType::StrongSell, SignalType::Neutral] {
            let plan = build_plan(signal_type, &levels(), 1.10);
            assert_eq!(plan.direction, TradeDirection::Short);
            assert_eq!(plan.stop_loss, 1.13);
            assert_eq!(plan.take_profit1, 1.08);
            assert_eq!(plan.take_profit2, 1.06);
            assert!(plan.take_profit1 < plan.entry && plan.entry < plan.stop_loss);
        }
    }

    #[test]
    fn test_entry_at_stop_has_no_ratio() {
        let plan = build_plan(SignalType::StrongBuy, &levels(), 1.08);
        assert!(plan.risk_reward.is_none());
    }
}
