//! Type Tests
//!
//! Serialization shapes and parsing of the public data types.

use fxsignal::types::{
    Bar, IndicatorMode, Instrument, MarketSentiment, NotificationEvent, NotificationLevel,
    NotificationPayload, Signal, SignalType, Timeframe, TradeDirection, VolatilityLevel,
};
use serde_json::json;

#[test]
fn test_signal_type_serialization() {
    assert_eq!(serde_json::to_value(SignalType::StrongBuy).unwrap(), json!("STRONG_BUY"));
    assert_eq!(serde_json::to_value(SignalType::Sell).unwrap(), json!("SELL"));
    let parsed: SignalType = serde_json::from_value(json!("STRONG_SELL")).unwrap();
    assert_eq!(parsed, SignalType::StrongSell);
}

#[test]
fn test_signal_type_direction_lookup() {
    assert_eq!(SignalType::StrongBuy.direction(), TradeDirection::Long);
    assert_eq!(SignalType::Buy.direction(), TradeDirection::Long);
    assert_eq!(SignalType::Neutral.direction(), TradeDirection::Short);
    assert_eq!(SignalType::StrongSell.direction(), TradeDirection::Short);
    assert_eq!(SignalType::StrongBuy.label(), "STRONG BUY");
}

#[test]
fn test_signal_uses_type_key() {
    let signal = Signal {
        signal_type: SignalType::Buy,
        strength: 45,
        confidence: 65.0,
        reasons: vec!["MACD positive".to_string()],
        warnings: vec![],
    };
    let value = serde_json::to_value(&signal).unwrap();
    assert_eq!(value["type"], json!("BUY"));
    assert_eq!(value["strength"], json!(45));
    assert_eq!(value["reasons"][0], json!("MACD positive"));
}

#[test]
fn test_instrument_parsing_and_serialization() {
    assert_eq!(Instrument::from_str("EUR/USD"), Some(Instrument::EurUsd));
    assert_eq!(Instrument::from_str("usdjpy"), Some(Instrument::UsdJpy));
    assert_eq!(Instrument::from_str("usd-chf"), Some(Instrument::UsdChf));
    assert_eq!(Instrument::from_str("BTC/USD"), None);

    assert_eq!(serde_json::to_value(Instrument::GbpUsd).unwrap(), json!("GBP/USD"));
    assert_eq!(Instrument::UsdJpy.to_string(), "USD/JPY");
    assert_eq!(Instrument::UsdJpy.round_price(149.5049), 149.5);
    assert_eq!(Instrument::EurUsd.round_price(1.08506), 1.0851);
}

#[test]
fn test_timeframe_parsing() {
    assert_eq!(Timeframe::from_str("4h"), Some(Timeframe::FourHours));
    assert_eq!(Timeframe::from_str("1D"), Some(Timeframe::OneDay));
    assert_eq!(Timeframe::from_str("2H"), None);
    assert_eq!(Timeframe::OneMinute.bar_millis(), 60_000);
    assert_eq!(serde_json::to_value(Timeframe::FifteenMinutes).unwrap(), json!("15M"));
}

#[test]
fn test_indicator_mode_parsing() {
    assert_eq!(IndicatorMode::default(), IndicatorMode::Compatible);
    assert_eq!(IndicatorMode::from_str("Standard"), Some(IndicatorMode::Standard));
    assert_eq!(IndicatorMode::from_str("exotic"), None);
}

#[test]
fn test_bar_true_range() {
    let bar = Bar::new(0, 1.0, 1.02, 0.99, 1.01, 100.0);
    assert!((bar.range() - 0.03).abs() < 1e-12);
    assert!((bar.true_range(0.95) - 0.07).abs() < 1e-12);
    assert!((bar.true_range(1.05) - 0.06).abs() < 1e-12);
}

#[test]
fn test_sentiment_and_volatility_labels() {
    let bullish = MarketSentiment::from_strength(40);
    assert_eq!((bullish.bullish, bullish.bearish), (70.0, 50.0));
    let bearish = MarketSentiment::from_strength(-40);
    assert_eq!((bearish.bullish, bearish.bearish), (50.0, 70.0));

    assert_eq!(VolatilityLevel::from_atr(0.002), VolatilityLevel::High);
    assert_eq!(VolatilityLevel::from_atr(0.001), VolatilityLevel::Normal);
}

#[test]
fn test_notification_event_shapes() {
    let changed = NotificationEvent::signal_changed(
        "EUR/USD",
        SignalType::Buy,
        SignalType::Sell,
        55.0,
        1_700_000_000_000,
    );
    assert_eq!(changed.level, NotificationLevel::Warning);
    assert_eq!(changed.message, "New signal: SELL on EUR/USD");

    let value = serde_json::to_value(&changed).unwrap();
    assert_eq!(value["kind"], json!("SIGNAL_CHANGED"));
    assert_eq!(value["level"], json!("warning"));
    assert_eq!(value["payload"]["kind"], json!("SIGNAL_CHANGED"));
    assert_eq!(value["payload"]["previous"], json!("BUY"));
    assert_eq!(value["timestamp"], json!(1_700_000_000_000i64));

    let moved = NotificationEvent::large_move("USD/JPY", 148.2, -0.62, 0);
    assert_eq!(moved.level, NotificationLevel::Alert);
    assert_eq!(moved.message, "Large move: -0.62% on USD/JPY");
    match moved.payload {
        NotificationPayload::LargeMove {
            price_change_percent,
            ..
        } => assert_eq!(price_change_percent, -0.62),
        other => panic!("unexpected payload {:?}", other),
    }
    let value = serde_json::to_value(&moved).unwrap();
    assert_eq!(value["payload"]["priceChangePercent"], json!(-0.62));
}
