//! Notification events emitted by the stream processor.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SignalType;

/// What happened.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    SignalChanged,
    LargeMove,
}

/// Severity hint for presentation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Warning,
    Alert,
}

impl NotificationLevel {
    pub fn as_str(&self) -> &str {
        match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Alert => "alert",
        }
    }
}

/// Event-specific data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationPayload {
    #[serde(rename_all = "camelCase")]
    SignalChanged {
        previous: SignalType,
        current: SignalType,
        confidence: f64,
    },
    #[serde(rename_all = "camelCase")]
    LargeMove {
        price: f64,
        price_change_percent: f64,
    },
}

/// A notification event. Emitted, never stored by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub level: NotificationLevel,
    /// Instrument code, e.g. `"EUR/USD"`.
    pub instrument: String,
    pub message: String,
    pub payload: NotificationPayload,
    /// Timestamp in milliseconds
    pub timestamp: i64,
}

impl NotificationEvent {
    /// Signal flipped from `previous` to `current`.
    pub fn signal_changed(
        instrument: &str,
        previous: SignalType,
        current: SignalType,
        confidence: f64,
        timestamp: i64,
    ) -> Self {
        let level = if current.is_bullish() {
            NotificationLevel::Success
        } else {
            NotificationLevel::Warning
        };
        Self {
            id: Uuid::new_v4(),
            kind: NotificationKind::SignalChanged,
            level,
            instrument: instrument.to_string(),
            message: format!("New signal: {} on {}", current.label(), instrument),
            payload: NotificationPayload::SignalChanged {
                previous,
                current,
                confidence,
            },
            timestamp,
        }
    }

    /// Close-to-close move beyond the configured threshold.
    pub fn large_move(instrument: &str, price: f64, price_change_percent: f64, timestamp: i64) -> Self {
        let sign = if price_change_percent > 0.0 { "+" } else { "" };
        Self {
            id: Uuid::new_v4(),
            kind: NotificationKind::LargeMove,
            level: NotificationLevel::Alert,
            instrument: instrument.to_string(),
            message: format!(
                "Large move: {}{:.2}% on {}",
                sign, price_change_percent, instrument
            ),
            payload: NotificationPayload::LargeMove {
                price,
                price_change_percent,
            },
            timestamp,
        }
    }
}
