use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::sources::DEFAULT_RATES_URL;
use crate::types::{AnalysisSettings, IndicatorMode, Instrument, Timeframe};

const MIN_HISTORY_FLOOR: usize = AnalysisSettings::MIN_HISTORY_FLOOR;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Instrument being analysed.
    pub instrument: Instrument,
    /// Timeframe used to space seeded history.
    pub timeframe: Timeframe,
    /// Processing cycle interval in milliseconds.
    pub tick_interval_ms: u64,
    /// Bar window capacity.
    pub window_capacity: usize,
    /// Bars required before analysis is produced.
    pub min_history: usize,
    /// Threshold on |price change %| for large-move notifications.
    pub large_move_pct: f64,
    pub indicator_mode: IndicatorMode,
    /// Live rate endpoint.
    pub rates_url: String,
    /// HTTP timeout for the live feed in milliseconds.
    pub feed_timeout_ms: u64,
    /// Use the synthetic feed only.
    pub offline: bool,
    /// Notifications retained by the log.
    pub notification_log_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instrument: Instrument::default(),
            timeframe: Timeframe::default(),
            tick_interval_ms: 4000,
            window_capacity: 100,
            min_history: MIN_HISTORY_FLOOR,
            large_move_pct: 0.5,
            indicator_mode: IndicatorMode::default(),
            rates_url: DEFAULT_RATES_URL.to_string(),
            feed_timeout_ms: 3000,
            offline: false,
            notification_log_capacity: 10,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Missing or
    /// unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            instrument: lookup("INSTRUMENT")
                .and_then(|v| Instrument::from_str(&v))
                .unwrap_or(defaults.instrument),
            timeframe: lookup("TIMEFRAME")
                .and_then(|v| Timeframe::from_str(v.trim()))
                .unwrap_or(defaults.timeframe),
            tick_interval_ms: parse_key(&lookup, "TICK_INTERVAL_MS").unwrap_or(defaults.tick_interval_ms),
            window_capacity: parse_key(&lookup, "WINDOW_CAPACITY").unwrap_or(defaults.window_capacity),
            min_history: parse_key(&lookup, "MIN_HISTORY").unwrap_or(defaults.min_history),
            large_move_pct: parse_key(&lookup, "LARGE_MOVE_PCT").unwrap_or(defaults.large_move_pct),
            indicator_mode: lookup("INDICATOR_MODE")
                .and_then(|v| IndicatorMode::from_str(v.trim()))
                .unwrap_or(defaults.indicator_mode),
            rates_url: lookup("RATES_URL").unwrap_or(defaults.rates_url),
            feed_timeout_ms: parse_key(&lookup, "FEED_TIMEOUT_MS").unwrap_or(defaults.feed_timeout_ms),
            offline: lookup("OFFLINE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.offline),
            notification_log_capacity: parse_key(&lookup, "NOTIFICATION_LOG_CAPACITY")
                .unwrap_or(defaults.notification_log_capacity),
        }
    }

    /// Reject settings the processor cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.min_history < MIN_HISTORY_FLOOR {
            return Err(AppError::InvalidConfig(format!(
                "MIN_HISTORY must be at least {}, got {}",
                MIN_HISTORY_FLOOR, self.min_history
            )));
        }
        if self.window_capacity < self.min_history {
            return Err(AppError::InvalidConfig(format!(
                "WINDOW_CAPACITY ({}) must be at least MIN_HISTORY ({})",
                self.window_capacity, self.min_history
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(AppError::InvalidConfig(
                "TICK_INTERVAL_MS must be positive".to_string(),
            ));
        }
        if self.large_move_pct.is_nan() || self.large_move_pct < 0.0 {
            return Err(AppError::InvalidConfig(format!(
                "LARGE_MOVE_PCT must be a non-negative number, got {}",
                self.large_move_pct
            )));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_millis(self.feed_timeout_ms)
    }

    /// Settings handed to the analysis core.
    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            window_capacity: self.window_capacity,
            min_history: self.min_history,
            large_move_pct: self.large_move_pct,
            indicator_mode: self.indicator_mode,
            price_decimals: self.instrument.decimals(),
        }
    }
}

/// Parse `key` from `lookup`, `None` when missing or unparsable.
fn parse_key<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]);
        assert_eq!(config.instrument, Instrument::EurUsd);
        assert_eq!(config.timeframe, Timeframe::OneHour);
        assert_eq!(config.tick_interval(), Duration::from_secs(4));
        assert_eq!(config.window_capacity, 100);
        assert_eq!(config.min_history, 50);
        assert_eq!(config.large_move_pct, 0.5);
        assert_eq!(config.indicator_mode, IndicatorMode::Compatible);
        assert_eq!(config.rates_url, DEFAULT_RATES_URL);
        assert!(!config.offline);
        assert_eq!(config.notification_log_capacity, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("INSTRUMENT", "usd/jpy"),
            ("TIMEFRAME", "15m"),
            ("WINDOW_CAPACITY", "200"),
            ("INDICATOR_MODE", "standard"),
            ("OFFLINE", "true"),
        ]);
        assert_eq!(config.instrument, Instrument::UsdJpy);
        assert_eq!(config.timeframe, Timeframe::FifteenMinutes);
        assert_eq!(config.window_capacity, 200);
        assert_eq!(config.indicator_mode, IndicatorMode::Standard);
        assert!(config.offline);

        let settings = config.analysis_settings();
        assert_eq!(settings.window_capacity, 200);
        assert_eq!(settings.price_decimals, 2);
    }

    #[test]
    fn test_numeric_keys_parse_to_their_own_types() {
        let config = from_pairs(&[
            ("TICK_INTERVAL_MS", "2500"),
            ("WINDOW_CAPACITY", " 150 "),
            ("MIN_HISTORY", "75"),
            ("LARGE_MOVE_PCT", "0.25"),
            ("FEED_TIMEOUT_MS", "1200"),
            ("NOTIFICATION_LOG_CAPACITY", "25"),
        ]);
        assert_eq!(config.tick_interval(), Duration::from_millis(2500));
        assert_eq!(config.window_capacity, 150);
        assert_eq!(config.min_history, 75);
        assert_eq!(config.large_move_pct, 0.25);
        assert_eq!(config.feed_timeout(), Duration::from_millis(1200));
        assert_eq!(config.notification_log_capacity, 25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unparsable_values_keep_defaults() {
        let config = from_pairs(&[("TICK_INTERVAL_MS", "soon"), ("INSTRUMENT", "BTC/USD")]);
        assert_eq!(config.tick_interval_ms, 4000);
        assert_eq!(config.instrument, Instrument::EurUsd);
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        assert!(from_pairs(&[("MIN_HISTORY", "20")]).validate().is_err());
        assert!(from_pairs(&[("WINDOW_CAPACITY", "40")]).validate().is_err());
        assert!(from_pairs(&[("TICK_INTERVAL_MS", "0")]).validate().is_err());
        assert!(from_pairs(&[("LARGE_MOVE_PCT", "-1")]).validate().is_err());
        assert!(from_pairs(&[("LARGE_MOVE_PCT", "NaN")]).validate().is_err());
    }
}
