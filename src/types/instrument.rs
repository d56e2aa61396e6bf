use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currency pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Instrument {
    #[default]
    #[serde(rename = "EUR/USD")]
    EurUsd,
    #[serde(rename = "GBP/USD")]
    GbpUsd,
    #[serde(rename = "USD/JPY")]
    UsdJpy,
    #[serde(rename = "AUD/USD")]
    AudUsd,
    #[serde(rename = "USD/CAD")]
    UsdCad,
    #[serde(rename = "USD/CHF")]
    UsdChf,
}

/// How a pair is derived from a USD-based rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateQuote {
    /// Pair is `XXX/USD`: price is `1 / rates[XXX]`.
    Inverted(&'static str),
    /// Pair is `USD/XXX`: price is `rates[XXX]`.
    Direct(&'static str),
}

impl Instrument {
    pub const ALL: [Instrument; 6] = [
        Instrument::EurUsd,
        Instrument::GbpUsd,
        Instrument::UsdJpy,
        Instrument::AudUsd,
        Instrument::UsdCad,
        Instrument::UsdChf,
    ];

    /// Parse from a pair code such as `"EUR/USD"` or `"eurusd"`.
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_uppercase();
        match normalized.as_str() {
            "EURUSD" => Some(Self::EurUsd),
            "GBPUSD" => Some(Self::GbpUsd),
            "USDJPY" => Some(Self::UsdJpy),
            "AUDUSD" => Some(Self::AudUsd),
            "USDCAD" => Some(Self::UsdCad),
            "USDCHF" => Some(Self::UsdChf),
            _ => None,
        }
    }

    /// Pair code, e.g. `"EUR/USD"`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EurUsd => "EUR/USD",
            Self::GbpUsd => "GBP/USD",
            Self::UsdJpy => "USD/JPY",
            Self::AudUsd => "AUD/USD",
            Self::UsdCad => "USD/CAD",
            Self::UsdChf => "USD/CHF",
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EurUsd => "Euro / US Dollar",
            Self::GbpUsd => "British Pound / US Dollar",
            Self::UsdJpy => "US Dollar / Japanese Yen",
            Self::AudUsd => "Australian Dollar / US Dollar",
            Self::UsdCad => "US Dollar / Canadian Dollar",
            Self::UsdChf => "US Dollar / Swiss Franc",
        }
    }

    /// Reference rate used when no live rate has ever been seen.
    pub fn base_rate(&self) -> f64 {
        match self {
            Self::EurUsd => 1.0850,
            Self::GbpUsd => 1.2650,
            Self::UsdJpy => 149.50,
            Self::AudUsd => 0.6580,
            Self::UsdCad => 1.3620,
            Self::UsdChf => 0.8450,
        }
    }

    /// Quoted decimal places.
    pub fn decimals(&self) -> u32 {
        match self {
            Self::UsdJpy => 2,
            _ => 4,
        }
    }

    /// Absolute per-bar volatility used to generate seed history.
    pub fn seed_volatility(&self) -> f64 {
        match self {
            Self::UsdJpy => 0.3,
            _ => 0.0008,
        }
    }

    /// Absolute per-tick volatility used for streaming bars.
    pub fn tick_volatility(&self) -> f64 {
        match self {
            Self::UsdJpy => 0.15,
            _ => 0.0004,
        }
    }

    /// Jitter applied to the base rate when the live rate table is unreachable.
    pub fn rate_jitter(&self) -> f64 {
        match self {
            Self::UsdJpy => 0.5,
            _ => 0.01,
        }
    }

    pub fn rate_quote(&self) -> RateQuote {
        match self {
            Self::EurUsd => RateQuote::Inverted("EUR"),
            Self::GbpUsd => RateQuote::Inverted("GBP"),
            Self::AudUsd => RateQuote::Inverted("AUD"),
            Self::UsdJpy => RateQuote::Direct("JPY"),
            Self::UsdCad => RateQuote::Direct("CAD"),
            Self::UsdChf => RateQuote::Direct("CHF"),
        }
    }

    /// Round a price to the pair's quoted precision.
    pub fn round_price(&self, price: f64) -> f64 {
        round_to(price, self.decimals())
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Round `value` to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Chart timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    #[serde(rename = "1M")]
    OneMinute,
    #[serde(rename = "5M")]
    FiveMinutes,
    #[serde(rename = "15M")]
    FifteenMinutes,
    #[default]
    #[serde(rename = "1H")]
    OneHour,
    #[serde(rename = "4H")]
    FourHours,
    #[serde(rename = "1D")]
    OneDay,
}

impl Timeframe {
    /// Parse from a label such as `"1H"` (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "1M" => Some(Self::OneMinute),
            "5M" => Some(Self::FiveMinutes),
            "15M" => Some(Self::FifteenMinutes),
            "1H" => Some(Self::OneHour),
            "4H" => Some(Self::FourHours),
            "1D" => Some(Self::OneDay),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OneMinute => "1 Min",
            Self::FiveMinutes => "5 Min",
            Self::FifteenMinutes => "15 Min",
            Self::OneHour => "1 Hour",
            Self::FourHours => "4 Hours",
            Self::OneDay => "1 Day",
        }
    }

    /// Bar duration in milliseconds.
    pub fn bar_millis(&self) -> i64 {
        match self {
            Self::OneMinute => 60_000,
            Self::FiveMinutes => 300_000,
            Self::FifteenMinutes => 900_000,
            Self::OneHour => 3_600_000,
            Self::FourHours => 14_400_000,
            Self::OneDay => 86_400_000,
        }
    }
}
