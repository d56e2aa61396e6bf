use serde::{Deserialize, Serialize};

/// Composite signal category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalType {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

/// Side a trading plan is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeDirection {
    Long,
    Short,
}

impl SignalType {
    /// Classify a strength score, highest threshold first.
    pub fn from_strength(strength: i32) -> Self {
        match strength {
            s if s > 60 => SignalType::StrongBuy,
            s if s > 30 => SignalType::Buy,
            s if s < -60 => SignalType::StrongSell,
            s if s < -30 => SignalType::Sell,
            _ => SignalType::Neutral,
        }
    }

    /// Get display label for this signal.
    pub fn label(&self) -> &'static str {
        match self {
            SignalType::StrongBuy => "STRONG BUY",
            SignalType::Buy => "BUY",
            SignalType::Neutral => "NEUTRAL",
            SignalType::Sell => "SELL",
            SignalType::StrongSell => "STRONG SELL",
        }
    }

    /// Plan direction. Neutral and sell signals are planned short.
    pub fn direction(&self) -> TradeDirection {
        match self {
            SignalType::StrongBuy | SignalType::Buy => TradeDirection::Long,
            SignalType::Neutral | SignalType::Sell | SignalType::StrongSell => {
                TradeDirection::Short
            }
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.direction() == TradeDirection::Long
    }
}

/// Which formulas the moving-average family uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorMode {
    /// "EMA" is the simple mean of the last `p` closes and the MACD signal
    /// line equals the MACD line, so the histogram is always zero.
    #[default]
    Compatible,
    /// Recursive EMA seeded with the SMA and an EMA(9) MACD signal line.
    Standard,
}

impl IndicatorMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "compatible" | "compat" | "legacy" => Some(Self::Compatible),
            "standard" | "recursive" => Some(Self::Standard),
            _ => None,
        }
    }
}

/// Parameters the analysis pipeline runs with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSettings {
    /// Bar Window capacity.
    pub window_capacity: usize,
    /// Bars required before any analysis is produced.
    pub min_history: usize,
    /// LARGE_MOVE threshold on the absolute percent change.
    pub large_move_pct: f64,
    pub indicator_mode: IndicatorMode,
    /// Decimal places the momentum prediction is rounded to.
    pub price_decimals: u32,
}

impl AnalysisSettings {
    /// Indicators need 50 bars regardless of configuration.
    pub const MIN_HISTORY_FLOOR: usize = 50;
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            window_capacity: 100,
            min_history: Self::MIN_HISTORY_FLOOR,
            large_move_pct: 0.5,
            indicator_mode: IndicatorMode::Compatible,
            price_decimals: 4,
        }
    }
}

/// Indicator values for the current window.
///
/// Always a pure function of the window; rebuilt on every update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub sma20: f64,
    pub sma50: f64,
    pub ema12: f64,
    pub ema26: f64,
    /// `None` when no close moved over the last 14 changes.
    pub rsi: Option<f64>,
    pub macd: f64,
    pub macd_signal: f64,
    pub histogram: f64,
    pub upper_band: f64,
    pub lower_band: f64,
    /// `None` when the 14-bar high equals the 14-bar low.
    pub stochastic: Option<f64>,
    pub atr: f64,
    /// `None` when the 20-bar mean volume is zero.
    pub volume_ratio: Option<f64>,
    pub pivot_point: f64,
    pub support1: f64,
    pub support2: f64,
    pub resistance1: f64,
    pub resistance2: f64,
}

/// Scored signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    /// Sum of rule weights.
    pub strength: i32,
    /// Confidence in `[0, 100]`.
    pub confidence: f64,
    /// Up to five supporting reasons, in rule order.
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
}

/// Entry, stop and targets derived from pivot levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingPlan {
    pub direction: TradeDirection,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit1: f64,
    pub take_profit2: f64,
    /// `None` when entry equals the stop.
    pub risk_reward: Option<f64>,
}

/// Trend label relative to SMA20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Bullish,
    Bearish,
}

/// Volatility label from ATR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityLevel {
    High,
    Normal,
}

impl VolatilityLevel {
    /// ATR above this absolute value is labelled high.
    pub const HIGH_ATR: f64 = 0.001;

    pub fn from_atr(atr: f64) -> Self {
        if atr > Self::HIGH_ATR {
            VolatilityLevel::High
        } else {
            VolatilityLevel::Normal
        }
    }
}

/// Bullish/bearish split derived from strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSentiment {
    pub bullish: f64,
    pub bearish: f64,
}

impl MarketSentiment {
    pub fn from_strength(strength: i32) -> Self {
        let magnitude = strength.abs() as f64 / 2.0;
        Self {
            bullish: if strength > 0 { 50.0 + magnitude } else { 50.0 },
            bearish: if strength < 0 { 50.0 + magnitude } else { 50.0 },
        }
    }
}

/// Full result of one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Timestamp of the most recent bar.
    pub timestamp: i64,
    pub current_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
    pub indicators: IndicatorSnapshot,
    pub signal: Signal,
    pub plan: TradingPlan,
    /// Momentum projection of the next price.
    pub prediction: f64,
    pub trend: Trend,
    pub volatility: VolatilityLevel,
    pub sentiment: MarketSentiment,
}
