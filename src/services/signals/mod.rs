//! Trading signal pipeline.
//!
//! Indicator calculations, weighted rule scoring, trading plan derivation
//! and the streaming processor that ties them to a bar window.

pub mod analyzer;
pub mod indicators;
pub mod plan;
pub mod processor;
pub mod scorer;

pub use analyzer::{percent_change, Analyzer};
pub use indicators::IndicatorEngine;
pub use plan::build_plan;
pub use processor::{CycleOutcome, StreamProcessor};
pub use scorer::score;

use crate::types::Bar;

/// Trait for implementing technical indicators.
pub trait Indicator: Send + Sync {
    /// Value produced by this indicator.
    type Output;

    /// Unique identifier for this indicator.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Minimum number of bars required for calculation.
    fn min_periods(&self) -> usize;

    /// Calculate from bars, oldest first, using the most recent ones.
    /// Returns None if there is insufficient data or the value is undefined.
    fn calculate(&self, bars: &[Bar]) -> Option<Self::Output>;
}
