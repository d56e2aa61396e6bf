//! Bar feed collaborators.
//!
//! The processing core never performs I/O; it pulls one [`Bar`] per cycle
//! from a [`BarFeed`]. Feeds must always produce a bar, so any failure is
//! absorbed here by falling back to the synthetic walk.

pub mod exchange_rate;
pub mod live;
pub mod synthetic;

pub use exchange_rate::{
    pair_rate, parse_rates, select_rate, ExchangeRateClient, RatesResponse, DEFAULT_RATES_URL,
};
pub use live::LiveFeed;
pub use synthetic::SyntheticFeed;

use std::future::Future;

use crate::types::Bar;

/// Source of the next bar for a processing cycle.
pub trait BarFeed: Send {
    fn next_bar(&mut self) -> impl Future<Output = Bar> + Send;
}
