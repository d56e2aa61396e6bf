//! Random-walk bar generator.
//!
//! Used to seed history at start-up and as the fallback whenever no live
//! rate is available.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::BarFeed;
use crate::types::{Bar, Instrument};

const MIN_VOLUME: f64 = 30_000.0;
const VOLUME_SPREAD: f64 = 100_000.0;

/// Random-walk feed for one instrument.
pub struct SyntheticFeed {
    instrument: Instrument,
    rng: StdRng,
    last_close: f64,
    bar_millis: i64,
}

impl SyntheticFeed {
    /// Feed starting at `start_price`, seeded from entropy.
    pub fn new(instrument: Instrument, start_price: f64, bar_millis: i64) -> Self {
        Self::from_rng(instrument, start_price, bar_millis, StdRng::from_entropy())
    }

    /// Deterministic feed for a fixed `seed`.
    pub fn with_seed(instrument: Instrument, start_price: f64, bar_millis: i64, seed: u64) -> Self {
        Self::from_rng(instrument, start_price, bar_millis, StdRng::seed_from_u64(seed))
    }

    fn from_rng(instrument: Instrument, start_price: f64, bar_millis: i64, rng: StdRng) -> Self {
        Self {
            instrument,
            rng,
            last_close: start_price,
            bar_millis: bar_millis.max(1),
        }
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    /// Close of the most recent generated bar.
    pub fn last_close(&self) -> f64 {
        self.last_close
    }

    /// Restart the walk from `price`.
    pub fn anchor(&mut self, price: f64) {
        self.last_close = self.instrument.round_price(price);
    }

    /// Generate `count` bars of history ending at `end_ts`, spaced one bar
    /// duration apart. The walk combines a random step, a slow sine trend
    /// and a smaller noise term.
    pub fn history(&mut self, count: usize, end_ts: i64) -> Vec<Bar> {
        let volatility = self.instrument.seed_volatility();
        let mut price = self.last_close;
        let mut bars = Vec::with_capacity(count);

        for i in 0..count {
            let change = (self.rng.gen::<f64>() - 0.5) * volatility;
            let trend = (i as f64 / 15.0).sin() * volatility * 0.7;
            let noise = (self.rng.gen::<f64>() - 0.5) * volatility * 0.3;
            price += change + trend + noise;

            let high = price + self.rng.gen::<f64>() * volatility * 0.8;
            let low = price - self.rng.gen::<f64>() * volatility * 0.8;
            let open = low + (high - low) * self.rng.gen::<f64>();
            let timestamp = end_ts - (count - 1 - i) as i64 * self.bar_millis;

            bars.push(Bar::new(
                timestamp,
                self.instrument.round_price(open),
                self.instrument.round_price(high),
                self.instrument.round_price(low),
                self.instrument.round_price(price),
                self.volume(),
            ));
        }

        if let Some(last) = bars.last() {
            self.last_close = last.close;
        }
        bars
    }

    /// One streaming bar around `base_price`. Opens at the previous close.
    pub fn tick_bar(&mut self, base_price: f64, timestamp: i64) -> Bar {
        let volatility = self.instrument.tick_volatility();
        let price = base_price + (self.rng.gen::<f64>() - 0.5) * volatility;
        let high = price + self.rng.gen::<f64>() * volatility * 0.5;
        let low = price - self.rng.gen::<f64>() * volatility * 0.5;

        let bar = Bar::new(
            timestamp,
            self.last_close,
            self.instrument.round_price(high),
            self.instrument.round_price(low),
            self.instrument.round_price(price),
            self.volume(),
        );
        self.last_close = bar.close;
        bar
    }

    /// Reference rate with a small random offset, for when no rate was ever
    /// observed.
    pub fn jittered_base_rate(&mut self) -> f64 {
        let jitter = (self.rng.gen::<f64>() - 0.5) * self.instrument.rate_jitter();
        self.instrument.round_price(self.instrument.base_rate() + jitter)
    }

    fn volume(&mut self) -> f64 {
        (self.rng.gen::<f64>() * VOLUME_SPREAD).floor() + MIN_VOLUME
    }
}

impl BarFeed for SyntheticFeed {
    async fn next_bar(&mut self) -> Bar {
        let base = self.last_close;
        self.tick_bar(base, chrono::Utc::now().timestamp_millis())
    }
}
