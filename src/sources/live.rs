//! Live feed backed by the exchange rate API.

use tracing::{debug, warn};

use super::{BarFeed, ExchangeRateClient, SyntheticFeed};
use crate::error::{AppError, Result};
use crate::types::{Bar, Instrument};

/// Polls the live rate once per bar and falls back to the random walk from
/// the last close whenever the rate is unavailable.
pub struct LiveFeed {
    client: Option<ExchangeRateClient>,
    synthetic: SyntheticFeed,
}

impl LiveFeed {
    pub fn new(client: ExchangeRateClient, synthetic: SyntheticFeed) -> Self {
        Self {
            client: Some(client),
            synthetic,
        }
    }

    /// Feed that never touches the network.
    pub fn offline(synthetic: SyntheticFeed) -> Self {
        Self {
            client: None,
            synthetic,
        }
    }

    pub fn instrument(&self) -> Instrument {
        self.synthetic.instrument()
    }

    pub fn is_offline(&self) -> bool {
        self.client.is_none()
    }

    /// Fetch the live rate for this feed's instrument.
    pub async fn fetch_rate(&self) -> Result<f64> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| AppError::Feed(format!("{} feed is offline", self.instrument())))?;
        client.rate(self.instrument()).await
    }

    /// Current live rate, if the API answers. Used to anchor seed history.
    pub async fn live_rate(&self) -> Option<f64> {
        if self.is_offline() {
            return None;
        }
        match self.fetch_rate().await {
            Ok(rate) => Some(rate),
            Err(e) => {
                warn!("Live rate for {} unavailable: {}", self.instrument(), e);
                None
            }
        }
    }

    pub fn synthetic_mut(&mut self) -> &mut SyntheticFeed {
        &mut self.synthetic
    }
}

impl BarFeed for LiveFeed {
    async fn next_bar(&mut self) -> Bar {
        let timestamp = chrono::Utc::now().timestamp_millis();

        let base = match self.live_rate().await {
            Some(rate) => {
                debug!("Live rate {} = {}", self.instrument(), rate);
                rate
            }
            None => self.synthetic.last_close(),
        };

        self.synthetic.tick_bar(base, timestamp)
    }
}
