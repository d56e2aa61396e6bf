//! USD-based exchange rate table client.
//!
//! Fetches a `{"rates": {"EUR": 0.92, ...}}` table and derives pair prices
//! from it.

use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::types::{Instrument, RateQuote};

pub const DEFAULT_RATES_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";

/// Rate table response.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesResponse {
    #[serde(default)]
    pub base: Option<String>,
    pub rates: HashMap<String, f64>,
}

/// Price of `instrument` from a USD-based rate table.
pub fn pair_rate(rates: &HashMap<String, f64>, instrument: Instrument) -> Option<f64> {
    let price = match instrument.rate_quote() {
        RateQuote::Inverted(code) => {
            let rate = *rates.get(code)?;
            if rate == 0.0 {
                return None;
            }
            1.0 / rate
        }
        RateQuote::Direct(code) => *rates.get(code)?,
    };
    price
        .is_finite()
        .then(|| instrument.round_price(price))
        .filter(|p| *p > 0.0)
}

/// Decode a rate table body.
pub fn parse_rates(body: &str) -> Result<HashMap<String, f64>> {
    let data: RatesResponse = serde_json::from_str(body)?;
    Ok(data.rates)
}

/// Like [`pair_rate`], but a missing or unusable rate is a feed error.
pub fn select_rate(rates: &HashMap<String, f64>, instrument: Instrument) -> Result<f64> {
    pair_rate(rates, instrument)
        .ok_or_else(|| AppError::Feed(format!("No usable rate for {}", instrument)))
}

/// Exchange rate API client.
pub struct ExchangeRateClient {
    client: Client,
    url: String,
}

impl ExchangeRateClient {
    /// Create a new client for `url`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Fetch the full rate table.
    pub async fn fetch_rates(&self) -> Result<HashMap<String, f64>> {
        debug!("Fetching exchange rates: {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(200).collect();
            warn!("Exchange rate API error: {} - {}", status, snippet);
            return Err(AppError::ExternalApi(format!(
                "Exchange rate API error: {}",
                status
            )));
        }

        let body = response.text().await?;
        parse_rates(&body)
    }

    /// Current price of `instrument`.
    pub async fn rate(&self, instrument: Instrument) -> Result<f64> {
        let rates = self.fetch_rates().await?;
        select_rate(&rates, instrument)
    }
}
