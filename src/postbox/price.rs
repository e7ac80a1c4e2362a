//! The `price` plugin command.
//!
//! Price lookup is outside the post-storage domain, so it lives behind its
//! own trait and is wired into the controller as an *optional* collaborator:
//! when no feed is configured the command degrades to an "unavailable"
//! notice instead of failing.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;

/// A spot price quote for a currency pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Quote {
    pub base: String,
    pub currency: String,
    pub amount: String,
}

impl Quote {
    pub fn display(&self) -> String {
        format!("1 {} = {} {}", self.base, self.amount, self.currency)
    }
}

#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn spot_price(&self) -> Result<Quote>;
}

const COINBASE_API: &str = "https://api.coinbase.com/v2/prices";

#[derive(Deserialize)]
struct SpotResponse {
    data: Quote,
}

/// Coinbase spot-price feed for a fixed pair such as `ICP-USD`.
#[derive(Debug, Clone)]
pub struct SpotPriceFeed {
    client: Client,
    pair: String,
}

impl SpotPriceFeed {
    pub fn new(pair: &str) -> Self {
        Self {
            client: Client::new(),
            pair: pair.to_string(),
        }
    }
}

#[async_trait]
impl PriceFeed for SpotPriceFeed {
    async fn spot_price(&self) -> Result<Quote> {
        debug!(pair = %self.pair, "fetching spot price");
        let url = format!("{}/{}/spot", COINBASE_API, self.pair);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let spot: SpotResponse = response.json().await?;
        Ok(spot.data)
    }
}

/// Fixed-quote feed for tests.
#[derive(Debug, Clone)]
pub struct StaticPriceFeed {
    pub quote: Quote,
}

#[async_trait]
impl PriceFeed for StaticPriceFeed {
    async fn spot_price(&self) -> Result<Quote> {
        Ok(self.quote.clone())
    }
}
