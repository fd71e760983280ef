//! Implements the `Rates` trait with the bluelytics API, which publishes the informal ("blue")
//! ARS/USD rate.

use crate::api::Rates;
use crate::model::{ExchangeRate, LatestRates};
use crate::Result;
use anyhow::Context;
use tracing::trace;
use url::Url;

pub(crate) struct Bluelytics {
    client: reqwest::Client,
    url: Url,
}

impl Bluelytics {
    pub(crate) fn new(url: Url) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Unable to build the HTTP client")?;
        Ok(Self { client, url })
    }
}

#[async_trait::async_trait]
impl Rates for Bluelytics {
    async fn latest(&self) -> Result<ExchangeRate> {
        trace!("GET {}", self.url);
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .context("Failed to send exchange-rate request")?
            .error_for_status()
            .context("The exchange-rate service returned an error")?;
        let latest: LatestRates = response
            .json()
            .await
            .context("Failed to parse the exchange-rate response")?;
        Ok(latest.blue)
    }
}
