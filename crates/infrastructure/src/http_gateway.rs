//! HTTP implementation of the InventoryGateway port
//!
//! Thin REST client for the backend inventory service. No retries and
//! no backoff here: read failures degrade at the session level, write
//! failures are retried only on the next explicit sync trigger.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use application::{CountItemDto, InventoryGateway, ItemsResponse, SyncRequest};
use async_trait::async_trait;
use domain::VenueId;
use reqwest::Client;
use tracing::{debug, error};

const ITEMS_PATH: &str = "/api/inventory/stock-count/items";
const SYNC_PATH: &str = "/api/inventory/stock-count/sync";

/// reqwest-backed gateway to the backend inventory service
#[derive(Debug, Clone)]
pub struct HttpInventoryGateway {
    base_url: String,
    client: Client,
}

impl HttpInventoryGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(anyhow!("Inventory API base URL cannot be empty"));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { base_url, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl InventoryGateway for HttpInventoryGateway {
    async fn fetch_items(&self, venue: &VenueId) -> Result<Vec<CountItemDto>> {
        let url = self.url(ITEMS_PATH);
        debug!(%url, venue = %venue, "Fetching counting session items");

        let response = self
            .client
            .get(&url)
            .query(&[("venue_id", venue.as_str())])
            .send()
            .await
            .context("Items request could not be sent")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "Items request failed: {body}");
            return Err(anyhow!("Items request failed with {status}: {body}"));
        }

        let parsed: ItemsResponse = response
            .json()
            .await
            .context("Items response was not valid JSON")?;
        debug!(items = parsed.items.len(), "Fetched counting session items");
        Ok(parsed.items)
    }

    async fn push_counts(&self, request: &SyncRequest) -> Result<()> {
        let url = self.url(SYNC_PATH);
        debug!(%url, counts = request.counts.len(), "Pushing counts");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Sync request could not be sent")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "Sync request failed: {body}");
            return Err(anyhow!("Sync request failed with {status}: {body}"));
        }

        Ok(())
    }
}
