//! InventoryGateway Port
//!
//! Abstraction over the backend inventory REST service. The application
//! layer defines the interface; infrastructure provides the HTTP
//! implementation. All calls are best-effort: failures surface as plain
//! errors and the session store decides the degrade/retry policy.

use crate::dtos::{CountItemDto, SyncRequest};
use anyhow::Result;
use async_trait::async_trait;
use domain::VenueId;

/// Client of the backend inventory service
#[async_trait]
pub trait InventoryGateway: Send + Sync {
    /// Fetch the full item list for a venue's counting session
    async fn fetch_items(&self, venue: &VenueId) -> Result<Vec<CountItemDto>>;

    /// Push a batch of counts; the server recomputes variance and status
    async fn push_counts(&self, request: &SyncRequest) -> Result<()>;
}
