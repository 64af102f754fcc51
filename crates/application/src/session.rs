//! CountSession - the client-authoritative store of one venue's count
//!
//! Holds the loaded item list, applies count mutations, tracks what has
//! not yet been acknowledged by the backend, and runs the explicit,
//! user-triggered sync. One client, one local snapshot, last-write-wins:
//! there is no optimistic-concurrency token on the wire (single-operator
//! usage; recorded as an open question, not silently fixed here).

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use domain::{Barcode, CountItem, ItemId, ListQuery, VenueId};
use tracing::{debug, info, instrument, warn};

use crate::dtos::{CountEntryDto, SyncRequest};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::ports::{InventoryGateway, Notification, Notifier};

/// What to do when the initial load fails
///
/// The default for a kiosk-style counting device is a fixed demonstration
/// dataset, so the counter is never blocked by a dead network.
pub enum FallbackPolicy {
    /// Substitute this dataset and continue in degraded mode
    DemoDataset(Vec<CountItem>),
    /// Fail closed and surface the load error
    FailClosed,
}

/// Tagged result of a session load
///
/// `Degraded` keeps the never-block-the-counter behavior while still
/// making the fallback visible to the caller instead of hiding it.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Items came from the backend
    Fresh { loaded: usize },
    /// Backend unreachable; running on the demo dataset
    Degraded { loaded: usize, error: String },
    /// Backend unreachable and fallback disabled
    Failed(ApplicationError),
}

/// Result of a successful sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Number of distinct items pushed (latest value per item)
    pub synced_items: usize,
}

/// Outcome of a barcode scan against the loaded set
///
/// A miss is ordinary user feedback, not an error path, and never
/// mutates session state.
#[derive(Debug)]
pub enum BarcodeLookup<'a> {
    Found(&'a CountItem),
    NotFound,
}

/// The authoritative-for-the-client view of one counting session
pub struct CountSession {
    venue: VenueId,
    gateway: Arc<dyn InventoryGateway>,
    notifier: Arc<dyn Notifier>,
    fallback: FallbackPolicy,
    items: Vec<CountItem>,
    index: HashMap<ItemId, usize>,
    /// Item ids with counts not yet acknowledged, in first-touch order
    dirty: Vec<ItemId>,
    /// One tick per local mutation, deliberately NOT coalesced:
    /// re-counting the same item inflates the counter (observed,
    /// preserved behavior)
    pending_syncs: u32,
    degraded: bool,
}

impl CountSession {
    pub fn new(
        venue: VenueId,
        gateway: Arc<dyn InventoryGateway>,
        notifier: Arc<dyn Notifier>,
        fallback: FallbackPolicy,
    ) -> Self {
        Self {
            venue,
            gateway,
            notifier,
            fallback,
            items: Vec::new(),
            index: HashMap::new(),
            dirty: Vec::new(),
            pending_syncs: 0,
            degraded: false,
        }
    }

    /// Load the venue's item list from the backend
    ///
    /// On gateway failure the configured fallback policy applies; any
    /// previous local state is replaced either way.
    #[instrument(skip(self), fields(venue = %self.venue))]
    pub async fn load(&mut self) -> LoadOutcome {
        let fetched = self.gateway.fetch_items(&self.venue).await;
        match fetched {
            Ok(dtos) => {
                let mut items = Vec::with_capacity(dtos.len());
                for dto in dtos {
                    match dto.into_entity() {
                        Ok(item) => items.push(item),
                        Err(e) => {
                            // One malformed line fails the whole load;
                            // partial sessions would miscount the venue
                            warn!("Rejecting session payload: {e}");
                            return self.degrade(ApplicationError::validation(format!(
                                "Malformed item in session payload: {e}"
                            )));
                        }
                    }
                }
                let loaded = items.len();
                self.install(items, false);
                info!(loaded, "Loaded counting session");
                LoadOutcome::Fresh { loaded }
            }
            Err(e) => {
                warn!("Session load failed: {e:#}");
                self.degrade(ApplicationError::gateway_with_source(
                    "Failed to load counting session",
                    e,
                ))
            }
        }
    }

    fn degrade(&mut self, error: ApplicationError) -> LoadOutcome {
        let demo = match &self.fallback {
            FallbackPolicy::DemoDataset(demo) => demo.clone(),
            FallbackPolicy::FailClosed => return LoadOutcome::Failed(error),
        };
        let loaded = demo.len();
        let message = error.to_string();
        self.install(demo, true);
        warn!(loaded, "Falling back to demo dataset");
        LoadOutcome::Degraded {
            loaded,
            error: message,
        }
    }

    fn install(&mut self, items: Vec<CountItem>, degraded: bool) {
        self.index = items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.id().clone(), i))
            .collect();
        self.items = items;
        self.dirty.clear();
        self.pending_syncs = 0;
        self.degraded = degraded;
    }

    /// Record a count for an item: clamp, recompute variance, advance
    /// status, and mark the item for the next sync
    pub fn set_count(&mut self, id: &ItemId, qty: f64) -> ApplicationResult<&CountItem> {
        let slot = *self
            .index
            .get(id)
            .ok_or_else(|| domain::DomainError::UnknownItem(id.to_string()))?;
        let stored = self.items[slot].record_count(qty, Utc::now())?;
        debug!(item = %id, qty = stored, "Recorded count");

        if !self.dirty.contains(id) {
            self.dirty.push(id.clone());
        }
        self.pending_syncs += 1;
        Ok(&self.items[slot])
    }

    /// Adjust the count up by one from the current baseline
    pub fn increment(&mut self, id: &ItemId) -> ApplicationResult<&CountItem> {
        let baseline = self.baseline(id)?;
        self.set_count(id, baseline + 1.0)
    }

    /// Adjust the count down by one from the current baseline; already-zero
    /// counts stay at zero via clamping
    pub fn decrement(&mut self, id: &ItemId) -> ApplicationResult<&CountItem> {
        let baseline = self.baseline(id)?;
        self.set_count(id, baseline - 1.0)
    }

    fn baseline(&self, id: &ItemId) -> ApplicationResult<f64> {
        let item = self.item(id)?;
        Ok(item.count_baseline())
    }

    /// Pure read: filter and order the current list for display
    pub fn filter_and_sort(&self, query: &ListQuery) -> Vec<&CountItem> {
        query.apply(&self.items)
    }

    /// Exact-match barcode lookup against the loaded set
    pub fn find_by_barcode(&self, barcode: &Barcode) -> BarcodeLookup<'_> {
        self.items
            .iter()
            .find(|item| item.barcode() == Some(barcode))
            .map_or(BarcodeLookup::NotFound, BarcodeLookup::Found)
    }

    /// Push all unacknowledged counts in one batch
    ///
    /// Only the latest value per item is sent. On success local dirty
    /// tracking resets; on failure everything is left in place so the
    /// operation can simply be retried.
    #[instrument(skip(self), fields(venue = %self.venue))]
    pub async fn sync(&mut self) -> ApplicationResult<SyncReport> {
        if self.dirty.is_empty() {
            debug!("Nothing to sync");
            return Ok(SyncReport { synced_items: 0 });
        }

        let counts: Vec<CountEntryDto> = self
            .dirty
            .iter()
            .filter_map(|id| {
                let item = &self.items[*self.index.get(id)?];
                Some(CountEntryDto {
                    id: id.to_string(),
                    counted_qty: item.counted_qty()?,
                })
            })
            .collect();
        let request = SyncRequest {
            venue_id: self.venue.to_string(),
            counts,
        };

        info!(items = request.counts.len(), "Syncing counts");
        let pushed = self.gateway.push_counts(&request).await;
        match pushed {
            Ok(()) => {
                let synced_items = request.counts.len();
                self.dirty.clear();
                self.pending_syncs = 0;
                info!(synced_items, "Sync acknowledged");
                self.notifier
                    .notify(Notification::info(
                        "Counts synced",
                        format!("{synced_items} item(s) saved to the server"),
                    ))
                    .await;
                Ok(SyncReport { synced_items })
            }
            Err(e) => {
                warn!("Sync failed, counts kept locally: {e:#}");
                self.notifier
                    .notify(Notification::error(
                        "Sync failed",
                        "Counts are saved locally; sync again when back online",
                    ))
                    .await;
                Err(ApplicationError::gateway_with_source(
                    "Failed to sync counts",
                    e,
                ))
            }
        }
    }

    // Accessors

    pub fn venue(&self) -> &VenueId {
        &self.venue
    }

    pub fn items(&self) -> &[CountItem] {
        &self.items
    }

    pub fn item(&self, id: &ItemId) -> ApplicationResult<&CountItem> {
        let slot = *self
            .index
            .get(id)
            .ok_or_else(|| domain::DomainError::UnknownItem(id.to_string()))?;
        Ok(&self.items[slot])
    }

    /// Local mutations not yet acknowledged by the server
    pub fn pending_syncs(&self) -> u32 {
        self.pending_syncs
    }

    /// Whether the session is running on the demo dataset
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Distinct categories of the loaded set, sorted, for list filters
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .items
            .iter()
            .map(|item| item.category().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }
}
