//! End-to-end counting session scenarios against an in-memory gateway

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use application::{
    ApplicationError, BarcodeLookup, CountItemDto, CountSession, FallbackPolicy, InventoryGateway,
    LoadOutcome, Notification, NotificationLevel, Notifier, SyncRequest,
};
use domain::{Barcode, CountItem, CountStatus, ItemId, ListQuery, VenueId};

struct MockGateway {
    items: Vec<CountItemDto>,
    fail_fetch: bool,
    fail_push: AtomicBool,
    pushes: Mutex<Vec<SyncRequest>>,
}

impl MockGateway {
    fn serving(items: Vec<CountItemDto>) -> Self {
        Self {
            items,
            fail_fetch: false,
            fail_push: AtomicBool::new(false),
            pushes: Mutex::new(Vec::new()),
        }
    }

    fn unreachable() -> Self {
        Self {
            items: Vec::new(),
            fail_fetch: true,
            fail_push: AtomicBool::new(true),
            pushes: Mutex::new(Vec::new()),
        }
    }

    fn pushes(&self) -> Vec<SyncRequest> {
        self.pushes.lock().unwrap().clone()
    }
}

#[async_trait]
impl InventoryGateway for MockGateway {
    async fn fetch_items(&self, _venue: &VenueId) -> Result<Vec<CountItemDto>> {
        if self.fail_fetch {
            return Err(anyhow!("connection refused"));
        }
        Ok(self.items.clone())
    }

    async fn push_counts(&self, request: &SyncRequest) -> Result<()> {
        if self.fail_push.load(Ordering::SeqCst) {
            return Err(anyhow!("connection refused"));
        }
        self.pushes.lock().unwrap().push(request.clone());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}

fn dto(id: &str, name: &str, expected: f64) -> CountItemDto {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "category": "Produce",
        "unit": "kg",
        "expectedQty": expected,
    }))
    .unwrap()
}

fn dto_with_barcode(id: &str, name: &str, expected: f64, barcode: &str) -> CountItemDto {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "category": "Produce",
        "unit": "kg",
        "expectedQty": expected,
        "barcode": barcode,
    }))
    .unwrap()
}

fn demo_fallback() -> FallbackPolicy {
    let item = CountItem::new(
        ItemId::new("demo-1").unwrap(),
        "Demo Tomatoes",
        "Produce",
        "kg",
        10.0,
    )
    .unwrap();
    FallbackPolicy::DemoDataset(vec![item])
}

fn session_with(
    gateway: Arc<MockGateway>,
    notifier: Arc<RecordingNotifier>,
    fallback: FallbackPolicy,
) -> CountSession {
    CountSession::new(
        VenueId::new("venue-7").unwrap(),
        gateway,
        notifier,
        fallback,
    )
}

#[tokio::test]
async fn full_count_and_sync_scenario() {
    // Expected 45, increment once, decrement twice, then sync
    let gateway = Arc::new(MockGateway::serving(vec![dto(
        "itm-001",
        "San Marzano Tomatoes",
        45.0,
    )]));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(gateway.clone(), notifier.clone(), demo_fallback());

    assert!(matches!(
        session.load().await,
        LoadOutcome::Fresh { loaded: 1 }
    ));
    let id = ItemId::new("itm-001").unwrap();

    let item = session.increment(&id).unwrap();
    assert_eq!(item.counted_qty(), Some(46.0));
    assert_eq!(item.variance(), Some(1.0));
    assert_eq!(item.status(), CountStatus::Counted);

    session.decrement(&id).unwrap();
    let item = session.decrement(&id).unwrap();
    assert_eq!(item.counted_qty(), Some(44.0));
    assert_eq!(item.variance(), Some(-1.0));
    assert_eq!(session.pending_syncs(), 3);

    let report = session.sync().await.unwrap();
    assert_eq!(report.synced_items, 1);
    assert_eq!(session.pending_syncs(), 0);
    // Status is unchanged by sync; reviewer confirmation is server-side
    assert_eq!(session.item(&id).unwrap().status(), CountStatus::Counted);

    let pushes = gateway.pushes();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].venue_id, "venue-7");
    assert_eq!(pushes[0].counts.len(), 1);
    assert_eq!(pushes[0].counts[0].counted_qty, 44.0);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].level, NotificationLevel::Info);
}

#[tokio::test]
async fn recounting_inflates_counter_but_sends_latest_value_once() {
    let gateway = Arc::new(MockGateway::serving(vec![dto("itm-001", "Basil", 5.0)]));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(gateway.clone(), notifier, demo_fallback());
    session.load().await;

    let id = ItemId::new("itm-001").unwrap();
    session.set_count(&id, 6.0).unwrap();
    session.set_count(&id, 7.0).unwrap();

    // Counter is per-mutation, not per-item
    assert_eq!(session.pending_syncs(), 2);

    session.sync().await.unwrap();
    let pushes = gateway.pushes();
    assert_eq!(pushes[0].counts.len(), 1);
    assert_eq!(pushes[0].counts[0].counted_qty, 7.0);
}

#[tokio::test]
async fn repeated_decrement_at_zero_stays_at_zero() {
    let gateway = Arc::new(MockGateway::serving(vec![dto("itm-001", "Basil", 1.0)]));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(gateway, notifier, demo_fallback());
    session.load().await;

    let id = ItemId::new("itm-001").unwrap();
    session.set_count(&id, 0.0).unwrap();
    session.decrement(&id).unwrap();
    let item = session.decrement(&id).unwrap();

    assert_eq!(item.counted_qty(), Some(0.0));
    assert_eq!(item.variance(), Some(-1.0));
}

#[tokio::test]
async fn load_failure_degrades_to_demo_dataset() {
    let gateway = Arc::new(MockGateway::unreachable());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(gateway, notifier, demo_fallback());

    match session.load().await {
        LoadOutcome::Degraded { loaded, error } => {
            assert_eq!(loaded, 1);
            assert!(error.contains("Failed to load"));
        }
        other => panic!("expected degraded load, got {other:?}"),
    }
    assert!(session.is_degraded());
    assert!(!session.items().is_empty());
}

#[tokio::test]
async fn load_failure_fails_closed_when_fallback_disabled() {
    let gateway = Arc::new(MockGateway::unreachable());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(gateway, notifier, FallbackPolicy::FailClosed);

    match session.load().await {
        LoadOutcome::Failed(error) => assert!(error.is_retryable()),
        other => panic!("expected failed load, got {other:?}"),
    }
    assert!(session.items().is_empty());
}

#[tokio::test]
async fn sync_failure_keeps_local_state_and_notifies() {
    let gateway = Arc::new(MockGateway::serving(vec![dto("itm-001", "Basil", 5.0)]));
    gateway.fail_push.store(true, Ordering::SeqCst);
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(gateway.clone(), notifier.clone(), demo_fallback());
    session.load().await;

    let id = ItemId::new("itm-001").unwrap();
    session.set_count(&id, 4.0).unwrap();

    let err = session.sync().await.unwrap_err();
    assert!(matches!(err, ApplicationError::Gateway { .. }));

    // Counts remain locally, counter untouched, retry succeeds
    assert_eq!(session.pending_syncs(), 1);
    assert_eq!(session.item(&id).unwrap().counted_qty(), Some(4.0));
    assert_eq!(notifier.sent()[0].level, NotificationLevel::Error);

    gateway.fail_push.store(false, Ordering::SeqCst);
    let report = session.sync().await.unwrap();
    assert_eq!(report.synced_items, 1);
    assert_eq!(session.pending_syncs(), 0);
}

#[tokio::test]
async fn sync_with_nothing_dirty_skips_the_gateway() {
    let gateway = Arc::new(MockGateway::serving(vec![dto("itm-001", "Basil", 5.0)]));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(gateway.clone(), notifier, demo_fallback());
    session.load().await;

    let report = session.sync().await.unwrap();
    assert_eq!(report.synced_items, 0);
    assert!(gateway.pushes().is_empty());
}

#[tokio::test]
async fn barcode_miss_leaves_state_unchanged() {
    let gateway = Arc::new(MockGateway::serving(vec![dto_with_barcode(
        "itm-001",
        "Basil",
        5.0,
        "5901234123457",
    )]));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(gateway, notifier, demo_fallback());
    session.load().await;

    let missing = Barcode::new("0000000000000").unwrap();
    assert!(matches!(
        session.find_by_barcode(&missing),
        BarcodeLookup::NotFound
    ));
    assert_eq!(session.pending_syncs(), 0);
    assert_eq!(session.items()[0].counted_qty(), None);

    let present = Barcode::new("5901234123457").unwrap();
    match session.find_by_barcode(&present) {
        BarcodeLookup::Found(item) => assert_eq!(item.id().as_str(), "itm-001"),
        BarcodeLookup::NotFound => panic!("expected barcode hit"),
    }
}

#[tokio::test]
async fn unknown_item_is_rejected_without_counter_tick() {
    let gateway = Arc::new(MockGateway::serving(vec![dto("itm-001", "Basil", 5.0)]));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(gateway, notifier, demo_fallback());
    session.load().await;

    let unknown = ItemId::new("itm-999").unwrap();
    let err = session.set_count(&unknown, 1.0).unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(_)));
    assert_eq!(session.pending_syncs(), 0);
}

#[tokio::test]
async fn filtered_view_orders_pending_before_counted() {
    let gateway = Arc::new(MockGateway::serving(vec![
        dto("a", "Aubergine", 1.0),
        dto("b", "Basil", 1.0),
        dto("c", "Chard", 1.0),
    ]));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(gateway, notifier, demo_fallback());
    session.load().await;

    session.set_count(&ItemId::new("a").unwrap(), 2.0).unwrap();

    let view = session.filter_and_sort(&ListQuery::new());
    let ids: Vec<&str> = view.iter().map(|item| item.id().as_str()).collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
}

#[tokio::test]
async fn malformed_payload_degrades_instead_of_half_loading() {
    let bad = serde_json::from_value::<CountItemDto>(serde_json::json!({
        "id": "",
        "name": "Ghost item",
        "expectedQty": 1.0,
    }))
    .unwrap();
    let gateway = Arc::new(MockGateway::serving(vec![dto("itm-001", "Basil", 5.0), bad]));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = session_with(gateway, notifier, demo_fallback());

    assert!(matches!(
        session.load().await,
        LoadOutcome::Degraded { .. }
    ));
}
