//! CountItem - one inventory line being reconciled against expected stock
//!
//! The expected quantity is authoritative (taken from the server-side
//! ledger at session start); the counted quantity is what the operator
//! physically observed. Variance is derived state and is recomputed on
//! every mutation so it can never go stale.

use chrono::{DateTime, Utc};

use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{Barcode, CountStatus, ItemId};

/// One inventory line of a counting session
///
/// Invariants held by construction:
/// - `variance == counted_qty - expected_qty` whenever `counted_qty` is set,
///   `None` otherwise
/// - `counted_qty`, when present, is never negative
/// - `status` only moves forward (`Pending -> Counted -> Reviewed`)
#[derive(Debug, Clone, PartialEq)]
pub struct CountItem {
    id: ItemId,
    name: String,
    category: String,
    unit: String,
    barcode: Option<Barcode>,
    location: String,
    expected_qty: f64,
    counted_qty: Option<f64>,
    variance: Option<f64>,
    last_counted_at: Option<DateTime<Utc>>,
    status: CountStatus,
}

impl CountItem {
    /// Create a fresh, not-yet-counted item
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        unit: impl Into<String>,
        expected_qty: f64,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyItemName);
        }
        if !expected_qty.is_finite() {
            return Err(DomainError::InvalidExpectedQuantity(expected_qty));
        }

        Ok(Self {
            id,
            name,
            category: category.into(),
            unit: unit.into(),
            barcode: None,
            location: String::new(),
            expected_qty,
            counted_qty: None,
            variance: None,
            last_counted_at: None,
            status: CountStatus::Pending,
        })
    }

    pub fn with_barcode(mut self, barcode: Barcode) -> Self {
        self.barcode = Some(barcode);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Reconstruct an item from backend session data
    ///
    /// The wire variance is ignored: variance is derived state and is
    /// recomputed here from the counted quantity. A negative counted
    /// quantity from the wire is clamped to zero, same as local entry.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        unit: impl Into<String>,
        barcode: Option<Barcode>,
        location: impl Into<String>,
        expected_qty: f64,
        counted_qty: Option<f64>,
        last_counted_at: Option<DateTime<Utc>>,
        status: CountStatus,
    ) -> DomainResult<Self> {
        let mut item = Self::new(id, name, category, unit, expected_qty)?;
        if let Some(barcode) = barcode {
            item.barcode = Some(barcode);
        }
        item.location = location.into();
        item.status = status;
        item.last_counted_at = last_counted_at;
        if let Some(qty) = counted_qty {
            if !qty.is_finite() {
                return Err(DomainError::InvalidQuantity(qty));
            }
            let clamped = qty.max(0.0);
            item.counted_qty = Some(clamped);
            item.variance = Some(clamped - item.expected_qty);
        }
        Ok(item)
    }

    // Getters - immutable access to item data

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn barcode(&self) -> Option<&Barcode> {
        self.barcode.as_ref()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn expected_qty(&self) -> f64 {
        self.expected_qty
    }

    pub fn counted_qty(&self) -> Option<f64> {
        self.counted_qty
    }

    /// Counted minus expected; negative means shortage, positive surplus
    pub fn variance(&self) -> Option<f64> {
        self.variance
    }

    pub fn last_counted_at(&self) -> Option<DateTime<Utc>> {
        self.last_counted_at
    }

    pub fn status(&self) -> CountStatus {
        self.status
    }

    // Business methods

    /// Record a physical count for this item
    ///
    /// The quantity is clamped to be non-negative, variance is recomputed,
    /// and a `Pending` item advances to `Counted`. Re-entering a count
    /// keeps `Counted`; a `Reviewed` item keeps `Reviewed` (the status
    /// machine never regresses). Returns the clamped quantity actually
    /// stored.
    pub fn record_count(&mut self, qty: f64, at: DateTime<Utc>) -> DomainResult<f64> {
        if !qty.is_finite() {
            return Err(DomainError::InvalidQuantity(qty));
        }

        let clamped = qty.max(0.0);
        self.counted_qty = Some(clamped);
        self.variance = Some(clamped - self.expected_qty);
        self.last_counted_at = Some(at);
        if self.status == CountStatus::Pending {
            self.status = CountStatus::Counted;
        }
        Ok(clamped)
    }

    /// Baseline for +1/-1 adjustments: the current count, or the expected
    /// quantity when nothing has been entered yet (the first adjustment
    /// starts from the ledger baseline, not from zero)
    pub fn count_baseline(&self) -> f64 {
        self.counted_qty.unwrap_or(self.expected_qty)
    }

    /// Case-insensitive substring match against name, barcode and location
    pub fn matches_text(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self
                .barcode
                .as_ref()
                .is_some_and(|b| b.as_str().to_lowercase().contains(&needle))
            || self.location.to_lowercase().contains(&needle)
    }

    /// Exact category filter
    pub fn is_in_category(&self, category: &str) -> bool {
        self.category == category
    }
}
