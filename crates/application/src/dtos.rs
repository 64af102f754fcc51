//! Wire DTOs for the backend inventory service
//!
//! Item fields travel as camelCase JSON (`expectedQty`, `countedQty`,
//! `lastCountedAt`); the sync body keeps the snake_case `venue_id` the
//! backend expects. DTOs are kept separate from domain entities so the
//! wire can evolve without touching business rules.

use chrono::{DateTime, Utc};
use domain::{Barcode, CountItem, CountStatus, ItemId};
use serde::{Deserialize, Serialize};

use crate::errors::ApplicationResult;

/// One item as served by
/// `GET /api/inventory/stock-count/items?venue_id=<id>`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountItemDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub location: String,
    pub expected_qty: f64,
    #[serde(default)]
    pub counted_qty: Option<f64>,
    /// Present on the wire but ignored locally: variance is derived state
    #[serde(default)]
    pub variance: Option<f64>,
    #[serde(default)]
    pub last_counted_at: Option<DateTime<Utc>>,
    #[serde(default = "default_status")]
    pub status: CountStatus,
}

fn default_status() -> CountStatus {
    CountStatus::Pending
}

impl CountItemDto {
    /// Convert the wire shape into a validated domain entity
    pub fn into_entity(self) -> ApplicationResult<CountItem> {
        let id = ItemId::new(self.id)?;
        // An absent or blank barcode means the item has no alternate key
        let barcode = match self.barcode {
            Some(raw) if !raw.trim().is_empty() => Some(Barcode::new(raw)?),
            _ => None,
        };
        let item = CountItem::restore(
            id,
            self.name,
            self.category,
            self.unit,
            barcode,
            self.location,
            self.expected_qty,
            self.counted_qty,
            self.last_counted_at,
            self.status,
        )?;
        Ok(item)
    }
}

/// Response envelope of the items endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<CountItemDto>,
}

/// One count pushed to the backend; the server recomputes variance and
/// status authoritatively from these pairs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountEntryDto {
    pub id: String,
    pub counted_qty: f64,
}

/// Body of `POST /api/inventory/stock-count/sync`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRequest {
    pub venue_id: String,
    pub counts: Vec<CountEntryDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_json_field_names_are_camel_case() {
        let json = r#"{
            "id": "itm-001",
            "name": "San Marzano Tomatoes",
            "category": "Produce",
            "unit": "kg",
            "barcode": "5901234123457",
            "location": "Dry store",
            "expectedQty": 45.0,
            "countedQty": 44.0,
            "variance": 99.0,
            "lastCountedAt": "2026-08-01T09:30:00Z",
            "status": "counted"
        }"#;

        let dto: CountItemDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.expected_qty, 45.0);
        assert_eq!(dto.counted_qty, Some(44.0));

        let item = dto.into_entity().unwrap();
        assert_eq!(item.status(), CountStatus::Counted);
        // Wire variance (99.0) is ignored; derived state is recomputed
        assert_eq!(item.variance(), Some(-1.0));
    }

    #[test]
    fn test_minimal_item_payload() {
        let json = r#"{"id": "itm-002", "name": "Basil", "expectedQty": 3.0}"#;
        let dto: CountItemDto = serde_json::from_str(json).unwrap();
        let item = dto.into_entity().unwrap();

        assert_eq!(item.status(), CountStatus::Pending);
        assert_eq!(item.counted_qty(), None);
        assert!(item.barcode().is_none());
    }

    #[test]
    fn test_blank_barcode_becomes_none() {
        let json = r#"{"id": "itm-003", "name": "Dill", "expectedQty": 1.0, "barcode": "  "}"#;
        let item = serde_json::from_str::<CountItemDto>(json)
            .unwrap()
            .into_entity()
            .unwrap();
        assert!(item.barcode().is_none());
    }

    #[test]
    fn test_sync_request_wire_shape() {
        let request = SyncRequest {
            venue_id: "venue-7".to_string(),
            counts: vec![CountEntryDto {
                id: "itm-001".to_string(),
                counted_qty: 44.0,
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["venue_id"], "venue-7");
        assert_eq!(json["counts"][0]["id"], "itm-001");
        assert_eq!(json["counts"][0]["countedQty"], 44.0);
    }
}
