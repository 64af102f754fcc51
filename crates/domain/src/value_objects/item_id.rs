//! ItemId - stable identifier of one inventory line
//!
//! Opaque string assigned by the backend when the counting session is
//! opened; unique within a venue session.

use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable item identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an item id with business validation
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::EmptyItemId);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_validation() {
        assert!(ItemId::new("itm-001").is_ok());
        assert_eq!(ItemId::new(""), Err(DomainError::EmptyItemId));
        assert_eq!(ItemId::new("   "), Err(DomainError::EmptyItemId));
    }

    #[test]
    fn test_item_id_display() {
        let id = ItemId::new("itm-001").unwrap();
        assert_eq!(id.to_string(), "itm-001");
        assert_eq!(id.as_str(), "itm-001");
    }
}
