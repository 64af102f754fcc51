//! CountStatus - lifecycle tag of one count item
//!
//! Transitions only move forward: `Pending -> Counted -> Reviewed`.
//! A corrected re-entry keeps `Counted`; promotion to `Reviewed` is a
//! reviewer action performed server-side, never by this client.

use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status tag of a count item
///
/// Variant order defines the display ordering of a counting list:
/// pending work first, then locally counted, then reviewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountStatus {
    /// No count entered yet
    Pending,
    /// Locally entered, not yet confirmed by a human reviewer
    Counted,
    /// Confirmed by a reviewer (server-side action)
    Reviewed,
}

impl CountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountStatus::Pending => "pending",
            CountStatus::Counted => "counted",
            CountStatus::Reviewed => "reviewed",
        }
    }

    /// Whether the operator still has to visit this item
    pub fn is_pending(&self) -> bool {
        matches!(self, CountStatus::Pending)
    }
}

impl FromStr for CountStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "pending" => Ok(CountStatus::Pending),
            "counted" => Ok(CountStatus::Counted),
            "reviewed" => Ok(CountStatus::Reviewed),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for CountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
