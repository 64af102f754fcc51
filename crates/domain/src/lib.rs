//! Domain Layer - stock count business logic
//!
//! Contains ONLY pure business rules, independent of:
//! - Infrastructure (HTTP clients, terminals, file systems)
//! - Frameworks (CLI, async runtimes)
//! - The backend inventory service
//!
//! Building blocks:
//! - Entities: core business objects (CountItem)
//! - Value Objects: immutable data (ItemId, Barcode, VenueId, CountStatus)
//! - Services: pure read-side logic (ListQuery filtering and ordering)

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

// Re-export core domain types
pub use entities::CountItem;
pub use errors::{DomainError, DomainResult};
pub use services::ListQuery;
pub use value_objects::{Barcode, CountStatus, ItemId, VenueId};

/// Domain-specific type aliases
pub type Quantity = f64;
pub type ItemCount = usize;
