//! # Application Layer
//!
//! Coordinates the counting workflow on top of the domain core:
//! - `CountSession`: the client-authoritative store of one venue's count
//! - DTOs: the wire shapes exchanged with the backend inventory service
//! - Ports: abstractions (`InventoryGateway`, `Notifier`) that the
//!   infrastructure layer implements
//!
//! ## Dependency Direction
//!
//! ```text
//! Application Layer -> Domain Layer (entities, services)
//! Infrastructure    -> Application Layer (implements ports)
//! ```

pub mod dtos;
pub mod errors;
pub mod ports;
pub mod session;

pub use dtos::{CountEntryDto, CountItemDto, ItemsResponse, SyncRequest};
pub use errors::{ApplicationError, ApplicationResult};
pub use ports::{InventoryGateway, Notification, NotificationLevel, Notifier};
pub use session::{BarcodeLookup, CountSession, FallbackPolicy, LoadOutcome, SyncReport};
