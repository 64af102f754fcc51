//! Ports - abstractions implemented by the infrastructure layer

mod inventory_gateway;
mod notifier;

pub use inventory_gateway::InventoryGateway;
pub use notifier::{Notification, NotificationLevel, Notifier};
