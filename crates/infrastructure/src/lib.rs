//! Infrastructure Layer
//!
//! Implementations of the application ports against the real world:
//! the HTTP inventory gateway, the connectivity monitor, the demo
//! dataset used for degraded loads, and a log-backed notifier.

pub mod connectivity;
pub mod demo;
pub mod http_gateway;
pub mod notifier;

pub use connectivity::{HttpProbe, NetworkMonitor, ReachabilityProbe};
pub use demo::demo_items;
pub use http_gateway::HttpInventoryGateway;
pub use notifier::TracingNotifier;
