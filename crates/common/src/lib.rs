//! Common utilities shared across stocktake crates
//!
//! Configuration loading and logging initialization; nothing in here
//! knows about counting sessions or the inventory API.

pub mod config;
pub mod logging;

pub use config::{ConfigError, StocktakeConfig};
pub use logging::init_logging;
