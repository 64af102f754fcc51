//! Logging initialization
//!
//! Filter comes from `STOCKTAKE_LOG` when set, otherwise from the
//! configured default. Output is either human-readable fmt lines or
//! JSON lines for log shipping.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "STOCKTAKE_LOG";

/// Initialize the global tracing subscriber
///
/// Safe to call once per process; a second call returns an error rather
/// than panicking, so tests that race on initialization can ignore it.
pub fn init_logging(default_filter: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init()
            .map_err(|e| anyhow!("Failed to initialize JSON logging: {e}"))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
            .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
    }
}
