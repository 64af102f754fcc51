//! Application Layer Errors
//!
//! Categorized errors with mapping from Domain Layer errors.

use domain::DomainError;
use thiserror::Error;

/// Application layer errors
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain layer errors
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Validation errors
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Gateway errors (backend unreachable, bad responses)
    #[error("Gateway error: {message}")]
    Gateway {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Application result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;

impl ApplicationError {
    /// Create validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create gateway error without a cause
    pub fn gateway<S: Into<String>>(message: S) -> Self {
        Self::Gateway {
            message: message.into(),
            source: None,
        }
    }

    /// Create gateway error with the underlying cause
    pub fn gateway_with_source<S: Into<String>>(message: S, source: anyhow::Error) -> Self {
        Self::Gateway {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Sync is retry-by-resubmission: only gateway failures are worth
    /// retrying, everything else needs a different input
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Gateway { .. })
    }

    /// Error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Domain(_) => "domain",
            Self::Validation { .. } => "validation",
            Self::Gateway { .. } => "gateway",
            Self::Configuration { .. } => "configuration",
        }
    }
}
