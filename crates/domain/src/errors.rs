//! Domain Errors - business rule violations
//!
//! Contains ONLY business logic errors, not infrastructure errors

use thiserror::Error;

/// Domain-specific errors representing business rule violations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Business validation: item identifier cannot be empty
    #[error("Item ID cannot be empty")]
    EmptyItemId,

    /// Business validation: venue identifier cannot be empty
    #[error("Venue ID cannot be empty")]
    EmptyVenueId,

    /// Business validation: barcode cannot be empty
    #[error("Barcode cannot be empty")]
    EmptyBarcode,

    /// Business validation: item display name cannot be empty
    #[error("Item name cannot be empty")]
    EmptyItemName,

    /// Business validation: counted quantity must be a finite number
    #[error("Invalid counted quantity: {0} is not a finite number")]
    InvalidQuantity(f64),

    /// Business validation: expected quantity must be a finite number
    #[error("Invalid expected quantity: {0} is not a finite number")]
    InvalidExpectedQuantity(f64),

    /// Business validation: unknown status tag received from the backend
    #[error("Unknown count status: {0}")]
    UnknownStatus(String),

    /// Business rule: the item is not part of the loaded count session
    #[error("Unknown item: {0}")]
    UnknownItem(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Check if error is a business validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyItemId
                | DomainError::EmptyVenueId
                | DomainError::EmptyBarcode
                | DomainError::EmptyItemName
                | DomainError::InvalidQuantity(_)
                | DomainError::InvalidExpectedQuantity(_)
                | DomainError::UnknownStatus(_)
        )
    }

    /// Check if error indicates missing data
    pub fn is_not_found_error(&self) -> bool {
        matches!(self, DomainError::UnknownItem(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categorization() {
        assert!(DomainError::EmptyItemId.is_validation_error());
        assert!(DomainError::InvalidQuantity(f64::NAN).is_validation_error());
        assert!(DomainError::UnknownItem("x-1".into()).is_not_found_error());
        assert!(!DomainError::UnknownItem("x-1".into()).is_validation_error());
    }

    #[test]
    fn test_error_messages() {
        let error = DomainError::UnknownItem("itm-42".to_string());
        assert!(error.to_string().contains("itm-42"));

        let error = DomainError::InvalidQuantity(f64::INFINITY);
        assert!(error.to_string().contains("finite"));
    }
}
