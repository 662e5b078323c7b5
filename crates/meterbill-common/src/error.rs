//! Error types for Meterbill
//!
//! Provides a unified error type and domain-specific error variants

use thiserror::Error;

/// Result type alias using MeterbillError
pub type Result<T> = std::result::Result<T, MeterbillError>;

/// Unified error type for Meterbill operations
#[derive(Debug, Error)]
pub enum MeterbillError {
    // Cost computation errors
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    // Price plan catalog errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Cost calculation errors
///
/// An unknown meter is not an error; operations report it as `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("Meter {meter_id} has a reading set with no readings")]
    EmptyReadingSet { meter_id: String },

    #[error("Elapsed time is undefined for meter {meter_id}: all readings share one timestamp")]
    UndefinedElapsedTime { meter_id: String },

    #[error("Decimal overflow while aggregating readings")]
    Overflow,
}

/// Price plan catalog errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate price plan name: {name}")]
    DuplicatePlan { name: String },

    #[error("Price plan name must not be empty")]
    EmptyPlanName,

    #[error("Price plan not in catalog: {name}")]
    UnknownPlan { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeterbillError::Pricing(PricingError::UndefinedElapsedTime {
            meter_id: "smart-meter-0".to_string(),
        });
        assert!(err.to_string().contains("smart-meter-0"));
    }

    #[test]
    fn test_catalog_error() {
        let err: MeterbillError = CatalogError::DuplicatePlan {
            name: "price-plan-0".to_string(),
        }
        .into();
        assert!(err.to_string().contains("price-plan-0"));
    }
}
