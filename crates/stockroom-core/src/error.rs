//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  └── ValidationError  - A field failed a specific rule                 │
//! │                                                                         │
//! │  stockroom-db errors (separate crate)                                  │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── GatewayError     - Unknown resource / validation / storage        │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the user sees (serialized)                │
//! │                                                                         │
//! │  Flow: ValidationError → GatewayError → ApiError → User                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductColumn;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Every variant names the offending field so the caller can point the user
/// at the right input. A non-numeric price or quantity (`NotANumber`) is
/// always distinguishable from a present-but-negative one (`Negative`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing, null or blank.
    #[error("{field} is required")]
    Required { field: ProductColumn },

    /// A numeric field does not parse as an integer.
    ///
    /// ## When This Occurs
    /// - Price typed as `"12abc"`
    /// - Quantity left as an empty string
    #[error("'{value}' is not a valid number for {field}")]
    NotANumber { field: ProductColumn, value: String },

    /// A numeric field parsed but is below zero.
    #[error("{field} cannot be negative")]
    Negative { field: ProductColumn },

    /// The field is assigned by the store and cannot be written.
    #[error("{field} is assigned by the store and cannot be written")]
    ReadOnly { field: ProductColumn },
}

impl ValidationError {
    /// Returns the field that failed validation.
    pub fn field(&self) -> ProductColumn {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::Negative { field }
            | ValidationError::ReadOnly { field } => *field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: ProductColumn::SupplierName,
        };
        assert_eq!(err.to_string(), "supplier name is required");

        let err = ValidationError::NotANumber {
            field: ProductColumn::Price,
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "'abc' is not a valid number for price");

        let err = ValidationError::Negative {
            field: ProductColumn::Quantity,
        };
        assert_eq!(err.to_string(), "quantity cannot be negative");
    }

    #[test]
    fn test_field_accessor() {
        let err = ValidationError::NotANumber {
            field: ProductColumn::Quantity,
            value: "x".to_string(),
        };
        assert_eq!(err.field(), ProductColumn::Quantity);
    }
}
