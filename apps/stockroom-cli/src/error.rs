//! # API Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  Command Function  → Result<T, ApiError>                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ValidationError ──► GatewayError::Validation ──► VALIDATION_ERROR      │
//! │  Unknown path    ──► GatewayError::UnknownResource ──► INVALID_REQUEST  │
//! │  Read failure    ──► GatewayError::Storage(DbError) ──► DATABASE_ERROR  │
//! │  Bad config      ──► ConfigError ──► CONFIG_ERROR                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CLI prints "[CODE] message" to stderr, or the JSON form with --json    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors serialize with both a machine-readable `code` and a
//! human-readable `message`.

use serde::Serialize;
use stockroom_db::{DbError, GatewayError};

use crate::state::ConfigError;

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "price cannot be negative"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product does not exist
    NotFound,

    /// A field failed validation
    ValidationError,

    /// Unknown resource path or unsupported operation on it
    InvalidRequest,

    /// Database operation failed
    DatabaseError,

    /// Sale attempted with zero quantity
    OutOfStock,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::DatabaseError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::ConstraintViolation { message } => {
                tracing::error!("Constraint violation: {}", message);
                ApiError::validation("Product data violates a table constraint")
            }
            DbError::ConnectionFailed(_) => ApiError::database("Database connection failed"),
            DbError::MigrationFailed(_) => ApiError::database("Database migration failed"),
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::database("Database operation failed")
            }
            DbError::PoolExhausted => ApiError::database("Database pool exhausted"),
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::database("Database operation failed")
            }
        }
    }
}

/// Converts gateway errors to API errors.
impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::UnknownResource(_) | GatewayError::InsertNotSupported(_) => {
                ApiError::new(ErrorCode::InvalidRequest, err.to_string())
            }
            GatewayError::Validation(e) => ApiError::validation(e.to_string()),
            GatewayError::Storage(e) => ApiError::from(e),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::{ProductColumn, ValidationError};

    #[test]
    fn test_validation_error_keeps_message() {
        let err: ApiError = GatewayError::Validation(ValidationError::NotANumber {
            field: ProductColumn::Quantity,
            value: "lots".to_string(),
        })
        .into();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "'lots' is not a valid number for quantity");
    }

    #[test]
    fn test_unknown_resource_is_invalid_request() {
        let err: ApiError = GatewayError::UnknownResource("/suppliers".to_string()).into();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn test_storage_error_hides_details() {
        let err: ApiError =
            GatewayError::Storage(DbError::QueryFailed("no such table".to_string())).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
    }

    #[test]
    fn test_serializes_screaming_code() {
        let json = serde_json::to_value(ApiError::not_found("Product", 7)).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 7");
    }
}
