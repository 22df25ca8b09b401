//! # Database Error Types
//!
//! Error types for the record store and the access gateway.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError ← Adds context and categorization                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Gateway                                                               │
//! │   ├── read   → GatewayError::Storage(DbError)                          │
//! │   └── write  → sentinel (None / 0 rows), logged, never propagated      │
//! │                                                                         │
//! │  ValidationError / unknown path → GatewayError, always propagated      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stockroom_core::ValidationError;
use thiserror::Error;

// =============================================================================
// Database Error
// =============================================================================

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A table constraint rejected the write.
    ///
    /// ## When This Occurs
    /// - NOT NULL column written with NULL
    /// - UNIQUE / CHECK constraint failure
    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → ConstraintViolation or QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                // SQLite reports "<KIND> constraint failed: <table>.<column>"
                let msg = db_err.message();
                if msg.contains("constraint failed") {
                    DbError::ConstraintViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Gateway Error
// =============================================================================

/// Errors surfaced by the access gateway.
///
/// Storage failures on writes are not errors: inserts report `None` and
/// updates/deletes report `0` rows. `Storage` only comes from reads.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The path matches neither `/products` nor `/products/{id}`.
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// Inserts are only accepted on the collection path.
    #[error("Insertion not supported for {0}")]
    InsertNotSupported(String),

    /// A field failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A read could not be completed.
    #[error("Storage failure: {0}")]
    Storage(#[from] DbError),
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::ProductColumn;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[test]
    fn test_pool_errors() {
        let err: DbError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, DbError::PoolExhausted));

        let err: DbError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }

    #[test]
    fn test_gateway_error_messages() {
        let err = GatewayError::UnknownResource("/suppliers".to_string());
        assert_eq!(err.to_string(), "Unknown resource: /suppliers");

        let err: GatewayError = ValidationError::Negative {
            field: ProductColumn::Price,
        }
        .into();
        assert_eq!(err.to_string(), "Validation failed: price cannot be negative");
    }
}
