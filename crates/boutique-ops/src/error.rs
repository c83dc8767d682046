//! # Operation Error Type
//!
//! Unified error type returned from every operation.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Boutique POS                           │
//! │                                                                         │
//! │  Web Layer                   Operations                                 │
//! │  ─────────                   ──────────                                 │
//! │                                                                         │
//! │  record_sale(id, "5")                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  Operation Function                                              │   │
//! │  │  Result<T, OpError>                                              │   │
//! │  │         │                                                        │   │
//! │  │         ▼                                                        │   │
//! │  │  Database Error? ─── DbError::QueryFailed("...") ──┐             │   │
//! │  │         │                                          │             │   │
//! │  │         ▼                                          ▼             │   │
//! │  │  Validation Error? ── ValidationError ─────────── OpError ─────► │   │
//! │  │         │                                                        │   │
//! │  │         ▼                                                        │   │
//! │  │  Success ──────────────────────────────────────────────────────► │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  The web layer renders `message` as the flash banner and can branch     │
//! │  on `code` for styling (danger / warning / info).                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is recovered at the operation boundary: the process never
//! dies on a failed operation, nothing is retried, and a failed operation
//! leaves the store untouched.

use serde::Serialize;

use boutique_core::{CoreError, ValidationError};
use boutique_db::DbError;

/// Error returned from operations.
///
/// ## Serialization
/// This is what the caller receives when an operation fails:
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock. Only 1 available."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for operation responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// The operation would violate a referential rule (409)
    Conflict,

    /// Sale quantity exceeds the units on hand
    InsufficientStock,

    /// Database operation failed (500)
    DatabaseError,
}

impl OpError {
    /// Creates a new operation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        OpError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        OpError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        OpError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        OpError::new(ErrorCode::Conflict, message)
    }
}

/// Converts database errors to operation errors.
impl From<DbError> for OpError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => OpError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => OpError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                OpError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::CheckViolation { message } => {
                // Application validation runs first; reaching a CHECK is a bug
                tracing::error!("Check constraint violation: {}", message);
                OpError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::ConnectionFailed(_) => {
                OpError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                OpError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                OpError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                OpError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                OpError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to operation errors.
impl From<CoreError> for OpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => OpError::not_found("Product", &id),
            CoreError::CategoryNotFound(id) => OpError::not_found("Category", &id),
            CoreError::InsufficientStock { available, .. } => OpError::new(
                ErrorCode::InsufficientStock,
                format!("Insufficient stock. Only {} available.", available),
            ),
            CoreError::CategoryHasProducts { .. } => {
                OpError::conflict("Cannot delete category with items. Move items first.")
            }
            CoreError::Validation(e) => OpError::validation(e.to_string()),
        }
    }
}

/// Converts validation errors directly (saves a CoreError hop for the
/// form-parsing paths).
impl From<ValidationError> for OpError {
    fn from(err: ValidationError) -> Self {
        OpError::validation(err.to_string())
    }
}

impl std::fmt::Display for OpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for OpError {}

/// Result type for operations.
pub type OpResult<T> = Result<T, OpError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message() {
        let err: OpError = CoreError::InsufficientStock {
            product: "Rose Perfume".to_string(),
            available: 1,
            requested: 5,
        }
        .into();

        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.message, "Insufficient stock. Only 1 available.");
    }

    #[test]
    fn test_db_not_found_maps_to_not_found() {
        let err: OpError = DbError::not_found("Product", "abc").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: abc");
    }

    #[test]
    fn test_category_conflict_message() {
        let err: OpError = CoreError::CategoryHasProducts {
            name: "Fragrance".to_string(),
            product_count: 3,
        }
        .into();

        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "Cannot delete category with items. Move items first.");
    }
}
