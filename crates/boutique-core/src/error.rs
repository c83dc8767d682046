//! # Error Types
//!
//! Domain-specific error types for boutique-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  boutique-core errors (this file)                                   │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Form-input validation failures              │
//! │                                                                     │
//! │  boutique-db errors (separate crate)                                │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  boutique-ops errors (separate crate)                               │
//! │  └── OpError          - What the caller sees (code + message)       │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → DbError → OpError → Caller     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, counts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They are recovered at the boundary of the operation that raised them and
/// translated to user-friendly messages; none are fatal to the process.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category cannot be found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Insufficient stock to complete a sale.
    ///
    /// ## When This Occurs
    /// - Requested sale quantity exceeds the units on hand at commit time
    ///
    /// ## User Workflow
    /// ```text
    /// Sell (qty: 5)
    ///      │
    ///      ▼
    /// Conditional stock decrement: available=1
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Rose Perfume", available: 1, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Insufficient stock. Only 1 available."
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Deleting a category that still owns products would orphan them.
    ///
    /// This is the one Conflict-class invariant in the system: a category
    /// row may only be removed once no product references it.
    #[error("Category '{name}' still has {product_count} product(s)")]
    CategoryHasProducts { name: String, product_count: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Form-input validation errors.
///
/// The web layer submits every field as a raw string; these errors occur
/// when a field fails to parse or violates a basic rule. Used for early
/// validation before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Field did not parse as a number.
    #[error("{field} is not a valid number: '{value}'")]
    NotANumber { field: String, value: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Duplicate value (e.g., duplicate category name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
