//! # Error Types
//!
//! Domain-specific error types for kasir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kasir-core errors (this file)                                         │
//! │  ├── CoreError        - Domain failures (not found, out of stock)      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kasir-db errors (separate crate)                                      │
//! │  └── DbError          - Storage failures, wraps CoreError              │
//! │                                                                         │
//! │  HTTP errors (apps/api)                                                │
//! │  └── ApiError         - What the client sees (code + message)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Raised before or during a checkout's unit of work; any of them aborts the
/// whole checkout.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - A checkout line references an id that is not in the catalogue
    /// - Product CRUD addresses an id that was never created or was deleted
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Category cannot be found.
    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    /// Transaction cannot be found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(i64),

    /// Insufficient stock to complete a checkout.
    ///
    /// ## User Workflow
    /// ```text
    /// POST /api/checkout [{ product_id: 7, quantity: 5 }]
    ///      │
    ///      ▼
    /// Lock product 7: stock = 3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Kopi Susu", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Whole checkout rolled back, client shows "only 3 left"
    /// ```
    #[error("Insufficient stock for '{name}': {available} left, {requested} requested")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A subtotal or total does not fit in the money representation.
    #[error("Amount overflow while computing {what}")]
    AmountOverflow { what: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before any storage access.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format or inconsistent value (e.g., reversed date range).
    #[error("{field} is invalid: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
