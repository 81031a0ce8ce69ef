//! # Error Types
//!
//! Domain-specific error types for stockbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockbook-core errors (this file)                                     │
//! │  ├── CoreError        - Store operation failures                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockbook-app errors (separate crate)                                 │
//! │  ├── ConfigError      - Config file / env failures                     │
//! │  └── ApiError         - What the dashboard sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Dashboard              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every store operation either fully succeeds or returns one of these
//! before touching any record.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by [`crate::InventoryStore`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The referenced record does not exist.
    ///
    /// ## When This Occurs
    /// - Updating or deleting a product id that was never added
    /// - Updating or deleting a product that was already deleted
    /// - Recording a sale against a product that is not in the catalog
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A sale asked for more units than are in stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Record Sale (qty: 10)
    ///      │
    ///      ▼
    /// Check stock: available=5
    ///      │
    ///      ▼
    /// InsufficientStock { product_id, available: 5, requested: 10 }
    ///      │
    ///      ▼
    /// Dashboard shows: "Only 5 in stock"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for a missing product.
    pub fn product_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: "Product",
            id: id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by [`crate::validation`] for raw form input, and by the store as a
/// last guard against negative quantities and prices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Number above the accepted range.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., malformed decimal amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
