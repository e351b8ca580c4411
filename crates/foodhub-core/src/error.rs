//! # Error Types
//!
//! Domain-specific error types for foodhub-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  foodhub-core errors (this file)                                       │
//! │  ├── OrderError       - What order operations return                   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  foodhub-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                         (collapsed into OrderError::NotFound/Storage)  │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → OrderError ← DbError                          │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                           ApiError → Client                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Retry Semantics
//! | Variant             | Retry as-is? | Caller action                 |
//! |---------------------|--------------|-------------------------------|
//! | `Validation`        | no           | fix the request               |
//! | `NotFound`          | no           | fix the reference             |
//! | `InvalidTransition` | no           | re-fetch current status       |
//! | `Conflict`          | yes          | retry (state is moving)       |
//! | `Storage`           | yes          | retry later                   |

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Order Error
// =============================================================================

/// Errors returned by order placement and status transitions.
///
/// Storage details never leak through this type: `Storage` carries a
/// message meant for logs, and the API layer replaces it with a generic one.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Malformed or inconsistent input. Nothing was written.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced order, customer or menu item does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The requested status is not a direct successor of the current one.
    ///
    /// ## User Workflow
    /// ```text
    /// PUT status DELIVERED on a PENDING order
    ///      │
    ///      ▼
    /// InvalidTransition { from: PENDING, to: DELIVERED }
    ///      │
    ///      ▼
    /// Client re-fetches the order and offers CONFIRMED / CANCELLED
    /// ```
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidTransition {
        order_id: i64,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// The status kept changing underneath repeated update attempts.
    #[error("Order {order_id} was modified concurrently, retry the request")]
    Conflict { order_id: i64 },

    /// The store was unavailable or a write failed. Nothing was committed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl OrderError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        OrderError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Whether repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, OrderError::Storage(_) | OrderError::Conflict { .. })
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a request doesn't meet requirements.
/// They are raised before anything touches the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// A line subtotal is not quantity × unit price.
    #[error("{field} is {actual} but quantity × unit price is {expected}")]
    SubtotalMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// A client-supplied total differs from the sum of line subtotals.
    #[error("totalAmount is {supplied} but items add up to {computed}")]
    TotalMismatch { supplied: String, computed: String },
}

impl ValidationError {
    /// Returns the name of the offending field, for API error bodies.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. }
            | ValidationError::SubtotalMismatch { field, .. } => field,
            ValidationError::TotalMismatch { .. } => "totalAmount",
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with OrderError.
pub type OrderResult<T> = Result<T, OrderError>;

// =============================================================================
// Unit Tests
// =============================================================================
