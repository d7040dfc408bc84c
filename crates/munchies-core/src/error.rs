//! # Error Types
//!
//! Domain-specific error types for munchies-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  munchies-core errors (this file)                                      │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Admin form input failures                      │
//! │                                                                         │
//! │  munchies-store errors                                                 │
//! │  └── StoreError       - Session storage failures (never fatal)         │
//! │                                                                         │
//! │  munchies-client errors                                                │
//! │  └── ClientError      - Backend call failures (what views see)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → View                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart mutations never produce errors: invalid inputs (unknown item ids,
//! non-positive quantities) are silent no-ops so UI-triggered calls stay
//! idempotent.

use thiserror::Error;

use crate::types::{ItemId, OrderId, OrderStatus};

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations detected on the client before reaching the backend.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Menu item cannot be found in the current catalog.
    #[error("Menu item not found: {0}")]
    ItemNotFound(ItemId),

    /// Order cannot be found in the fetched order list.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// A quantity, item count or total does not fit in an `i64`.
    ///
    /// ## When This Occurs
    /// - A stored cart holds quantities no real order could have
    /// - Merging two lines of the same item overflows
    #[error("Quantity of item {0} is too large")]
    QuantityTooLarge(ItemId),

    /// Checkout attempted with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// The requested status change is not offered for the order's status.
    ///
    /// ## When This Occurs
    /// ```text
    /// Order #7 is Completed
    ///      │
    ///      ▼
    /// Operator asks for Cancelled
    ///      │
    ///      ▼
    /// InvalidStatusTransition { from: Completed, to: Cancelled }
    /// ```
    #[error("Order cannot move from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised by the admin menu forms.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. a price that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Creates a Required error for the named field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an InvalidFormat error for the named field.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
