//! # Error Types
//!
//! Domain-specific error types for pharma-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pharma-core errors (this file)                                        │
//! │  ├── ValidationError  - Record field validation failures               │
//! │  └── CartError        - Cart aggregation failures                      │
//! │                                                                         │
//! │  pharma-store errors (separate crate)                                  │
//! │  └── StoreError       - Catalog store operation failures               │
//! │                                                                         │
//! │  pharma-sales errors (separate crate)                                  │
//! │  ├── SaleError        - Sale transaction failures                      │
//! │  └── CheckoutError    - Checkout session failures                      │
//! │                                                                         │
//! │  Flow: ValidationError → StoreError → SaleError → ApiError → Client    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (medicine id, quantities, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Record field validation errors.
///
/// These occur when caller-supplied medicine fields don't meet requirements.
/// Used for early validation before anything touches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Cart Error
// =============================================================================

/// Cart aggregation errors.
///
/// These are the cart-side pre-checks: they reject a mutation before any
/// stock is committed, leaving the cart unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Requested line quantity is below 1.
    #[error("Quantity must be at least 1, got {requested}")]
    InvalidQuantity { requested: i64 },

    /// The line quantity (after merging) would exceed the medicine's
    /// current stock. The cart is left unchanged.
    #[error("Stock exceeded for {medicine_id}: available {available}, requested {requested}")]
    StockExceeded {
        medicine_id: String,
        available: i64,
        requested: i64,
    },

    /// Checkout was attempted on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,
}

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
