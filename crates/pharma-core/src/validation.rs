//! # Validation Module
//!
//! Record field validation for PharmaPOS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: API body deserialization (serde type checks)                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - field rules, before any store write            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (quantity >= 0), CHECK (price_paise >= 0)                   │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pharma_core::types::MedicineFields;
//! use pharma_core::validation::validate_medicine_fields;
//!
//! let fields = MedicineFields {
//!     name: "Paracetamol 500mg".to_string(),
//!     quantity: 20,
//!     price_paise: 250,
//!     ..Default::default()
//! };
//! validate_medicine_fields(&fields).unwrap();
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::MedicineFields;

/// Maximum length for the medicine name.
const MAX_NAME_LEN: usize = 200;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a medicine name.
///
/// ## Rules
/// - Must not be empty (whitespace-only counts as empty)
/// - Must be at most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a stock quantity.
///
/// ## Rules
/// - Must be non-negative (zero stock is a valid state)
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in paise.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: free samples)
pub fn validate_price_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validator
// =============================================================================

/// Validates a full field set before a create or replace.
///
/// The store calls this on every `create` and `update`; the API layer maps
/// the error to a 400 response.
pub fn validate_medicine_fields(fields: &MedicineFields) -> ValidationResult<()> {
    validate_name(&fields.name)?;
    validate_quantity(fields.quantity)?;
    validate_price_paise(fields.price_paise)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
