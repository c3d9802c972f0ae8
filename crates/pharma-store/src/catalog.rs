//! # Catalog Store Contract
//!
//! The `CatalogStore` trait is the seam between the business logic and
//! whatever actually holds medicine records. Callers receive a store handle
//! by injection and never reach around it.
//!
//! ## Stock Decrements Are Compare-And-Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Decrement Strategy                                   │
//! │                                                                         │
//! │  ❌ WRONG: read-then-write (races with concurrent sales)               │
//! │     let m = store.get(id);                                             │
//! │     store.update(id, { quantity: m.quantity - 3, .. });                │
//! │                                                                         │
//! │  ✅ CORRECT: conditional decrement, one atomic operation               │
//! │     store.decrement_if_sufficient(id, 3)                               │
//! │       → UPDATE .. SET quantity = quantity - 3                          │
//! │         WHERE id = ? AND quantity >= 3                                 │
//! │                                                                         │
//! │  Two simultaneous sales on the same medicine can no longer both        │
//! │  pass a stale stock check: the second one fails InsufficientStock.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;

use pharma_core::types::{Medicine, MedicineFields};

use crate::error::StoreResult;

// =============================================================================
// Stock Decrement
// =============================================================================

/// One stock decrement in a batch operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockDecrement {
    /// Medicine to decrement.
    pub medicine_id: String,

    /// Units to remove from stock. Must be ≥ 1.
    pub quantity: i64,
}

// =============================================================================
// Catalog Store Trait
// =============================================================================

/// The catalog repository contract.
///
/// ## Contract Notes
/// - `id` is assigned by the store on `create` and immutable thereafter
/// - `update` has full-field replace semantics: fields not supplied in
///   [`MedicineFields`] are cleared, not preserved
/// - Quantities never go negative: every decrement path is conditional
/// - Implementations report whether batch decrements are atomic via
///   [`supports_atomic_batch`](CatalogStore::supports_atomic_batch), so
///   callers can choose a commit mode explicitly
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Lists all medicine records in creation order.
    async fn list(&self) -> StoreResult<Vec<Medicine>>;

    /// Gets a record by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Medicine))` - Record found
    /// * `Ok(None)` - Record not found
    async fn get(&self, id: &str) -> StoreResult<Option<Medicine>>;

    /// Creates a record from caller-supplied fields.
    ///
    /// Validates the fields, assigns a fresh UUID and timestamps.
    ///
    /// ## Errors
    /// * `StoreError::Validation` - name missing, or quantity/price negative
    async fn create(&self, fields: MedicineFields) -> StoreResult<Medicine>;

    /// Replaces a record's fields (full-replace semantics).
    ///
    /// Preserves `id` and `created_at`, refreshes `updated_at`.
    ///
    /// ## Errors
    /// * `StoreError::NotFound` - unknown id
    /// * `StoreError::Validation` - invalid fields
    async fn update(&self, id: &str, fields: MedicineFields) -> StoreResult<Medicine>;

    /// Deletes a record.
    ///
    /// ## Errors
    /// * `StoreError::NotFound` - unknown id
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Atomically decrements stock if at least `amount` units are available.
    ///
    /// Exactly one of three things happens:
    /// - stock is decremented and the new quantity returned
    /// - `StoreError::InsufficientStock` (stock untouched)
    /// - `StoreError::NotFound`
    ///
    /// `amount` must be ≥ 1.
    async fn decrement_if_sufficient(&self, id: &str, amount: i64) -> StoreResult<i64>;

    /// Applies a batch of decrements with all-or-nothing semantics.
    ///
    /// On success returns the new quantity of each record, in batch order.
    /// On any failure NO decrement is applied.
    ///
    /// Only meaningful when [`supports_atomic_batch`](CatalogStore::supports_atomic_batch)
    /// is true; callers needing the sequential best-effort model issue
    /// individual [`decrement_if_sufficient`](CatalogStore::decrement_if_sufficient)
    /// calls instead.
    async fn decrement_all_if_sufficient(
        &self,
        decrements: &[StockDecrement],
    ) -> StoreResult<Vec<i64>>;

    /// Whether [`decrement_all_if_sufficient`](CatalogStore::decrement_all_if_sufficient)
    /// is genuinely all-or-nothing for this implementation.
    fn supports_atomic_batch(&self) -> bool {
        true
    }
}
