//! # In-Memory Catalog
//!
//! A `CatalogStore` backed by a `tokio::sync::RwLock`ed vector.
//!
//! Stands in for the generic document store the system assumes: tests run
//! against it without touching disk, and it doubles as the reference
//! implementation of the contract (the SQLite store must behave
//! identically).
//!
//! ## Thread Safety
//! All writes take the lock exclusively, so a batch decrement is naturally
//! all-or-nothing: no other task can observe or interleave with a
//! half-applied batch.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use pharma_core::types::{Medicine, MedicineFields};
use pharma_core::validation::validate_medicine_fields;

use crate::catalog::{CatalogStore, StockDecrement};
use crate::error::{StoreError, StoreResult};

/// In-memory catalog store.
///
/// Cloning shares the underlying records, matching the handle semantics of
/// [`SqliteCatalog`](crate::SqliteCatalog).
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    records: Arc<RwLock<Vec<Medicine>>>,
}

impl MemoryCatalog {
    /// Creates an empty in-memory catalog.
    pub fn new() -> Self {
        MemoryCatalog::default()
    }

    /// Creates a catalog pre-seeded with records (test convenience).
    pub fn with_records(records: Vec<Medicine>) -> Self {
        MemoryCatalog {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn list(&self) -> StoreResult<Vec<Medicine>> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Medicine>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn create(&self, fields: MedicineFields) -> StoreResult<Medicine> {
        validate_medicine_fields(&fields)?;

        let now = Utc::now();
        let medicine = Medicine {
            id: Uuid::new_v4().to_string(),
            name: fields.name,
            brand: fields.brand,
            category: fields.category,
            quantity: fields.quantity,
            expiry_date: fields.expiry_date,
            price_paise: fields.price_paise,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %medicine.id, name = %medicine.name, "Creating medicine (memory)");

        self.records.write().await.push(medicine.clone());
        Ok(medicine)
    }

    async fn update(&self, id: &str, fields: MedicineFields) -> StoreResult<Medicine> {
        validate_medicine_fields(&fields)?;

        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::not_found("Medicine", id))?;

        // Full-field replace: everything except id and created_at
        record.name = fields.name;
        record.brand = fields.brand;
        record.category = fields.category;
        record.quantity = fields.quantity;
        record.expiry_date = fields.expiry_date;
        record.price_paise = fields.price_paise;
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|m| m.id != id);

        if records.len() == before {
            return Err(StoreError::not_found("Medicine", id));
        }

        debug!(id = %id, "Deleted medicine (memory)");
        Ok(())
    }

    async fn decrement_if_sufficient(&self, id: &str, amount: i64) -> StoreResult<i64> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::not_found("Medicine", id))?;

        if record.quantity < amount {
            return Err(StoreError::insufficient_stock(id, record.quantity, amount));
        }

        record.quantity -= amount;
        record.updated_at = Utc::now();

        debug!(id = %id, amount = %amount, remaining = %record.quantity, "Decremented stock (memory)");
        Ok(record.quantity)
    }

    async fn decrement_all_if_sufficient(
        &self,
        decrements: &[StockDecrement],
    ) -> StoreResult<Vec<i64>> {
        let mut records = self.records.write().await;

        // Validate every line before touching any quantity
        for d in decrements {
            let record = records
                .iter()
                .find(|m| m.id == d.medicine_id)
                .ok_or_else(|| StoreError::not_found("Medicine", &d.medicine_id))?;

            if record.quantity < d.quantity {
                return Err(StoreError::insufficient_stock(
                    &d.medicine_id,
                    record.quantity,
                    d.quantity,
                ));
            }
        }

        let now = Utc::now();
        let mut remaining = Vec::with_capacity(decrements.len());
        for d in decrements {
            // Lookup cannot fail: validated above under the same write lock
            if let Some(record) = records.iter_mut().find(|m| m.id == d.medicine_id) {
                record.quantity -= d.quantity;
                record.updated_at = now;
                remaining.push(record.quantity);
            }
        }

        Ok(remaining)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
