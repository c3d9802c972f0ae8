//! # SQLite Catalog
//!
//! The production `CatalogStore` implementation, backed by sqlx/SQLite.
//!
//! ## Conditional Decrements
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 How the Race Window Closes                              │
//! │                                                                         │
//! │  UPDATE medicines                                                       │
//! │  SET quantity = quantity - ?, updated_at = ?                            │
//! │  WHERE id = ? AND quantity >= ?                                         │
//! │  RETURNING quantity                                                     │
//! │                                                                         │
//! │  Terminal A: sells 3 ──► row matches, quantity 5 → 2                   │
//! │  Terminal B: sells 3 ──► WHERE quantity >= 3 no longer matches         │
//! │              └──► no row returned → InsufficientStock, stock intact    │
//! │                                                                         │
//! │  The check and the write are one statement; SQLite serializes them.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Batch decrements run the same conditional statement per line inside a
//! transaction, so a multi-line sale commits entirely or not at all.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use pharma_core::types::{Medicine, MedicineFields};
use pharma_core::validation::validate_medicine_fields;

use crate::catalog::{CatalogStore, StockDecrement};
use crate::error::{StoreError, StoreResult};

// =============================================================================
// Row Mapping
// =============================================================================

/// Database row shape for the `medicines` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct MedicineRow {
    id: String,
    name: String,
    brand: Option<String>,
    category: Option<String>,
    quantity: i64,
    expiry_date: Option<NaiveDate>,
    price_paise: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MedicineRow> for Medicine {
    fn from(row: MedicineRow) -> Self {
        Medicine {
            id: row.id,
            name: row.name,
            brand: row.brand,
            category: row.category,
            quantity: row.quantity,
            expiry_date: row.expiry_date,
            price_paise: row.price_paise,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, name, brand, category, quantity, expiry_date, price_paise, \
                              created_at, updated_at";

// =============================================================================
// SQLite Catalog
// =============================================================================

/// SQLite-backed catalog store.
///
/// ## Usage
/// ```rust,ignore
/// let catalog = db.catalog();
/// let medicines = catalog.list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Creates a new SqliteCatalog over a connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteCatalog { pool }
    }

    /// Counts catalog records (for diagnostics).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medicines")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalog {
    async fn list(&self) -> StoreResult<Vec<Medicine>> {
        let rows: Vec<MedicineRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM medicines ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Medicine::from).collect())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Medicine>> {
        let row: Option<MedicineRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM medicines WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Medicine::from))
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

        debug!(id = %medicine.id, name = %medicine.name, "Inserting medicine");

        sqlx::query(
            "INSERT INTO medicines ( \
                 id, name, brand, category, quantity, expiry_date, price_paise, \
                 created_at, updated_at \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&medicine.id)
        .bind(&medicine.name)
        .bind(&medicine.brand)
        .bind(&medicine.category)
        .bind(medicine.quantity)
        .bind(medicine.expiry_date)
        .bind(medicine.price_paise)
        .bind(medicine.created_at)
        .bind(medicine.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(medicine)
    }

    async fn update(&self, id: &str, fields: MedicineFields) -> StoreResult<Medicine> {
        validate_medicine_fields(&fields)?;

        debug!(id = %id, "Replacing medicine fields");

        let now = Utc::now();

        // Full-field replace: every mutable column is overwritten
        let result = sqlx::query(
            "UPDATE medicines SET \
                 name = ?2, \
                 brand = ?3, \
                 category = ?4, \
                 quantity = ?5, \
                 expiry_date = ?6, \
                 price_paise = ?7, \
                 updated_at = ?8 \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.brand)
        .bind(&fields.category)
        .bind(fields.quantity)
        .bind(fields.expiry_date)
        .bind(fields.price_paise)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Medicine", id));
        }

        self.get(id)
            .await?
            .ok_or_else(|| StoreError::not_found("Medicine", id))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting medicine");

        let result = sqlx::query("DELETE FROM medicines WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Medicine", id));
        }

        Ok(())
    }

    async fn decrement_if_sufficient(&self, id: &str, amount: i64) -> StoreResult<i64> {
        debug!(id = %id, amount = %amount, "Decrementing stock");

        let now = Utc::now();

        // Check and write are one statement: no read-then-write window
        let remaining: Option<i64> = sqlx::query_scalar(
            "UPDATE medicines \
             SET quantity = quantity - ?2, updated_at = ?3 \
             WHERE id = ?1 AND quantity >= ?2 \
             RETURNING quantity",
        )
        .bind(id)
        .bind(amount)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        match remaining {
            Some(quantity) => Ok(quantity),
            // No row matched: unknown id, or not enough stock
            None => match self.get(id).await? {
                Some(medicine) => Err(StoreError::insufficient_stock(
                    id,
                    medicine.quantity,
                    amount,
                )),
                None => Err(StoreError::not_found("Medicine", id)),
            },
        }
    }

    async fn decrement_all_if_sufficient(
        &self,
        decrements: &[StockDecrement],
    ) -> StoreResult<Vec<i64>> {
        debug!(lines = decrements.len(), "Decrementing stock batch");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let mut remaining = Vec::with_capacity(decrements.len());

        for d in decrements {
            let quantity: Option<i64> = sqlx::query_scalar(
                "UPDATE medicines \
                 SET quantity = quantity - ?2, updated_at = ?3 \
                 WHERE id = ?1 AND quantity >= ?2 \
                 RETURNING quantity",
            )
            .bind(&d.medicine_id)
            .bind(d.quantity)
            .bind(now)
            .fetch_optional(&mut *tx)
            .await?;

            match quantity {
                Some(quantity) => remaining.push(quantity),
                None => {
                    // Diagnose inside the transaction, then roll everything back
                    let available: Option<i64> =
                        sqlx::query_scalar("SELECT quantity FROM medicines WHERE id = ?1")
                            .bind(&d.medicine_id)
                            .fetch_optional(&mut *tx)
                            .await?;

                    tx.rollback()
                        .await
                        .map_err(|e| StoreError::TransactionFailed(e.to_string()))?;

                    return Err(match available {
                        Some(available) => {
                            StoreError::insufficient_stock(&d.medicine_id, available, d.quantity)
                        }
                        None => StoreError::not_found("Medicine", &d.medicine_id),
                    });
                }
            }
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::TransactionFailed(e.to_string()))?;

        Ok(remaining)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_catalog() -> SqliteCatalog {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.catalog()
    }

    fn fields(name: &str, quantity: i64, price_paise: i64) -> MedicineFields {
        MedicineFields {
            name: name.to_string(),
            brand: Some("Generic".to_string()),
            category: Some("Other".to_string()),
            quantity,
            expiry_date: Some("2026-06-30".parse().unwrap()),
            price_paise,
        }
    }

    #[tokio::test]
    async fn test_create_get_list() {
        let catalog = test_catalog().await;

        let created = catalog.create(fields("Paracetamol", 20, 250)).await.unwrap();
        let fetched = catalog.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Paracetamol");
        assert_eq!(fetched.quantity, 20);
        assert_eq!(fetched.expiry_date, Some("2026-06-30".parse().unwrap()));

        catalog.create(fields("Ibuprofen", 5, 450)).await.unwrap();
        let all = catalog.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(catalog.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let catalog = test_catalog().await;

        let err = catalog.create(fields("", 1, 100)).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = catalog.create(fields("X", 1, -5)).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_full_replace() {
        let catalog = test_catalog().await;
        let created = catalog.create(fields("Paracetamol", 20, 250)).await.unwrap();

        // Omitted fields (brand, category, expiry) are cleared
        let updated = catalog
            .update(
                &created.id,
                MedicineFields {
                    name: "Paracetamol 650mg".to_string(),
                    quantity: 18,
                    price_paise: 300,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Paracetamol 650mg");
        assert_eq!(updated.brand, None);
        assert_eq!(updated.category, None);
        assert_eq!(updated.expiry_date, None);
        assert_eq!(updated.quantity, 18);

        let err = catalog
            .update("missing", fields("X", 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let catalog = test_catalog().await;
        let created = catalog.create(fields("Paracetamol", 20, 250)).await.unwrap();

        catalog.delete(&created.id).await.unwrap();
        assert!(catalog.get(&created.id).await.unwrap().is_none());

        let err = catalog.delete(&created.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_decrement_if_sufficient() {
        let catalog = test_catalog().await;
        let created = catalog.create(fields("Paracetamol", 5, 250)).await.unwrap();

        assert_eq!(
            catalog.decrement_if_sufficient(&created.id, 5).await.unwrap(),
            0
        );

        let err = catalog
            .decrement_if_sufficient(&created.id, 1)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientStock {
                available: 0,
                requested: 1,
                ..
            }
        ));

        // Failed decrement leaves quantity at 0, not negative
        assert_eq!(catalog.get(&created.id).await.unwrap().unwrap().quantity, 0);

        let err = catalog
            .decrement_if_sufficient("missing", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_decrement_preserves_other_fields() {
        let catalog = test_catalog().await;
        let created = catalog.create(fields("Paracetamol", 5, 250)).await.unwrap();

        catalog.decrement_if_sufficient(&created.id, 2).await.unwrap();

        let after = catalog.get(&created.id).await.unwrap().unwrap();
        assert_eq!(after.quantity, 3);
        assert_eq!(after.name, created.name);
        assert_eq!(after.brand, created.brand);
        assert_eq!(after.category, created.category);
        assert_eq!(after.price_paise, created.price_paise);
        assert_eq!(after.expiry_date, created.expiry_date);
    }

    #[tokio::test]
    async fn test_batch_decrement_rolls_back() {
        let catalog = test_catalog().await;
        let a = catalog.create(fields("A", 10, 100)).await.unwrap();
        let b = catalog.create(fields("B", 2, 100)).await.unwrap();

        let err = catalog
            .decrement_all_if_sufficient(&[
                StockDecrement {
                    medicine_id: a.id.clone(),
                    quantity: 4,
                },
                StockDecrement {
                    medicine_id: b.id.clone(),
                    quantity: 5,
                },
            ])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientStock {
                available: 2,
                requested: 5,
                ..
            }
        ));

        // The first line's decrement was rolled back
        assert_eq!(catalog.get(&a.id).await.unwrap().unwrap().quantity, 10);
        assert_eq!(catalog.get(&b.id).await.unwrap().unwrap().quantity, 2);

        let remaining = catalog
            .decrement_all_if_sufficient(&[
                StockDecrement {
                    medicine_id: a.id.clone(),
                    quantity: 4,
                },
                StockDecrement {
                    medicine_id: b.id.clone(),
                    quantity: 2,
                },
            ])
            .await
            .unwrap();
        assert_eq!(remaining, vec![6, 0]);
    }
}
