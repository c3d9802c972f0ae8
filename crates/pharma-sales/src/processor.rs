//! # Sale Transaction Processor
//!
//! Converts a [`SaleRequest`] into committed quantity decrements, or reports
//! exactly which line failed and what was already applied.
//!
//! ## Commit Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Commit Modes                                      │
//! │                                                                         │
//! │  Atomic (default where the store supports it)                          │
//! │    [line1, line2, line3] ──► one batch decrement ──► all committed     │
//! │                                      │                                  │
//! │                                      └── any failure → NOTHING applied │
//! │                                                                         │
//! │  BestEffort (sequential, source-faithful)                              │
//! │    line1 ──► decrement ✓                                               │
//! │    line2 ──► decrement ✗ InsufficientStock                             │
//! │    line3 ──► never attempted                                           │
//! │                                                                         │
//! │    line1 STAYS applied. No rollback. The error carries the ledger of   │
//! │    applied lines so the caller can see the partial state.              │
//! │                                                                         │
//! │  BestEffort is NOT idempotent: resubmitting the same request after a   │
//! │  partial failure double-decrements the lines that already applied.    │
//! │  Callers must not retry blindly.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! In both modes each line issues conditional decrements only - stock can
//! never go negative, and concurrent sales on the same medicine cannot both
//! pass a stale check.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use pharma_core::money::Money;
use pharma_core::types::{Customer, SaleRequest};
use pharma_store::{CatalogStore, StockDecrement, StoreError};

// =============================================================================
// Commit Mode
// =============================================================================

/// How a multi-line sale is committed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitMode {
    /// All-or-nothing: the whole request commits in one batch decrement,
    /// or nothing is applied.
    Atomic,

    /// Sequential: lines commit one at a time in request order; processing
    /// stops at the first failure and already-applied lines remain applied.
    BestEffort,
}

// =============================================================================
// Results
// =============================================================================

/// One successfully committed sale line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedLine {
    pub medicine_id: String,

    /// Units decremented.
    pub quantity: i64,

    /// Stock remaining after the decrement.
    pub remaining_stock: i64,
}

/// Success summary of a committed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    /// Sum of quantities across all lines.
    pub total_items: i64,

    /// Sum of price × quantity in paise, using the prices captured at
    /// cart-add time (not re-fetched).
    pub total_amount_paise: i64,

    /// Per-line commit results, in request order.
    pub lines: Vec<AppliedLine>,

    /// Customer metadata passed through from the request.
    pub customer: Customer,
}

impl SaleSummary {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_paise(self.total_amount_paise)
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Sale transaction failures.
///
/// Variants that can follow partial commits carry the ledger of lines
/// already applied; in `Atomic` mode that ledger is always empty.
#[derive(Debug, Error)]
pub enum SaleError {
    /// The request had no line items.
    #[error("Sale request has no line items")]
    EmptyRequest,

    /// A line requested fewer than 1 unit. Nothing is committed.
    #[error("Invalid quantity {quantity} for {medicine_id}")]
    InvalidQuantity { medicine_id: String, quantity: i64 },

    /// A line referenced an unknown medicine. Processing stopped; no update
    /// was issued for that line.
    #[error("Medicine not found: {medicine_id}")]
    MedicineNotFound {
        medicine_id: String,
        applied: Vec<AppliedLine>,
    },

    /// A line requested more units than the store had. Processing stopped.
    #[error("Insufficient stock for {medicine_id}: available {available}, requested {requested}")]
    InsufficientStock {
        medicine_id: String,
        available: i64,
        requested: i64,
        applied: Vec<AppliedLine>,
    },

    /// The store rejected a write. Processing stopped; in BestEffort mode
    /// prior writes are not undone.
    #[error("Store write failed: {source}")]
    StoreWrite {
        #[source]
        source: StoreError,
        applied: Vec<AppliedLine>,
    },
}

impl SaleError {
    /// Lines that were committed before the failure (empty in Atomic mode).
    pub fn applied(&self) -> &[AppliedLine] {
        match self {
            SaleError::MedicineNotFound { applied, .. }
            | SaleError::InsufficientStock { applied, .. }
            | SaleError::StoreWrite { applied, .. } => applied,
            SaleError::EmptyRequest | SaleError::InvalidQuantity { .. } => &[],
        }
    }

    fn from_store(err: StoreError, applied: Vec<AppliedLine>) -> Self {
        match err {
            StoreError::NotFound { id, .. } => SaleError::MedicineNotFound {
                medicine_id: id,
                applied,
            },
            StoreError::InsufficientStock {
                id,
                available,
                requested,
            } => SaleError::InsufficientStock {
                medicine_id: id,
                available,
                requested,
                applied,
            },
            other => SaleError::StoreWrite {
                source: other,
                applied,
            },
        }
    }
}

// =============================================================================
// Processor
// =============================================================================

/// The sale transaction processor.
///
/// Holds an injected catalog store handle and an explicit commit mode.
///
/// ## Usage
/// ```rust,ignore
/// let processor = SaleProcessor::new(catalog);
/// let summary = processor.process(&request).await?;
/// println!("Sold {} items for {}", summary.total_items, summary.total_amount());
/// ```
#[derive(Debug, Clone)]
pub struct SaleProcessor<S> {
    store: S,
    mode: CommitMode,
}

impl<S: CatalogStore> SaleProcessor<S> {
    /// Creates a processor, choosing `Atomic` when the store supports
    /// all-or-nothing batches and `BestEffort` otherwise.
    pub fn new(store: S) -> Self {
        let mode = if store.supports_atomic_batch() {
            CommitMode::Atomic
        } else {
            CommitMode::BestEffort
        };
        SaleProcessor { store, mode }
    }

    /// Creates a processor with an explicit commit mode.
    pub fn with_mode(store: S, mode: CommitMode) -> Self {
        SaleProcessor { store, mode }
    }

    /// The commit mode this processor uses.
    pub fn mode(&self) -> CommitMode {
        self.mode
    }

    /// Commits a sale request against the store.
    ///
    /// ## Contract
    /// - Every line must resolve to an existing medicine with enough stock
    /// - Lines are processed in request order
    /// - Each committed line is exactly one conditional decrement; no other
    ///   record field changes
    /// - On success, totals use the prices captured at cart-add time
    ///
    /// See [`CommitMode`] for what happens on failure.
    pub async fn process(&self, request: &SaleRequest) -> Result<SaleSummary, SaleError> {
        if request.lines.is_empty() {
            return Err(SaleError::EmptyRequest);
        }

        for line in &request.lines {
            if line.quantity < 1 {
                return Err(SaleError::InvalidQuantity {
                    medicine_id: line.medicine_id.clone(),
                    quantity: line.quantity,
                });
            }
        }

        debug!(
            lines = request.lines.len(),
            mode = ?self.mode,
            "Processing sale request"
        );

        let lines = match self.mode {
            CommitMode::Atomic => self.commit_atomic(request).await?,
            CommitMode::BestEffort => self.commit_best_effort(request).await?,
        };

        let summary = SaleSummary {
            total_items: request.total_items(),
            total_amount_paise: request.total_amount().paise(),
            lines,
            customer: request.customer.clone(),
        };

        info!(
            total_items = summary.total_items,
            total_amount = %summary.total_amount(),
            lines = summary.lines.len(),
            "Sale committed"
        );

        Ok(summary)
    }

    /// One batch decrement: the store guarantees all-or-nothing.
    async fn commit_atomic(&self, request: &SaleRequest) -> Result<Vec<AppliedLine>, SaleError> {
        let decrements: Vec<StockDecrement> = request
            .lines
            .iter()
            .map(|l| StockDecrement {
                medicine_id: l.medicine_id.clone(),
                quantity: l.quantity,
            })
            .collect();

        let remaining = self
            .store
            .decrement_all_if_sufficient(&decrements)
            .await
            .map_err(|e| SaleError::from_store(e, Vec::new()))?;

        Ok(request
            .lines
            .iter()
            .zip(remaining)
            .map(|(line, remaining_stock)| AppliedLine {
                medicine_id: line.medicine_id.clone(),
                quantity: line.quantity,
                remaining_stock,
            })
            .collect())
    }

    /// Sequential decrements in request order; stops at the first failure
    /// and leaves prior decrements applied.
    async fn commit_best_effort(
        &self,
        request: &SaleRequest,
    ) -> Result<Vec<AppliedLine>, SaleError> {
        let mut applied: Vec<AppliedLine> = Vec::with_capacity(request.lines.len());

        for line in &request.lines {
            match self
                .store
                .decrement_if_sufficient(&line.medicine_id, line.quantity)
                .await
            {
                Ok(remaining_stock) => applied.push(AppliedLine {
                    medicine_id: line.medicine_id.clone(),
                    quantity: line.quantity,
                    remaining_stock,
                }),
                Err(err) => {
                    warn!(
                        medicine_id = %line.medicine_id,
                        applied = applied.len(),
                        "Sale stopped mid-request; applied lines remain committed"
                    );
                    return Err(SaleError::from_store(err, applied));
                }
            }
        }

        Ok(applied)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pharma_core::types::{MedicineFields, SaleLine};
    use pharma_store::MemoryCatalog;

    async fn seed(catalog: &MemoryCatalog, name: &str, quantity: i64, price_paise: i64) -> String {
        catalog
            .create(MedicineFields {
                name: name.to_string(),
                quantity,
                price_paise,
                ..Default::default()
            })
            .await
            .unwrap()
            .id
    }

    fn line(id: &str, quantity: i64, unit_price_paise: i64) -> SaleLine {
        SaleLine {
            medicine_id: id.to_string(),
            quantity,
            unit_price_paise,
        }
    }

    fn request(lines: Vec<SaleLine>) -> SaleRequest {
        SaleRequest {
            lines,
            customer: Customer::default(),
        }
    }

    #[tokio::test]
    async fn test_single_line_sale_conserves_stock() {
        let catalog = MemoryCatalog::new();
        let id = seed(&catalog, "Paracetamol", 5, 1000).await;
        let processor = SaleProcessor::new(catalog.clone());

        let summary = processor.process(&request(vec![line(&id, 5, 1000)])).await.unwrap();

        assert_eq!(summary.total_items, 5);
        assert_eq!(summary.total_amount_paise, 5000); // ₹50.00
        assert_eq!(summary.lines[0].remaining_stock, 0);

        let after = catalog.get(&id).await.unwrap().unwrap();
        assert_eq!(after.quantity, 0);
        // No other field changed
        assert_eq!(after.name, "Paracetamol");
        assert_eq!(after.price_paise, 1000);
    }

    #[tokio::test]
    async fn test_sale_after_stock_exhausted_fails() {
        let catalog = MemoryCatalog::new();
        let id = seed(&catalog, "Paracetamol", 5, 1000).await;
        let processor = SaleProcessor::new(catalog.clone());

        processor.process(&request(vec![line(&id, 5, 1000)])).await.unwrap();

        let err = processor
            .process(&request(vec![line(&id, 1, 1000)]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SaleError::InsufficientStock {
                available: 0,
                requested: 1,
                ..
            }
        ));

        // Failed sale leaves quantity unchanged at 0
        assert_eq!(catalog.get(&id).await.unwrap().unwrap().quantity, 0);
    }

    #[tokio::test]
    async fn test_best_effort_partial_failure_ordering() {
        let catalog = MemoryCatalog::new();
        let a = seed(&catalog, "A", 10, 100).await;
        let b = seed(&catalog, "B", 2, 100).await;
        let processor = SaleProcessor::with_mode(catalog.clone(), CommitMode::BestEffort);

        let err = processor
            .process(&request(vec![line(&a, 4, 100), line(&b, 5, 100)]))
            .await
            .unwrap_err();

        // Line 2 failed...
        let SaleError::InsufficientStock {
            medicine_id,
            available,
            requested,
            applied,
        } = err
        else {
            panic!("expected InsufficientStock");
        };
        assert_eq!(medicine_id, b);
        assert_eq!(available, 2);
        assert_eq!(requested, 5);

        // ...but line 1's decrement stays applied (no rollback)
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].medicine_id, a);
        assert_eq!(catalog.get(&a).await.unwrap().unwrap().quantity, 6);
        assert_eq!(catalog.get(&b).await.unwrap().unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn test_best_effort_is_not_idempotent() {
        let catalog = MemoryCatalog::new();
        let a = seed(&catalog, "A", 10, 100).await;
        let missing = "no-such-id";
        let processor = SaleProcessor::with_mode(catalog.clone(), CommitMode::BestEffort);

        let req = request(vec![line(&a, 2, 100), line(missing, 1, 100)]);

        // Two identical submissions each decrement line 1 before failing
        assert!(processor.process(&req).await.is_err());
        assert!(processor.process(&req).await.is_err());
        assert_eq!(catalog.get(&a).await.unwrap().unwrap().quantity, 6);
    }

    #[tokio::test]
    async fn test_atomic_mode_applies_nothing_on_failure() {
        let catalog = MemoryCatalog::new();
        let a = seed(&catalog, "A", 10, 100).await;
        let b = seed(&catalog, "B", 2, 100).await;
        let processor = SaleProcessor::with_mode(catalog.clone(), CommitMode::Atomic);

        let err = processor
            .process(&request(vec![line(&a, 4, 100), line(&b, 5, 100)]))
            .await
            .unwrap_err();

        assert!(matches!(err, SaleError::InsufficientStock { .. }));
        assert!(err.applied().is_empty());
        // Line 1 was NOT applied
        assert_eq!(catalog.get(&a).await.unwrap().unwrap().quantity, 10);
    }

    #[tokio::test]
    async fn test_unknown_medicine_stops_processing() {
        let catalog = MemoryCatalog::new();
        let a = seed(&catalog, "A", 10, 100).await;
        let processor = SaleProcessor::with_mode(catalog.clone(), CommitMode::BestEffort);

        let err = processor
            .process(&request(vec![line("ghost", 1, 100), line(&a, 1, 100)]))
            .await
            .unwrap_err();

        assert!(matches!(err, SaleError::MedicineNotFound { .. }));
        // The failing line came first: nothing was applied at all
        assert!(err.applied().is_empty());
        assert_eq!(catalog.get(&a).await.unwrap().unwrap().quantity, 10);
    }

    #[tokio::test]
    async fn test_total_amount_uses_frozen_prices() {
        let catalog = MemoryCatalog::new();
        let id = seed(&catalog, "A", 10, 999).await;
        let processor = SaleProcessor::new(catalog.clone());

        // Cart captured the price as ₹5.00 before the store price changed
        let summary = processor.process(&request(vec![line(&id, 2, 500)])).await.unwrap();
        assert_eq!(summary.total_amount_paise, 1000);
    }

    #[tokio::test]
    async fn test_empty_and_invalid_requests() {
        let catalog = MemoryCatalog::new();
        let id = seed(&catalog, "A", 10, 100).await;
        let processor = SaleProcessor::new(catalog.clone());

        assert!(matches!(
            processor.process(&request(vec![])).await.unwrap_err(),
            SaleError::EmptyRequest
        ));

        let err = processor
            .process(&request(vec![line(&id, 0, 100)]))
            .await
            .unwrap_err();
        assert!(matches!(err, SaleError::InvalidQuantity { quantity: 0, .. }));
        // Validation failures commit nothing
        assert_eq!(catalog.get(&id).await.unwrap().unwrap().quantity, 10);
    }

    #[tokio::test]
    async fn test_default_mode_is_atomic_for_memory_store() {
        let processor = SaleProcessor::new(MemoryCatalog::new());
        assert_eq!(processor.mode(), CommitMode::Atomic);
    }
}
