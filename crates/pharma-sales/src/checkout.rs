//! # Checkout Session
//!
//! Wires the pure [`Cart`] to a live catalog store: every cart mutation
//! re-validates against a fresh read of the target medicine, and checkout
//! hands the snapshot to the [`SaleProcessor`].
//!
//! ## Clear-On-Success Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Lifecycle                                 │
//! │                                                                         │
//! │  checkout()                                                             │
//! │      │                                                                  │
//! │      ├── cart empty? ──► EmptyCart, cart untouched                     │
//! │      │                                                                  │
//! │      ├── SaleProcessor.process(snapshot)                               │
//! │      │        │                                                         │
//! │      │        ├── Ok(summary) ──► cart.clear() ──► return summary      │
//! │      │        │                                                         │
//! │      │        └── Err(e) ──► cart KEPT as-is ──► return error          │
//! │      │                                                                  │
//! │  Clearing before confirmation would lose the user's in-progress        │
//! │  state on failure, so the cart clears only on confirmed success.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use tracing::debug;

use pharma_core::cart::Cart;
use pharma_core::error::CartError;
use pharma_core::types::{Customer, Medicine};
use pharma_store::{CatalogStore, StoreError};

use crate::processor::{CommitMode, SaleError, SaleProcessor, SaleSummary};

// =============================================================================
// Errors
// =============================================================================

/// Checkout session failures.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The requested medicine does not exist in the catalog.
    #[error("Medicine not found: {medicine_id}")]
    MedicineNotFound { medicine_id: String },

    /// A cart pre-check rejected the mutation (cart unchanged).
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The sale processor rejected the checkout (cart retained).
    #[error(transparent)]
    Sale(#[from] SaleError),

    /// The store failed while reading live stock.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// =============================================================================
// Checkout Session
// =============================================================================

/// A single user's in-progress sale: one cart bound to a catalog store.
///
/// No concurrent mutation of the same session is expected; the shared
/// resource is the store behind it, which serializes stock decrements on
/// its own.
#[derive(Debug)]
pub struct CheckoutSession<S> {
    store: S,
    processor: SaleProcessor<S>,
    cart: Cart,
}

impl<S: CatalogStore + Clone> CheckoutSession<S> {
    /// Creates a session over an injected store handle.
    pub fn new(store: S) -> Self {
        CheckoutSession {
            processor: SaleProcessor::new(store.clone()),
            store,
            cart: Cart::new(),
        }
    }

    /// Creates a session whose processor uses an explicit commit mode.
    pub fn with_mode(store: S, mode: CommitMode) -> Self {
        CheckoutSession {
            processor: SaleProcessor::with_mode(store.clone(), mode),
            store,
            cart: Cart::new(),
        }
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Adds a medicine to the cart, validating against live stock.
    ///
    /// Fetches the current record so the merge check (`existing + quantity
    /// ≤ stock`) and the price snapshot both use the latest store state.
    pub async fn add_to_cart(
        &mut self,
        medicine_id: &str,
        quantity: i64,
    ) -> Result<(), CheckoutError> {
        let medicine = self.fetch(medicine_id).await?;
        self.cart.add(&medicine, quantity)?;

        debug!(medicine_id = %medicine_id, quantity = %quantity, "Added to cart");
        Ok(())
    }

    /// Replaces a line's quantity, validating against live stock.
    ///
    /// A quantity ≤ 0 removes the line without a store read.
    pub async fn set_quantity(
        &mut self,
        medicine_id: &str,
        quantity: i64,
    ) -> Result<(), CheckoutError> {
        if quantity <= 0 {
            self.cart.remove(medicine_id);
            return Ok(());
        }

        let medicine = self.fetch(medicine_id).await?;
        self.cart.set_quantity(&medicine, quantity)?;
        Ok(())
    }

    /// Removes a line from the cart. No-op if absent.
    pub fn remove_from_cart(&mut self, medicine_id: &str) {
        self.cart.remove(medicine_id);
    }

    /// Commits the cart as a sale.
    ///
    /// The cart is cleared only after the processor reports success; any
    /// failure keeps the in-progress cart intact for the user to fix.
    pub async fn checkout(&mut self, customer: Customer) -> Result<SaleSummary, CheckoutError> {
        let request = self.cart.to_sale_request(customer)?;
        let summary = self.processor.process(&request).await?;

        self.cart.clear();
        Ok(summary)
    }

    async fn fetch(&self, medicine_id: &str) -> Result<Medicine, CheckoutError> {
        self.store
            .get(medicine_id)
            .await?
            .ok_or_else(|| CheckoutError::MedicineNotFound {
                medicine_id: medicine_id.to_string(),
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pharma_core::types::MedicineFields;
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

    #[tokio::test]
    async fn test_add_validates_against_live_stock() {
        let catalog = MemoryCatalog::new();
        let id = seed(&catalog, "Paracetamol", 5, 250).await;
        let mut session = CheckoutSession::new(catalog.clone());

        session.add_to_cart(&id, 3).await.unwrap();
        assert_eq!(session.cart().total_items(), 3);

        // Merge would exceed stock (3 + 3 > 5)
        let err = session.add_to_cart(&id, 3).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Cart(CartError::StockExceeded { .. })));
        assert_eq!(session.cart().total_items(), 3);

        let err = session.add_to_cart("ghost", 1).await.unwrap_err();
        assert!(matches!(err, CheckoutError::MedicineNotFound { .. }));
    }

    #[tokio::test]
    async fn test_set_quantity_and_remove() {
        let catalog = MemoryCatalog::new();
        let id = seed(&catalog, "Paracetamol", 5, 250).await;
        let mut session = CheckoutSession::new(catalog.clone());

        session.add_to_cart(&id, 2).await.unwrap();
        session.set_quantity(&id, 5).await.unwrap();
        assert_eq!(session.cart().total_items(), 5);

        assert!(matches!(
            session.set_quantity(&id, 6).await.unwrap_err(),
            CheckoutError::Cart(CartError::StockExceeded { .. })
        ));

        // Zero removes without needing the record to exist
        session.set_quantity(&id, 0).await.unwrap();
        assert!(session.cart().is_empty());

        session.add_to_cart(&id, 1).await.unwrap();
        session.remove_from_cart(&id);
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_clears_cart_only_on_success() {
        let catalog = MemoryCatalog::new();
        let id = seed(&catalog, "Paracetamol", 5, 1000).await;
        let mut session = CheckoutSession::new(catalog.clone());

        session.add_to_cart(&id, 5).await.unwrap();

        // Another terminal drains the stock between add and checkout
        catalog.decrement_if_sufficient(&id, 3).await.unwrap();

        let err = session.checkout(Customer::default()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Sale(SaleError::InsufficientStock { .. })));
        // Failure keeps the in-progress cart
        assert_eq!(session.cart().total_items(), 5);

        // Fix the quantity and complete the sale
        session.set_quantity(&id, 2).await.unwrap();
        let summary = session.checkout(Customer::default()).await.unwrap();
        assert_eq!(summary.total_items, 2);
        assert_eq!(summary.total_amount_paise, 2000);
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_empty_cart() {
        let catalog = MemoryCatalog::new();
        let mut session = CheckoutSession::new(catalog);

        let err = session.checkout(Customer::default()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Cart(CartError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_end_to_end_checkout_scenario() {
        // Catalog has {quantity: 5, price: ₹10.00}. Selling 5 yields ₹50.00
        // and leaves 0; a follow-up sale of 1 fails and stock stays 0.
        let catalog = MemoryCatalog::new();
        let id = seed(&catalog, "Paracetamol", 5, 1000).await;
        let mut session = CheckoutSession::new(catalog.clone());

        session.add_to_cart(&id, 5).await.unwrap();
        let summary = session.checkout(Customer::default()).await.unwrap();
        assert_eq!(summary.total_amount_paise, 5000);
        assert_eq!(catalog.get(&id).await.unwrap().unwrap().quantity, 0);

        let err = session.add_to_cart(&id, 1).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Cart(CartError::StockExceeded { .. })));
        assert_eq!(catalog.get(&id).await.unwrap().unwrap().quantity, 0);
    }
}
