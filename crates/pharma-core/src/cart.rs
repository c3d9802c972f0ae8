//! # Cart Aggregation
//!
//! Client-side accumulation of sale line items before checkout.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Caller Action              Cart Change            Pre-check           │
//! │  ─────────────              ───────────            ─────────           │
//! │                                                                         │
//! │  Select medicine ─────────► add(&med, qty) ──────► merged ≤ stock      │
//! │                                                                         │
//! │  Change quantity ─────────► set_quantity(..) ────► new qty ≤ stock     │
//! │                                                                         │
//! │  Click remove ────────────► remove(id) ──────────► (none)              │
//! │                                                                         │
//! │  Checkout ────────────────► to_sale_request() ───► non-empty           │
//! │                                                                         │
//! │  Every failed pre-check leaves the cart EXACTLY as it was.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is pure state: stock checks are made against the `Medicine`
//! snapshot the caller passes in, which should be freshly read from the
//! catalog store (see `pharma-sales::CheckoutSession`). The cart itself
//! never talks to a store and never mutates stock.

use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::money::Money;
use crate::types::{Customer, Medicine, SaleLine, SaleRequest};

// =============================================================================
// Cart Line
// =============================================================================

/// A line item in the cart.
///
/// Carries a denormalized snapshot of name/brand/price from the moment the
/// medicine was added. The snapshot keeps the cart display (and the sale
/// total) stable even if the record changes in the store afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Medicine ID (store-owned identity).
    pub medicine_id: String,

    /// Name at time of adding (frozen).
    pub name: String,

    /// Brand at time of adding (frozen).
    pub brand: Option<String>,

    /// Unit price in paise at time of adding (frozen).
    pub unit_price_paise: i64,

    /// Running requested quantity.
    pub quantity: i64,
}

impl CartLine {
    fn from_medicine(medicine: &Medicine, quantity: i64) -> Self {
        CartLine {
            medicine_id: medicine.id.clone(),
            name: medicine.name.clone(),
            brand: medicine.brand.clone(),
            unit_price_paise: medicine.price_paise,
            quantity,
        }
    }

    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// Line total (frozen unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `medicine_id` (adding the same medicine merges)
/// - Every line quantity is ≥ 1 and was ≤ the medicine's stock at the time
///   the mutation was validated
/// - Totals are derived on demand, never stored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// The current line items, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total requested quantity across all lines.
    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Cart total: Σ frozen unit price × quantity.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Adds a medicine to the cart, merging with an existing line.
    ///
    /// ## Behavior
    /// - `quantity` must be ≥ 1
    /// - If the medicine is already in the cart, quantities merge; the
    ///   merged quantity must not exceed `medicine.quantity` (current stock)
    /// - On any failure the cart is unchanged
    pub fn add(&mut self, medicine: &Medicine, quantity: i64) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity {
                requested: quantity,
            });
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.medicine_id == medicine.id)
        {
            let merged = line.quantity + quantity;
            if merged > medicine.quantity {
                return Err(CartError::StockExceeded {
                    medicine_id: medicine.id.clone(),
                    available: medicine.quantity,
                    requested: merged,
                });
            }
            line.quantity = merged;
            return Ok(());
        }

        if quantity > medicine.quantity {
            return Err(CartError::StockExceeded {
                medicine_id: medicine.id.clone(),
                available: medicine.quantity,
                requested: quantity,
            });
        }

        self.lines.push(CartLine::from_medicine(medicine, quantity));
        Ok(())
    }

    /// Removes a line item. No-op if the medicine is not in the cart.
    pub fn remove(&mut self, medicine_id: &str) {
        self.lines.retain(|l| l.medicine_id != medicine_id);
    }

    /// Replaces the quantity of an existing line.
    ///
    /// ## Behavior
    /// - `new_quantity` ≤ 0 is equivalent to `remove`
    /// - Otherwise the new quantity must not exceed current stock
    /// - No-op when the medicine is not in the cart
    pub fn set_quantity(
        &mut self,
        medicine: &Medicine,
        new_quantity: i64,
    ) -> Result<(), CartError> {
        if new_quantity <= 0 {
            self.remove(&medicine.id);
            return Ok(());
        }

        if new_quantity > medicine.quantity {
            return Err(CartError::StockExceeded {
                medicine_id: medicine.id.clone(),
                available: medicine.quantity,
                requested: new_quantity,
            });
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.medicine_id == medicine.id)
        {
            line.quantity = new_quantity;
        }

        Ok(())
    }

    /// Snapshots the cart into a [`SaleRequest`] for the sale processor.
    ///
    /// Fails with [`CartError::EmptyCart`] when there are no lines. The cart
    /// itself is NOT cleared here: callers must clear only after the
    /// processor confirms success, so a failed sale keeps the in-progress
    /// cart intact.
    pub fn to_sale_request(&self, customer: Customer) -> Result<SaleRequest, CartError> {
        if self.lines.is_empty() {
            return Err(CartError::EmptyCart);
        }

        Ok(SaleRequest {
            lines: self
                .lines
                .iter()
                .map(|l| SaleLine {
                    medicine_id: l.medicine_id.clone(),
                    quantity: l.quantity,
                    unit_price_paise: l.unit_price_paise,
                })
                .collect(),
            customer,
        })
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
