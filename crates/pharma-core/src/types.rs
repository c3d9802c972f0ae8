//! # Domain Types
//!
//! Core domain types used throughout PharmaPOS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Medicine     │   │ MedicineFields  │   │   SaleRequest   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  name           │   │  lines          │       │
//! │  │  name, brand    │   │  brand/category │   │  customer       │       │
//! │  │  quantity       │   │  quantity       │   └─────────────────┘       │
//! │  │  expiry_date    │   │  expiry_date    │                             │
//! │  │  price_paise    │   │  price_paise    │   ┌─────────────────┐       │
//! │  └─────────────────┘   └─────────────────┘   │    SaleLine     │       │
//! │                                              │  ─────────────  │       │
//! │  Medicine = store-owned record               │  medicine_id    │       │
//! │  MedicineFields = caller-supplied fields     │  quantity       │       │
//! │    for create/replace (no id, no timestamps) │  unit_price     │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Medicine
// =============================================================================

/// A medicine record in the catalog.
///
/// Identity and persisted quantity are exclusively owned by the catalog
/// store; everything else in the system holds transient snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    /// Unique identifier (UUID v4), assigned by the store on creation.
    pub id: String,

    /// Display name. Required, non-empty.
    pub name: String,

    /// Manufacturer or brand name.
    pub brand: Option<String>,

    /// Free-text category. See [`crate::SUGGESTED_CATEGORIES`].
    pub category: Option<String>,

    /// Units in stock. Invariant: never negative after any operation.
    pub quantity: i64,

    /// Expiry date, if known.
    pub expiry_date: Option<NaiveDate>,

    /// Unit price in paise (smallest currency unit).
    pub price_paise: i64,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Medicine {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }

    /// Value of this record's stock (quantity × unit price).
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.price().multiply_quantity(self.quantity)
    }

    /// Whether any units are available for sale.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

// =============================================================================
// Medicine Fields
// =============================================================================

/// Caller-supplied field set for create and update operations.
///
/// ## Replace Semantics
/// `update` replaces the full record with these fields: anything not
/// supplied is cleared, not preserved. Callers performing partial edits
/// (the sale processor included) must pass the unchanged fields through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineFields {
    /// Display name. Required.
    pub name: String,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    /// Units in stock. Missing quantity is treated as 0.
    #[serde(default)]
    pub quantity: i64,

    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,

    /// Unit price in paise. Missing price is treated as 0.
    #[serde(default)]
    pub price_paise: i64,
}

impl From<&Medicine> for MedicineFields {
    /// Snapshot of a record's mutable fields, for pass-through replaces.
    fn from(medicine: &Medicine) -> Self {
        MedicineFields {
            name: medicine.name.clone(),
            brand: medicine.brand.clone(),
            category: medicine.category.clone(),
            quantity: medicine.quantity,
            expiry_date: medicine.expiry_date,
            price_paise: medicine.price_paise,
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// Optional customer metadata attached to a sale.
///
/// Opaque pass-through: neither field is validated anywhere in the core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: Option<String>,
    pub phone: Option<String>,
}

// =============================================================================
// Sale Request
// =============================================================================

/// One line of a sale request.
///
/// The unit price is the price captured when the medicine was added to the
/// cart, not a re-fetched price. Sale totals are computed from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    /// Medicine being sold.
    pub medicine_id: String,

    /// Units requested.
    pub quantity: i64,

    /// Unit price in paise, frozen at cart-add time.
    pub unit_price_paise: i64,
}

impl SaleLine {
    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

/// Input to the sale transaction processor.
///
/// Line order matters: lines are committed in request order, so the order
/// determines where a best-effort sale stops on failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    pub lines: Vec<SaleLine>,

    #[serde(default)]
    pub customer: Customer,
}

impl SaleRequest {
    /// Sum of requested quantities across all lines.
    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of price × quantity across all lines, using frozen prices.
    pub fn total_amount(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn medicine(quantity: i64, price_paise: i64) -> Medicine {
        Medicine {
            id: "med-1".to_string(),
            name: "Paracetamol 500mg".to_string(),
            brand: Some("Calpol".to_string()),
            category: Some("Pain Relief".to_string()),
            quantity,
            expiry_date: None,
            price_paise,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_stock_value() {
        let med = medicine(4, 250);
        assert_eq!(med.stock_value().paise(), 1000);
        assert!(med.in_stock());

        let empty = medicine(0, 250);
        assert!(!empty.in_stock());
        assert!(empty.stock_value().is_zero());
    }

    #[test]
    fn test_fields_snapshot_round_trip() {
        let med = medicine(4, 250);
        let fields = MedicineFields::from(&med);
        assert_eq!(fields.name, med.name);
        assert_eq!(fields.brand, med.brand);
        assert_eq!(fields.quantity, 4);
        assert_eq!(fields.price_paise, 250);
    }

    #[test]
    fn test_sale_request_totals() {
        let request = SaleRequest {
            lines: vec![
                SaleLine {
                    medicine_id: "a".to_string(),
                    quantity: 2,
                    unit_price_paise: 1000,
                },
                SaleLine {
                    medicine_id: "b".to_string(),
                    quantity: 3,
                    unit_price_paise: 500,
                },
            ],
            customer: Customer::default(),
        };

        assert_eq!(request.total_items(), 5);
        assert_eq!(request.total_amount().paise(), 3500);
    }

    #[test]
    fn test_medicine_serializes_camel_case() {
        let med = medicine(4, 250);
        let json = serde_json::to_value(&med).unwrap();
        assert!(json.get("expiryDate").is_some());
        assert!(json.get("pricePaise").is_some());
        assert!(json.get("expiry_date").is_none());
    }
}
