//! # pharma-core: Pure Business Logic for PharmaPOS
//!
//! This crate is the **heart** of PharmaPOS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PharmaPOS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    REST Clients                                 │   │
//! │  │    Inventory UI ──► Dashboard ──► Sale/Cart UI                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP (axum)                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/api-server                              │   │
//! │  │    /medicines, /dashboard, /sales                               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pharma-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  metrics  │  │   │
//! │  │   │ Medicine  │  │   Money   │  │   Cart    │  │ low stock │  │   │
//! │  │   │ SaleReq   │  │  (paise)  │  │ CartLine  │  │  expiry   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  pharma-store (Catalog Store)                   │   │
//! │  │              SQLite queries, migrations, in-memory impl         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Medicine, SaleRequest, Customer, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`cart`] - Cart aggregation (merge, stock pre-checks, totals)
//! - [`metrics`] - Dashboard metrics (low stock, expiry buckets, valuation)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Explicit Clock**: Expiry math takes `today` as a parameter - no hidden `now()`

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod metrics;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pharma_core::Money` instead of
// `use pharma_core::money::Money`

pub use cart::{Cart, CartLine};
pub use error::{CartError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level below which a medicine counts as "low stock".
///
/// The dashboard flags any record with `quantity < LOW_STOCK_THRESHOLD`.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Horizon (in days) for the dashboard's "expiring soon" bucket.
///
/// A record with `expiry_date <= today + EXPIRY_HORIZON_DAYS` is flagged.
/// The comparison is inclusive and does NOT exclude already-expired items;
/// the inventory table separates those out with [`metrics::expiry_status`].
pub const EXPIRY_HORIZON_DAYS: i64 = 30;

/// Number of records shown in each dashboard preview list (low stock,
/// expiring soon). Counting always uses the full set.
pub const DASHBOARD_PREVIEW_LEN: usize = 5;

/// Suggested medicine categories, as offered by the entry form.
///
/// This is a suggestion list, not a closed set - `Medicine::category` accepts
/// any free text.
pub const SUGGESTED_CATEGORIES: [&str; 10] = [
    "Antibiotics",
    "Pain Relief",
    "Vitamins",
    "Cold & Flu",
    "Digestive Health",
    "Heart & Blood Pressure",
    "Diabetes",
    "Skin Care",
    "Eye Care",
    "Other",
];
