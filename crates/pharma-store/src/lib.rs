//! # pharma-store: Catalog Store for PharmaPOS
//!
//! This crate provides catalog persistence for the PharmaPOS system.
//! It defines the `CatalogStore` contract and ships two implementations:
//! SQLite (via sqlx) for production and an in-memory store for tests.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PharmaPOS Data Flow                              │
//! │                                                                         │
//! │  API handler / SaleProcessor / CheckoutSession                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   pharma-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ CatalogStore  │    │ SqliteCatalog │    │  Migrations  │  │   │
//! │  │   │ (catalog.rs)  │    │ (sqlite.rs)   │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ list/get/     │◄───│ sqlx queries  │    │ 001_init.sql │  │   │
//! │  │   │ create/update │    ├───────────────┤    └──────────────┘  │   │
//! │  │   │ delete/       │◄───│ MemoryCatalog │                      │   │
//! │  │   │ decrement     │    │ (memory.rs)   │                      │   │
//! │  │   └───────────────┘    └───────────────┘                      │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (or RwLock<Vec<Medicine>> in memory)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`catalog`] - The `CatalogStore` trait and decrement types
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//! - [`sqlite`] - SQLite-backed implementation
//! - [`memory`] - In-memory implementation (tests, generic store stand-in)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pharma_store::{CatalogStore, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/pharma.db")).await?;
//! let catalog = db.catalog();
//!
//! let medicines = catalog.list().await?;
//! let remaining = catalog.decrement_if_sufficient(&id, 3).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod sqlite;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{CatalogStore, StockDecrement};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryCatalog;
pub use pool::{Database, DbConfig};
pub use sqlite::SqliteCatalog;
