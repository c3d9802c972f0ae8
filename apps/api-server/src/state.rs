//! # Application State
//!
//! Shared state injected into every handler: the database handle. Handlers
//! get a catalog store from it per request; the pool behind it is shared.

use pharma_store::{Database, SqliteCatalog};

/// Axum application state.
#[derive(Debug, Clone)]
pub struct AppState {
    db: Database,
}

impl AppState {
    /// Creates state over an initialized database.
    pub fn new(db: Database) -> Self {
        AppState { db }
    }

    /// Returns the SQLite-backed catalog store.
    pub fn catalog(&self) -> SqliteCatalog {
        self.db.catalog()
    }
}
