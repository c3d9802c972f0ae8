//! # Route Modules
//!
//! One module per resource, mirroring the surface the catalog store exposes:
//!
//! | Route                | Module        |
//! |----------------------|---------------|
//! | `/medicines`         | [`medicines`] |
//! | `/dashboard`         | [`dashboard`] |
//! | `/sales`             | [`sales`]     |

pub mod dashboard;
pub mod medicines;
pub mod sales;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/medicines",
            get(medicines::list).post(medicines::create),
        )
        .route(
            "/medicines/{id}",
            get(medicines::get_one)
                .put(medicines::update)
                .delete(medicines::delete),
        )
        .route("/dashboard", get(dashboard::summary))
        .route("/sales", post(sales::create))
        .with_state(state)
}
