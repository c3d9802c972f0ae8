//! # Dashboard Route
//!
//! Derived metrics over a catalog snapshot: totals, low-stock alerts,
//! expiring-soon alerts and inventory valuation. The metrics themselves are
//! pure functions in pharma-core; this handler only supplies the snapshot
//! and today's date.

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use pharma_core::metrics::{dashboard_summary, DashboardSummary};
use pharma_store::CatalogStore;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /dashboard
pub async fn summary(State(state): State<AppState>) -> Result<Json<DashboardSummary>, ApiError> {
    let snapshot = state.catalog().list().await?;
    let today = Utc::now().date_naive();

    Ok(Json(dashboard_summary(&snapshot, today)))
}
