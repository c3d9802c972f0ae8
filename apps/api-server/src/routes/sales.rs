//! # Sales Route
//!
//! Commits a cart snapshot as a sale.
//!
//! ## Request / Response
//! ```text
//! POST /sales
//! {
//!   "items": [
//!     { "medicineId": "…", "quantity": 2, "unitPricePaise": 1000 }
//!   ],
//!   "customerName": "Asha",          // optional, opaque
//!   "customerPhone": "98…"           // optional, opaque
//! }
//!
//! 200 → { "message": "Sale completed! 2 items sold for ₹20.00", … }
//! 404 → unknown medicine id
//! 409 → insufficient stock
//! 400 → empty cart / invalid quantity
//! ```
//!
//! The unit prices in the body are the ones the client captured when the
//! items went into its cart; the total is computed from them, not from
//! re-fetched prices.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use pharma_core::types::{Customer, SaleLine, SaleRequest};
use pharma_sales::{AppliedLine, SaleProcessor};

use crate::error::ApiError;
use crate::state::AppState;

/// One cart line in a sale request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemBody {
    pub medicine_id: String,
    pub quantity: i64,
    pub unit_price_paise: i64,
}

/// POST /sales request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleBody {
    pub items: Vec<SaleItemBody>,

    #[serde(default)]
    pub customer_name: Option<String>,

    #[serde(default)]
    pub customer_phone: Option<String>,
}

/// POST /sales response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub message: String,
    pub total_items: i64,
    pub total_amount_paise: i64,
    pub lines: Vec<AppliedLine>,
}

/// POST /sales
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<SaleBody>,
) -> Result<Json<SaleResponse>, ApiError> {
    debug!(items = body.items.len(), "create sale");

    let request = SaleRequest {
        lines: body
            .items
            .into_iter()
            .map(|i| SaleLine {
                medicine_id: i.medicine_id,
                quantity: i.quantity,
                unit_price_paise: i.unit_price_paise,
            })
            .collect(),
        customer: Customer {
            name: body.customer_name,
            phone: body.customer_phone,
        },
    };

    let processor = SaleProcessor::new(state.catalog());
    let summary = processor.process(&request).await?;

    let message = format!(
        "Sale completed! {} items sold for {}",
        summary.total_items,
        summary.total_amount()
    );

    Ok(Json(SaleResponse {
        message,
        total_items: summary.total_items,
        total_amount_paise: summary.total_amount_paise,
        lines: summary.lines,
    }))
}
