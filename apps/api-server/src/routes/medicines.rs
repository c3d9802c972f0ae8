//! # Medicine Routes
//!
//! The catalog resource surface:
//!
//! | Method   | Path              | Response                                |
//! |----------|-------------------|-----------------------------------------|
//! | `GET`    | `/medicines`      | 200 list of records                     |
//! | `GET`    | `/medicines/{id}` | 200 record, 404 `{message}`             |
//! | `POST`   | `/medicines`      | 201 created record, 400 `{message}`     |
//! | `PUT`    | `/medicines/{id}` | 200 replaced record, 404/400 `{message}`|
//! | `DELETE` | `/medicines/{id}` | 200 `{message}`, 404 `{message}`        |
//!
//! No pagination, no filtering: consumers sort and search over the full
//! list themselves.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use pharma_core::types::{Medicine, MedicineFields};
use pharma_store::CatalogStore;

use crate::error::ApiError;
use crate::state::AppState;

/// `{message}` body for DELETE confirmations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /medicines
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Medicine>>, ApiError> {
    let medicines = state.catalog().list().await?;
    Ok(Json(medicines))
}

/// GET /medicines/{id}
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Medicine>, ApiError> {
    let medicine = state
        .catalog()
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Medicine not found"))?;

    Ok(Json(medicine))
}

/// POST /medicines
pub async fn create(
    State(state): State<AppState>,
    Json(fields): Json<MedicineFields>,
) -> Result<(StatusCode, Json<Medicine>), ApiError> {
    debug!(name = %fields.name, "create medicine");

    let medicine = state.catalog().create(fields).await?;
    Ok((StatusCode::CREATED, Json(medicine)))
}

/// PUT /medicines/{id}
///
/// Full-replace semantics: fields omitted from the body are cleared.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<MedicineFields>,
) -> Result<Json<Medicine>, ApiError> {
    debug!(id = %id, "update medicine");

    let medicine = state.catalog().update(&id, fields).await?;
    Ok(Json(medicine))
}

/// DELETE /medicines/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(id = %id, "delete medicine");

    state.catalog().delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Medicine deleted successfully".to_string(),
    }))
}
