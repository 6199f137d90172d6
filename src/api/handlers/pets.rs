//! Handlers for pet endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::owner::OwnerItem;
use crate::api::dto::pet::{PetRequest, PetTypeItem};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the pet types a pet form may reference.
///
/// # Endpoint
///
/// `GET /pet-types`
pub async fn pet_types_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<PetTypeItem>>, AppError> {
    let types = state.pet_service.pet_types().await?;
    Ok(Json(types.into_iter().map(PetTypeItem::from).collect()))
}

/// Registers a pet for an owner and returns the updated owner.
///
/// # Endpoint
///
/// `POST /owners/{id}/pets`
///
/// # Errors
///
/// Returns 400 with every field error (missing type or birth date, unknown
/// type, duplicate name, future birth date).
/// Returns 404 if the owner does not exist.
pub async fn create_pet_handler(
    Path(owner_id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<PetRequest>,
) -> Result<(StatusCode, Json<OwnerItem>), AppError> {
    let owner = state
        .pet_service
        .create_pet(owner_id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(OwnerItem::from(&owner))))
}

/// Edits a pet and returns the updated owner.
///
/// # Endpoint
///
/// `PUT /owners/{id}/pets/{pet_id}`
///
/// # Errors
///
/// Returns 400 with every field error.
/// Returns 404 if the owner or the pet does not exist.
pub async fn update_pet_handler(
    Path((owner_id, pet_id)): Path<(i64, i64)>,
    State(state): State<AppState>,
    Json(payload): Json<PetRequest>,
) -> Result<Json<OwnerItem>, AppError> {
    let owner = state
        .pet_service
        .update_pet(owner_id, pet_id, payload.into())
        .await?;

    Ok(Json(OwnerItem::from(&owner)))
}
