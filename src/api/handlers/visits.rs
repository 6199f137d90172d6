//! Handler for booking visits.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::owner::OwnerItem;
use crate::api::dto::visit::VisitRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Books a visit for a pet and returns the updated owner.
///
/// # Endpoint
///
/// `POST /owners/{id}/pets/{pet_id}/visits`
///
/// # Errors
///
/// Returns 400 if the description is blank.
/// Returns 404 if the owner or the pet does not exist.
pub async fn create_visit_handler(
    Path((owner_id, pet_id)): Path<(i64, i64)>,
    State(state): State<AppState>,
    Json(payload): Json<VisitRequest>,
) -> Result<(StatusCode, Json<OwnerItem>), AppError> {
    let owner = state
        .visit_service
        .add_visit(owner_id, pet_id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(OwnerItem::from(&owner))))
}
