//! Handlers for vet listings.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::vet::{VetPageResponse, VetsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Every vet with specialties.
///
/// # Endpoint
///
/// `GET /vets`
pub async fn vet_list_handler(
    State(state): State<AppState>,
) -> Result<Json<VetsResponse>, AppError> {
    let vets = state.vet_service.all_vets().await?;
    Ok(Json(VetsResponse::from(&vets)))
}

/// One page of vets.
///
/// # Endpoint
///
/// `GET /vets/page?page={n}`
///
/// # Errors
///
/// Returns 400 if `page` is 0.
pub async fn vet_page_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<VetPageResponse>, AppError> {
    let page = state.vet_service.vet_page(params.page()).await?;
    Ok(Json(VetPageResponse::from(&page)))
}
