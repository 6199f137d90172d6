//! Handlers for owner endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use crate::api::dto::owner::{OwnerItem, OwnerListResponse, OwnerRequest};
use crate::api::dto::pagination::{OwnerSearchParams, PaginationMeta};
use crate::domain::search::SearchOutcome;
use crate::error::AppError;
use crate::state::AppState;

/// Searches owners by last-name prefix.
///
/// # Endpoint
///
/// `GET /owners?last_name={prefix}&page={n}`
///
/// # Responses
///
/// - **303 See Other**: exactly one owner matched; `Location: /owners/{id}`
/// - **200 OK**: several owners matched; one page of them with pagination meta
/// - **404 Not Found**: nothing matched; `details.fields` carries a
///   `last_name`/`notFound` error
///
/// # Errors
///
/// Returns 400 if `page` is 0.
pub async fn search_owners_handler(
    State(state): State<AppState>,
    Query(params): Query<OwnerSearchParams>,
) -> Result<Response, AppError> {
    let outcome = state
        .owner_service
        .search(params.last_name.as_deref(), params.page())
        .await?;

    match outcome {
        SearchOutcome::Resolved(id) => Ok(Redirect::to(&format!("/owners/{id}")).into_response()),
        SearchOutcome::Listed(page) => Ok(Json(OwnerListResponse {
            pagination: PaginationMeta::from(&page),
            items: page.items.iter().map(OwnerItem::from).collect(),
        })
        .into_response()),
        SearchOutcome::NotFound(errors) => Err(AppError::not_found(
            "No owners found",
            json!({ "fields": errors }),
        )),
    }
}

/// Registers a new owner.
///
/// # Endpoint
///
/// `POST /owners`
///
/// # Errors
///
/// Returns 400 with field errors if the owner is invalid.
pub async fn create_owner_handler(
    State(state): State<AppState>,
    Json(payload): Json<OwnerRequest>,
) -> Result<Response, AppError> {
    let owner = state
        .owner_service
        .create_owner(payload.into_details())
        .await?;

    let location = owner
        .id()
        .map(|id| format!("/owners/{id}"))
        .unwrap_or_default();

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(OwnerItem::from(&owner)),
    )
        .into_response())
}

/// Shows one owner with pets and visits.
///
/// # Endpoint
///
/// `GET /owners/{id}`
///
/// # Errors
///
/// Returns 404 if the owner does not exist.
pub async fn get_owner_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<OwnerItem>, AppError> {
    let owner = state.owner_service.get_owner(id).await?;
    Ok(Json(OwnerItem::from(&owner)))
}

/// Edits an owner.
///
/// # Endpoint
///
/// `PUT /owners/{id}`
///
/// # Errors
///
/// Returns 400 if the body `id` differs from the path or a field is invalid.
/// Returns 404 if the owner does not exist.
pub async fn update_owner_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<OwnerRequest>,
) -> Result<Json<OwnerItem>, AppError> {
    let submitted_id = payload.id;
    let owner = state
        .owner_service
        .update_owner(id, submitted_id, payload.into_details())
        .await?;

    Ok(Json(OwnerItem::from(&owner)))
}

/// Deletes an owner with all pets and visits.
///
/// # Endpoint
///
/// `DELETE /owners/{id}`
///
/// # Errors
///
/// Returns 404 if the owner does not exist.
pub async fn delete_owner_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.owner_service.delete_owner(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
