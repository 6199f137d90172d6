//! API route configuration.

use crate::api::handlers::{
    create_owner_handler, create_pet_handler, create_visit_handler, delete_owner_handler,
    get_owner_handler, pet_types_handler, search_owners_handler, update_owner_handler,
    update_pet_handler, vet_list_handler, vet_page_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// All clinic routes.
///
/// # Endpoints
///
/// - `GET    /owners`                              - Search owners by last-name prefix
/// - `POST   /owners`                              - Register an owner
/// - `GET    /owners/{id}`                         - Show an owner with pets and visits
/// - `PUT    /owners/{id}`                         - Edit an owner
/// - `DELETE /owners/{id}`                         - Delete an owner
/// - `POST   /owners/{id}/pets`                    - Register a pet
/// - `PUT    /owners/{id}/pets/{pet_id}`           - Edit a pet
/// - `POST   /owners/{id}/pets/{pet_id}/visits`    - Book a visit
/// - `GET    /pet-types`                           - List pet types
/// - `GET    /vets`                                - List all vets
/// - `GET    /vets/page`                           - List vets page by page
pub fn clinic_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/owners",
            get(search_owners_handler).post(create_owner_handler),
        )
        .route(
            "/owners/{id}",
            get(get_owner_handler)
                .put(update_owner_handler)
                .delete(delete_owner_handler),
        )
        .route("/owners/{id}/pets", post(create_pet_handler))
        .route("/owners/{id}/pets/{pet_id}", put(update_pet_handler))
        .route(
            "/owners/{id}/pets/{pet_id}/visits",
            post(create_visit_handler),
        )
        .route("/pet-types", get(pet_types_handler))
        .route("/vets", get(vet_list_handler))
        .route("/vets/page", get(vet_page_handler))
}
