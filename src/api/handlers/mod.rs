//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod owners;
pub mod pets;
pub mod vets;
pub mod visits;

pub use health::health_handler;
pub use owners::{
    create_owner_handler, delete_owner_handler, get_owner_handler, search_owners_handler,
    update_owner_handler,
};
pub use pets::{create_pet_handler, pet_types_handler, update_pet_handler};
pub use vets::{vet_list_handler, vet_page_handler};
pub use visits::create_visit_handler;
