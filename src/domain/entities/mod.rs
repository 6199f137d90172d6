//! Core domain entities of the clinic.
//!
//! # Entity Types
//!
//! - [`Owner`] - Aggregate root owning its [`Pet`]s
//! - [`Pet`] - A pet and its [`Visit`] history
//! - [`PetType`] - Shared lookup data referenced by pets
//! - [`Vet`] / [`Specialty`] - Clinic staff reference data
//!
//! # Design Pattern
//!
//! Entities carry an explicit [`crate::domain::identity::Identity`] instead of a
//! nullable id. Form input arrives as separate detail structs:
//! - `OwnerDetails`, `PetDetails`, `VisitDetails` - For creating or editing records

pub mod owner;
pub mod pet;
pub mod pet_type;
pub mod vet;
pub mod visit;

pub use owner::{Owner, OwnerDetails};
pub use pet::{Pet, PetDetails};
pub use pet_type::PetType;
pub use vet::{Specialty, Vet, Vets};
pub use visit::{Visit, VisitDetails};
