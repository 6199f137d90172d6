//! Repository trait definitions for the domain layer.
//!
//! These traits are the persistence collaborator the core talks to. They are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`OwnerRepository`] - Owner aggregate load/save/search
//! - [`PetTypeRepository`] - Pet type catalogue
//! - [`VetRepository`] - Vets and specialties

pub mod owner_repository;
pub mod pet_type_repository;
pub mod vet_repository;

pub use owner_repository::OwnerRepository;
pub use pet_type_repository::PetTypeRepository;
pub use vet_repository::VetRepository;

#[cfg(test)]
pub use owner_repository::MockOwnerRepository;
#[cfg(test)]
pub use pet_type_repository::MockPetTypeRepository;
#[cfg(test)]
pub use vet_repository::MockVetRepository;
