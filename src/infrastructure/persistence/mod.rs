//! Repository implementations.
//!
//! Concrete implementations of domain repository traits. The PostgreSQL
//! repositories use SQLx with runtime-checked queries; the in-memory store
//! backs local runs and HTTP tests.
//!
//! # Repositories
//!
//! - [`PgOwnerRepository`] - Owner aggregate load/save/search
//! - [`PgPetTypeRepository`] - Pet type catalogue
//! - [`PgVetRepository`] - Vets and specialties
//! - [`InMemoryRepository`] - All of the above, kept in process memory

pub mod in_memory;
pub mod pg_owner_repository;
pub mod pg_pet_type_repository;
pub mod pg_vet_repository;

pub use in_memory::InMemoryRepository;
pub use pg_owner_repository::PgOwnerRepository;
pub use pg_pet_type_repository::PgPetTypeRepository;
pub use pg_vet_repository::PgVetRepository;
