//! Application layer services implementing the clinic's use cases.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::owner_service::OwnerService`] - Owner registration, editing and search
//! - [`services::pet_service::PetService`] - Pet registration and editing
//! - [`services::visit_service::VisitService`] - Visit booking
//! - [`services::vet_service::VetService`] - Vet listing

pub mod services;
