//! Domain layer containing the clinic's business entities and rules.
//!
//! # Architecture
//!
//! - [`entities`] - Owner aggregate (owners, pets, visits) and reference data
//! - [`identity`] - Unsaved/saved lifecycle state of entities
//! - [`validation`] - Validation engine producing field-scoped errors
//! - [`search`] - Resolution of owner searches into list / single / none
//! - [`pagination`] - Page requests and paged results
//! - [`clock`] - Injected source of "today"
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Aggregate mutations go through [`entities::Owner`] so invariants hold in one place

pub mod clock;
pub mod entities;
pub mod error;
pub mod identity;
pub mod pagination;
pub mod repositories;
pub mod search;
pub mod validation;
