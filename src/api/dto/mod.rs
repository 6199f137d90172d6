//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Request bodies
//! default missing text fields to empty strings so that they surface as field
//! errors instead of deserialization failures.

pub mod health;
pub mod owner;
pub mod pagination;
pub mod pet;
pub mod vet;
pub mod visit;
