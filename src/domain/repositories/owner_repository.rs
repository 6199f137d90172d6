//! Repository trait for the owner aggregate.

use crate::domain::entities::Owner;
use crate::domain::pagination::{Page, PageRequest};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for owners, their pets and visits.
///
/// The whole aggregate is loaded and saved as a unit.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgOwnerRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryRepository`] - Arena-backed store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Loads an owner with all pets and visits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Owner>, AppError>;

    /// Owners whose last name starts with `prefix` (case-sensitive), ordered
    /// by last name. An empty prefix matches every owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_last_name_prefix(
        &self,
        prefix: &str,
        page: PageRequest,
    ) -> Result<Page<Owner>, AppError>;

    /// Persists the aggregate and returns it with identifiers assigned.
    ///
    /// New owners, pets and visits get their identifiers here; existing
    /// records are updated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when saving an owner id that no longer exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn save(&self, owner: Owner) -> Result<Owner, AppError>;

    /// Deletes an owner together with its pets and visits.
    ///
    /// Returns `Ok(false)` if no such owner existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Counts all owners.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Loads every owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_all(&self) -> Result<Vec<Owner>, AppError>;
}
