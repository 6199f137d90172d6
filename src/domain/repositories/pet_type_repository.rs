//! Repository trait for pet type lookups.

use crate::domain::entities::PetType;
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only access to the pet type catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetTypeRepository: Send + Sync {
    /// All pet types ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_pet_types(&self) -> Result<Vec<PetType>, AppError>;
}
