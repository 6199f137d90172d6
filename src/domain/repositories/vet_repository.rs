//! Repository trait for veterinarians.

use crate::domain::entities::Vet;
use crate::domain::pagination::{Page, PageRequest};
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only access to vets and their specialties.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VetRepository: Send + Sync {
    /// Every vet, ordered by last name then first name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_all(&self) -> Result<Vec<Vet>, AppError>;

    /// One page of vets, same order as [`VetRepository::find_all`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_page(&self, page: PageRequest) -> Result<Page<Vet>, AppError>;
}
