//! Read-only access to the clinic's vets.

use std::sync::Arc;

use crate::domain::entities::{Vet, Vets};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repositories::VetRepository;
use crate::error::AppError;
use serde_json::json;

pub struct VetService<R: VetRepository + ?Sized> {
    repository: Arc<R>,
    page_size: u32,
}

impl<R: VetRepository + ?Sized> VetService<R> {
    pub fn new(repository: Arc<R>, page_size: u32) -> Self {
        Self {
            repository,
            page_size,
        }
    }

    /// Every vet, wrapped for serialization as `{"vet_list": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn all_vets(&self) -> Result<Vets, AppError> {
        let vet_list = self.repository.find_all().await?;
        Ok(Vets { vet_list })
    }

    /// One 1-based page of vets.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `page` is 0.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn vet_page(&self, page: u32) -> Result<Page<Vet>, AppError> {
        if page == 0 {
            return Err(AppError::bad_request(
                "Page must be greater than 0",
                json!({ "page": page }),
            ));
        }
        self.repository
            .find_page(PageRequest::new(page, self.page_size))
            .await
    }
}
