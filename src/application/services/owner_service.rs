//! Owner management and owner search.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{Owner, OwnerDetails};
use crate::domain::pagination::PageRequest;
use crate::domain::repositories::OwnerRepository;
use crate::domain::search::{self, SearchOutcome};
use crate::domain::validation::{FieldErrors, OwnerValidator, Validator};
use crate::error::AppError;

/// Service for creating, editing, deleting and searching owners.
///
/// Owner input is checked by a pluggable [`Validator`] (by default
/// [`OwnerValidator`]) before anything is persisted.
pub struct OwnerService<R: OwnerRepository + ?Sized> {
    repository: Arc<R>,
    validator: Arc<dyn Validator<OwnerDetails>>,
    page_size: u32,
}

impl<R: OwnerRepository + ?Sized> OwnerService<R> {
    /// Creates a new owner service listing `page_size` owners per page.
    pub fn new(repository: Arc<R>, page_size: u32) -> Self {
        Self {
            repository,
            validator: Arc::new(OwnerValidator),
            page_size,
        }
    }

    /// Replaces the owner validator.
    pub fn with_validator(mut self, validator: Arc<dyn Validator<OwnerDetails>>) -> Self {
        self.validator = validator;
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Loads an owner with pets and visits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_owner(&self, id: i64) -> Result<Owner, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::entity_not_found("Owner", id))
    }

    /// Validates and stores a new owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with every field error found.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create_owner(&self, details: OwnerDetails) -> Result<Owner, AppError> {
        let errors = self.validator.validate(&details);
        if !errors.is_empty() {
            warn!(fields = ?errors.codes(), "Rejected new owner");
            return Err(AppError::invalid_fields(errors));
        }

        let saved = self.repository.save(Owner::new(details)).await?;
        info!(owner_id = ?saved.id(), "Owner created");
        Ok(saved)
    }

    /// Validates and applies an edit of owner `id`.
    ///
    /// `submitted_id` is the identifier carried by the submitted form, if any;
    /// it must match `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on a mismatched id or invalid fields.
    /// Returns [`AppError::NotFound`] if the owner does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn update_owner(
        &self,
        id: i64,
        submitted_id: Option<i64>,
        details: OwnerDetails,
    ) -> Result<Owner, AppError> {
        let mut errors = FieldErrors::new();
        if submitted_id.is_some_and(|submitted| submitted != id) {
            errors.reject_with(
                "id",
                "mismatch",
                "The owner ID in the form does not match the URL.",
            );
        }
        errors.merge(self.validator.validate(&details));

        if !errors.is_empty() {
            warn!(owner_id = id, fields = ?errors.codes(), "Rejected owner update");
            return Err(AppError::invalid_fields(errors));
        }

        let mut owner = self.get_owner(id).await?;
        owner.apply_details(details);

        let saved = self.repository.save(owner).await?;
        info!(owner_id = id, "Owner updated");
        Ok(saved)
    }

    /// Deletes an owner and, through it, all of its pets and visits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete_owner(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete_by_id(id).await? {
            return Err(AppError::entity_not_found("Owner", id));
        }
        info!(owner_id = id, "Owner deleted");
        Ok(())
    }

    /// Searches owners by last-name prefix and decides how to present the result.
    ///
    /// `page` is 1-based. An empty or missing prefix lists every owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `page` is 0.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn search(&self, last_name: Option<&str>, page: u32) -> Result<SearchOutcome, AppError> {
        if page == 0 {
            return Err(AppError::bad_request(
                "Page must be greater than 0",
                json!({ "page": page }),
            ));
        }

        let prefix = last_name.unwrap_or_default();
        let request = PageRequest::new(page, self.page_size);
        let results = self
            .repository
            .find_by_last_name_prefix(prefix, request)
            .await?;

        let outcome = match search::resolve(results) {
            Some(outcome) => outcome,
            None => {
                // The single match sits on an earlier page.
                let first = self
                    .repository
                    .find_by_last_name_prefix(prefix, PageRequest::first(self.page_size))
                    .await?;
                search::resolve(first).ok_or_else(|| {
                    AppError::internal(
                        "Search result changed while resolving",
                        json!({ "last_name": prefix }),
                    )
                })?
            }
        };

        match &outcome {
            SearchOutcome::NotFound(_) => debug!(prefix, "Owner search found nothing"),
            SearchOutcome::Resolved(id) => debug!(prefix, owner_id = id, "Owner search resolved"),
            SearchOutcome::Listed(page) => {
                debug!(prefix, total = page.total_items, "Owner search listed")
            }
        }

        Ok(outcome)
    }

    /// Total number of owners.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn count_owners(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Every owner with pets and visits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_owners(&self) -> Result<Vec<Owner>, AppError> {
        self.repository.find_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pagination::Page;
    use crate::domain::repositories::MockOwnerRepository;

    fn details(last_name: &str) -> OwnerDetails {
        OwnerDetails {
            first_name: "Alice".to_string(),
            last_name: last_name.to_string(),
            address: "Main".to_string(),
            city: "Quito".to_string(),
            telephone: "1234567890".to_string(),
        }
    }

    fn owner(id: i64, last_name: &str) -> Owner {
        Owner::persisted(id, details(last_name), Vec::new())
    }

    #[tokio::test]
    async fn test_create_owner_success() {
        let mut mock_repo = MockOwnerRepository::new();
        mock_repo
            .expect_save()
            .withf(|owner| owner.is_new() && owner.last_name == "Smith")
            .times(1)
            .returning(|_| Ok(owner(99, "Smith")));

        let service = OwnerService::new(Arc::new(mock_repo), 5);

        let saved = service.create_owner(details("Smith")).await.unwrap();
        assert_eq!(saved.id(), Some(99));
    }

    #[tokio::test]
    async fn test_create_owner_reports_all_fields() {
        let mut mock_repo = MockOwnerRepository::new();
        mock_repo.expect_save().times(0);

        let service = OwnerService::new(Arc::new(mock_repo), 5);

        let err = service
            .create_owner(OwnerDetails::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        let fields = err.field_errors().unwrap().as_array().unwrap();
        for field in ["first_name", "last_name", "address", "city", "telephone"] {
            assert!(fields.iter().any(|f| f["field"] == field), "{field}");
        }
    }

    #[tokio::test]
    async fn test_update_owner_rejects_mismatched_id() {
        let mut mock_repo = MockOwnerRepository::new();
        mock_repo.expect_find_by_id().times(0);
        mock_repo.expect_save().times(0);

        let service = OwnerService::new(Arc::new(mock_repo), 5);

        let err = service
            .update_owner(5, Some(10), details("Brown"))
            .await
            .unwrap_err();

        assert_eq!(err.field_errors().unwrap()[0]["code"], "mismatch");
    }

    #[tokio::test]
    async fn test_update_owner_success() {
        let mut mock_repo = MockOwnerRepository::new();
        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 8)
            .times(1)
            .returning(|_| Ok(Some(owner(8, "Green"))));
        mock_repo
            .expect_save()
            .withf(|owner| owner.id() == Some(8) && owner.address == "Main")
            .times(1)
            .returning(Ok);

        let service = OwnerService::new(Arc::new(mock_repo), 5);

        let saved = service
            .update_owner(8, Some(8), details("Green"))
            .await
            .unwrap();
        assert_eq!(saved.id(), Some(8));
    }

    #[tokio::test]
    async fn test_get_owner_not_found() {
        let mut mock_repo = MockOwnerRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = OwnerService::new(Arc::new(mock_repo), 5);

        let err = service.get_owner(1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_owner() {
        let mut mock_repo = MockOwnerRepository::new();
        mock_repo.expect_delete_by_id().returning(|_| Ok(false));

        let service = OwnerService::new(Arc::new(mock_repo), 5);

        assert!(matches!(
            service.delete_owner(4).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_search_single_owner_resolves() {
        let mut mock_repo = MockOwnerRepository::new();
        mock_repo
            .expect_find_by_last_name_prefix()
            .withf(|prefix, page| prefix == "Car" && page.page == 1 && page.size == 2)
            .times(1)
            .returning(|_, page| Ok(Page::new(vec![owner(10, "Carter")], page, 1)));

        let service = OwnerService::new(Arc::new(mock_repo), 2);

        let outcome = service.search(Some("Car"), 1).await.unwrap();
        assert_eq!(outcome, SearchOutcome::Resolved(10));
    }

    #[tokio::test]
    async fn test_search_multiple_owners_listed() {
        let mut mock_repo = MockOwnerRepository::new();
        mock_repo
            .expect_find_by_last_name_prefix()
            .times(1)
            .returning(|_, page| {
                Ok(Page::new(vec![owner(1, "Doe"), owner(2, "Doe")], page, 2))
            });

        let service = OwnerService::new(Arc::new(mock_repo), 2);

        match service.search(Some("Do"), 1).await.unwrap() {
            SearchOutcome::Listed(page) => assert_eq!(page.items.len(), 2),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_nothing_found() {
        let mut mock_repo = MockOwnerRepository::new();
        mock_repo
            .expect_find_by_last_name_prefix()
            .returning(|_, page| Ok(Page::empty(page)));

        let service = OwnerService::new(Arc::new(mock_repo), 2);

        assert!(matches!(
            service.search(Some("Unknown"), 1).await.unwrap(),
            SearchOutcome::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_search_missing_prefix_means_all() {
        let mut mock_repo = MockOwnerRepository::new();
        mock_repo
            .expect_find_by_last_name_prefix()
            .withf(|prefix, _| prefix.is_empty())
            .times(1)
            .returning(|_, page| Ok(Page::new(vec![owner(1, "A"), owner(2, "B")], page, 3)));

        let service = OwnerService::new(Arc::new(mock_repo), 2);

        assert!(matches!(
            service.search(None, 1).await.unwrap(),
            SearchOutcome::Listed(_)
        ));
    }

    #[tokio::test]
    async fn test_search_single_owner_on_later_page_rereads_first_page() {
        let mut mock_repo = MockOwnerRepository::new();
        mock_repo
            .expect_find_by_last_name_prefix()
            .withf(|_, page| page.page == 4)
            .times(1)
            .returning(|_, page| Ok(Page::new(Vec::new(), page, 1)));
        mock_repo
            .expect_find_by_last_name_prefix()
            .withf(|_, page| page.page == 1)
            .times(1)
            .returning(|_, page| Ok(Page::new(vec![owner(7, "Solo")], page, 1)));

        let service = OwnerService::new(Arc::new(mock_repo), 2);

        assert_eq!(
            service.search(Some("So"), 4).await.unwrap(),
            SearchOutcome::Resolved(7)
        );
    }

    #[tokio::test]
    async fn test_search_page_zero_rejected() {
        let mock_repo = MockOwnerRepository::new();
        let service = OwnerService::new(Arc::new(mock_repo), 2);

        assert!(matches!(
            service.search(None, 0).await.unwrap_err(),
            AppError::Validation { .. }
        ));
    }

    #[tokio::test]
    async fn test_custom_validator_is_used() {
        struct RejectAll;
        impl Validator<OwnerDetails> for RejectAll {
            fn validate(&self, _: &OwnerDetails) -> FieldErrors {
                let mut errors = FieldErrors::new();
                errors.reject_with("city", "closed", "We do not serve this city");
                errors
            }
        }

        let mock_repo = MockOwnerRepository::new();
        let service =
            OwnerService::new(Arc::new(mock_repo), 5).with_validator(Arc::new(RejectAll));

        let err = service.create_owner(details("Smith")).await.unwrap_err();
        assert_eq!(err.field_errors().unwrap()[0]["code"], "closed");
    }
}
