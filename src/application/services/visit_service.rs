//! Booking visits for pets.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::clock::Clock;
use crate::domain::entities::{Owner, VisitDetails};
use crate::domain::repositories::OwnerRepository;
use crate::domain::validation::{Validator, VisitValidator};
use crate::error::AppError;

pub struct VisitService<R: OwnerRepository + ?Sized> {
    owners: Arc<R>,
    clock: Arc<dyn Clock>,
    validator: Arc<dyn Validator<VisitDetails>>,
}

impl<R: OwnerRepository + ?Sized> VisitService<R> {
    pub fn new(owners: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            owners,
            clock,
            validator: Arc::new(VisitValidator),
        }
    }

    /// Books a visit for pet `pet_id` of owner `owner_id`.
    ///
    /// A missing date defaults to today. Returns the saved owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner or the pet does not exist.
    /// Returns [`AppError::Validation`] if the description is blank.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn add_visit(
        &self,
        owner_id: i64,
        pet_id: i64,
        details: VisitDetails,
    ) -> Result<Owner, AppError> {
        let mut owner = self
            .owners
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| AppError::entity_not_found("Owner", owner_id))?;

        if owner.find_pet_by_id(pet_id).is_none() {
            return Err(AppError::entity_not_found("Pet", pet_id));
        }

        let errors = self.validator.validate(&details);
        if !errors.is_empty() {
            warn!(owner_id, pet_id, fields = ?errors.codes(), "Rejected visit");
            return Err(AppError::invalid_fields(errors));
        }

        let visit = details.into_visit(self.clock.as_ref());
        let date = visit.date;
        owner.add_visit(Some(pet_id), Some(visit))?;

        let saved = self.owners.save(owner).await?;
        info!(owner_id, pet_id, %date, "Visit booked");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::entities::{OwnerDetails, Pet, Visit};
    use crate::domain::repositories::MockOwnerRepository;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn owners_repo() -> MockOwnerRepository {
        let mut repo = MockOwnerRepository::new();
        repo.expect_find_by_id().returning(|id| {
            Ok((id == 6).then(|| {
                Owner::persisted(
                    6,
                    OwnerDetails::default(),
                    vec![Pet::persisted(
                        7,
                        "Samantha",
                        Some(day(2012, 9, 4)),
                        None,
                        vec![Visit::persisted(1, day(2013, 1, 1), "rabies shot")],
                    )],
                )
            }))
        });
        repo
    }

    fn service(repo: MockOwnerRepository) -> VisitService<MockOwnerRepository> {
        VisitService::new(Arc::new(repo), Arc::new(FixedClock(day(2024, 6, 1))))
    }

    #[tokio::test]
    async fn test_add_visit_defaults_to_today() {
        let mut repo = owners_repo();
        repo.expect_save()
            .withf(|owner| {
                let visits = owner.find_pet_by_id(7).unwrap().visits();
                visits.len() == 2 && visits[1].date == NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
            })
            .times(1)
            .returning(Ok);

        let details = VisitDetails {
            date: None,
            description: "checkup".to_string(),
        };

        assert!(service(repo).add_visit(6, 7, details).await.is_ok());
    }

    #[tokio::test]
    async fn test_add_visit_keeps_date_order() {
        let mut repo = owners_repo();
        repo.expect_save()
            .withf(|owner| {
                let visits = owner.find_pet_by_id(7).unwrap().visits();
                visits[0].description == "neutered"
            })
            .times(1)
            .returning(Ok);

        let details = VisitDetails {
            date: Some(day(2012, 12, 1)),
            description: "neutered".to_string(),
        };

        assert!(service(repo).add_visit(6, 7, details).await.is_ok());
    }

    #[tokio::test]
    async fn test_add_visit_blank_description() {
        let mut repo = owners_repo();
        repo.expect_save().times(0);

        let details = VisitDetails {
            date: None,
            description: "  ".to_string(),
        };

        let err = service(repo).add_visit(6, 7, details).await.unwrap_err();
        assert_eq!(err.field_errors().unwrap()[0]["field"], "description");
    }

    #[tokio::test]
    async fn test_add_visit_unknown_pet() {
        let err = service(owners_repo())
            .add_visit(6, 99, VisitDetails::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_add_visit_unknown_owner() {
        let err = service(owners_repo())
            .add_visit(1, 7, VisitDetails::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Owner not found with id: 1");
    }
}
