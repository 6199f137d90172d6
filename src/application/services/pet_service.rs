//! Pet registration and editing.
//!
//! Checks that need the owner or the current date live here, outside the
//! record-level [`PetValidator`]:
//!
//! - the pet type name must resolve to a known [`PetType`]
//! - the name must be unique within the owner (ignoring case)
//! - the birth date must not be in the future
//!
//! All failures of one submission are collected and reported together.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::clock::Clock;
use crate::domain::entities::{Owner, Pet, PetDetails, PetType};
use crate::domain::repositories::{OwnerRepository, PetTypeRepository};
use crate::domain::validation::{FieldErrors, PetValidator, Reason, Validator};
use crate::error::AppError;

/// Submitted pet form. The type is referenced by name.
#[derive(Debug, Clone, Default)]
pub struct PetForm {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub type_name: Option<String>,
}

pub struct PetService<O, T>
where
    O: OwnerRepository + ?Sized,
    T: PetTypeRepository + ?Sized,
{
    owners: Arc<O>,
    pet_types: Arc<T>,
    clock: Arc<dyn Clock>,
    validator: Arc<dyn Validator<Pet>>,
}

impl<O, T> PetService<O, T>
where
    O: OwnerRepository + ?Sized,
    T: PetTypeRepository + ?Sized,
{
    pub fn new(owners: Arc<O>, pet_types: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            owners,
            pet_types,
            clock,
            validator: Arc::new(PetValidator),
        }
    }

    /// Replaces the pet validator.
    pub fn with_validator(mut self, validator: Arc<dyn Validator<Pet>>) -> Self {
        self.validator = validator;
        self
    }

    /// All pet types ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn pet_types(&self) -> Result<Vec<PetType>, AppError> {
        self.pet_types.find_pet_types().await
    }

    /// Registers a new pet for owner `owner_id`.
    ///
    /// Returns the saved owner, whose pet list now contains the new pet.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner does not exist.
    /// Returns [`AppError::Validation`] with every field error found.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create_pet(&self, owner_id: i64, form: PetForm) -> Result<Owner, AppError> {
        let mut owner = self.load_owner(owner_id).await?;
        let mut errors = FieldErrors::new();

        let pet_type = self.resolve_type(form.type_name.as_deref(), &mut errors).await?;
        let details = PetDetails {
            name: form.name,
            birth_date: form.birth_date,
            pet_type,
        };
        let candidate = details.into_new_pet();

        errors.merge(self.validator.validate(&candidate));
        if !candidate.name.trim().is_empty()
            && owner.find_pet_by_name(&candidate.name, true).is_some()
        {
            errors.reject("name", Reason::Duplicate);
        }
        self.check_birth_date(candidate.birth_date, &mut errors);

        if !errors.is_empty() {
            warn!(owner_id, fields = ?errors.codes(), "Rejected new pet");
            return Err(AppError::invalid_fields(errors));
        }

        let name = candidate.name.clone();
        owner.add_pet(candidate);
        let saved = self.owners.save(owner).await?;

        info!(owner_id, pet = %name, "Pet added");
        Ok(saved)
    }

    /// Applies an edit of pet `pet_id` belonging to owner `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the owner or the pet does not exist.
    /// Returns [`AppError::Validation`] with every field error found.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn update_pet(
        &self,
        owner_id: i64,
        pet_id: i64,
        form: PetForm,
    ) -> Result<Owner, AppError> {
        let mut owner = self.load_owner(owner_id).await?;
        if owner.find_pet_by_id(pet_id).is_none() {
            return Err(AppError::entity_not_found("Pet", pet_id));
        }

        let mut errors = FieldErrors::new();
        let pet_type = self.resolve_type(form.type_name.as_deref(), &mut errors).await?;
        let details = PetDetails {
            name: form.name,
            birth_date: form.birth_date,
            pet_type,
        };

        errors.merge(self.validator.validate(&details.to_candidate(pet_id)));
        if !details.name.trim().is_empty()
            && let Some(existing) = owner.find_pet_by_name(&details.name, false)
            && existing.id() != Some(pet_id)
        {
            errors.reject("name", Reason::Duplicate);
        }
        self.check_birth_date(details.birth_date, &mut errors);

        if !errors.is_empty() {
            warn!(owner_id, pet_id, fields = ?errors.codes(), "Rejected pet update");
            return Err(AppError::invalid_fields(errors));
        }

        owner.update_pet(pet_id, details)?;
        let saved = self.owners.save(owner).await?;

        info!(owner_id, pet_id, "Pet updated");
        Ok(saved)
    }

    async fn load_owner(&self, owner_id: i64) -> Result<Owner, AppError> {
        self.owners
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| AppError::entity_not_found("Owner", owner_id))
    }

    async fn resolve_type(
        &self,
        type_name: Option<&str>,
        errors: &mut FieldErrors,
    ) -> Result<Option<PetType>, AppError> {
        let Some(name) = type_name.filter(|n| !n.trim().is_empty()) else {
            return Ok(None);
        };

        let found = self
            .pet_types
            .find_pet_types()
            .await?
            .into_iter()
            .find(|t| t.name == name);

        if found.is_none() {
            errors.reject("type", Reason::Invalid);
        }
        Ok(found)
    }

    fn check_birth_date(&self, birth_date: Option<NaiveDate>, errors: &mut FieldErrors) {
        if let Some(date) = birth_date
            && date > self.clock.today()
        {
            errors.reject("birth_date", Reason::Future);
        }
    }
}
