//! Owner aggregate root.
//!
//! An owner exclusively owns its pets, and each pet exclusively owns its
//! visits. Every mutation of that tree goes through the methods on [`Owner`],
//! which is where the aggregate invariants are enforced:
//!
//! - only unsaved pets can be added, so an existing pet is never re-parented
//! - visits are attached to a pet looked up by id inside this owner only

use validator::Validate;

use super::{Pet, PetDetails, Visit};
use crate::domain::error::DomainError;
use crate::domain::identity::Identity;
use crate::domain::validation::{TELEPHONE_REGEX, not_blank};

/// A pet owner and the pets they own, ordered by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Owner {
    identity: Identity,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pets: Vec<Pet>,
}

impl Owner {
    /// Creates an unsaved owner without pets.
    pub fn new(details: OwnerDetails) -> Self {
        Self {
            identity: Identity::Unsaved,
            first_name: details.first_name,
            last_name: details.last_name,
            address: details.address,
            city: details.city,
            telephone: details.telephone,
            pets: Vec::new(),
        }
    }

    /// Rebuilds an owner loaded from storage.
    pub fn persisted(id: i64, details: OwnerDetails, mut pets: Vec<Pet>) -> Self {
        pets.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            identity: Identity::Saved(id),
            pets,
            ..Self::new(details)
        }
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn id(&self) -> Option<i64> {
        self.identity.id()
    }

    pub fn is_new(&self) -> bool {
        self.identity.is_new()
    }

    /// Pets ordered by name.
    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    pub(crate) fn pets_mut(&mut self) -> &mut [Pet] {
        &mut self.pets
    }

    pub(crate) fn assign_id(&mut self, id: i64) {
        self.identity.assign(id);
    }

    /// Current editable attributes.
    pub fn details(&self) -> OwnerDetails {
        OwnerDetails {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            telephone: self.telephone.clone(),
        }
    }

    /// Replaces the editable attributes, leaving identity and pets alone.
    pub fn apply_details(&mut self, details: OwnerDetails) {
        self.first_name = details.first_name;
        self.last_name = details.last_name;
        self.address = details.address;
        self.city = details.city;
        self.telephone = details.telephone;
    }

    /// Adds a pet to this owner.
    ///
    /// Only unsaved pets are accepted; a pet that already has an identifier is
    /// ignored.
    pub fn add_pet(&mut self, pet: Pet) {
        if pet.is_new() {
            self.insert_ordered(pet);
        }
    }

    /// Looks a pet up by name, ignoring case.
    ///
    /// With `ignore_new`, unsaved pets are skipped. Returns the first match in
    /// name order.
    pub fn find_pet_by_name(&self, name: &str, ignore_new: bool) -> Option<&Pet> {
        let wanted = name.to_lowercase();
        self.pets
            .iter()
            .filter(|pet| !ignore_new || !pet.is_new())
            .find(|pet| pet.name.to_lowercase() == wanted)
    }

    /// Looks a persisted pet up by identifier.
    pub fn find_pet_by_id(&self, id: i64) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.id() == Some(id))
    }

    /// Overwrites the attributes of the persisted pet `pet_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] if this owner has no such pet.
    pub fn update_pet(&mut self, pet_id: i64, details: PetDetails) -> Result<(), DomainError> {
        let index = self
            .pets
            .iter()
            .position(|pet| pet.id() == Some(pet_id))
            .ok_or(DomainError::InvalidArgument("Invalid Pet identifier!"))?;

        let mut pet = self.pets.remove(index);
        pet.apply_details(details);
        self.insert_ordered(pet);
        Ok(())
    }

    /// Attaches `visit` to the pet with identifier `pet_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] if the pet id or the visit is
    /// missing, or if this owner has no pet with that id.
    pub fn add_visit(&mut self, pet_id: Option<i64>, visit: Option<Visit>) -> Result<(), DomainError> {
        let pet_id = pet_id.ok_or(DomainError::InvalidArgument(
            "Pet identifier must not be null!",
        ))?;
        let visit = visit.ok_or(DomainError::InvalidArgument("Visit must not be null!"))?;

        let pet = self
            .pets
            .iter_mut()
            .find(|pet| pet.id() == Some(pet_id))
            .ok_or(DomainError::InvalidArgument("Invalid Pet identifier!"))?;

        pet.add_visit(visit);
        Ok(())
    }

    fn insert_ordered(&mut self, pet: Pet) {
        let at = self.pets.partition_point(|p| p.name <= pet.name);
        self.pets.insert(at, pet);
    }
}

/// Editable attributes of an owner, as submitted on a create or edit form.
///
/// Format rules are declared here and checked by
/// [`crate::domain::validation::OwnerValidator`].
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct OwnerDetails {
    #[validate(
        custom(function = "not_blank"),
        length(max = 30, code = "length", message = "must be at most 30 characters")
    )]
    pub first_name: String,

    #[validate(
        custom(function = "not_blank"),
        length(max = 30, code = "length", message = "must be at most 30 characters")
    )]
    pub last_name: String,

    #[validate(
        custom(function = "not_blank"),
        length(max = 255, code = "length", message = "must be at most 255 characters")
    )]
    pub address: String,

    #[validate(
        custom(function = "not_blank"),
        length(max = 80, code = "length", message = "must be at most 80 characters")
    )]
    pub city: String,

    #[validate(
        custom(function = "not_blank"),
        regex(
            path = *TELEPHONE_REGEX,
            code = "pattern",
            message = "Telephone must be a 10-digit number"
        )
    )]
    pub telephone: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn details(last_name: &str) -> OwnerDetails {
        OwnerDetails {
            first_name: "George".to_string(),
            last_name: last_name.to_string(),
            address: "110 W. Liberty St.".to_string(),
            city: "Madison".to_string(),
            telephone: "6085551023".to_string(),
        }
    }

    fn saved_pet(id: i64, name: &str) -> Pet {
        Pet::persisted(id, name, None, None, Vec::new())
    }

    fn visit() -> Visit {
        Visit::new(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(), "Checkup")
    }

    #[test]
    fn test_add_new_pet_appears_once() {
        let mut owner = Owner::new(details("Franklin"));
        owner.add_pet(Pet::new("Leo", None, None));

        assert_eq!(owner.pets().len(), 1);
        assert_eq!(owner.pets()[0].name, "Leo");
    }

    #[test]
    fn test_add_persisted_pet_is_noop() {
        let mut owner = Owner::persisted(1, details("Franklin"), vec![saved_pet(1, "Leo")]);
        let before = owner.pets().to_vec();

        owner.add_pet(saved_pet(2, "Basil"));

        assert_eq!(owner.pets(), before.as_slice());
    }

    #[test]
    fn test_pets_are_ordered_by_name() {
        let mut owner = Owner::new(details("Davis"));
        owner.add_pet(Pet::new("Max", None, None));
        owner.add_pet(Pet::new("Bella", None, None));
        owner.add_pet(Pet::new("Lucky", None, None));

        let names: Vec<_> = owner.pets().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bella", "Lucky", "Max"]);
    }

    #[test]
    fn test_find_pet_by_name_ignores_case() {
        let owner = Owner::persisted(1, details("Franklin"), vec![saved_pet(3, "Fluffy")]);

        let found = owner.find_pet_by_name("FLUFFY", false).unwrap();
        assert!(found.name.eq_ignore_ascii_case("fluffy"));
    }

    #[test]
    fn test_find_pet_by_name_ignore_new_skips_unsaved() {
        let mut owner = Owner::persisted(1, details("Franklin"), Vec::new());
        owner.add_pet(Pet::new("Rocky", None, None));

        assert!(owner.find_pet_by_name("rocky", false).is_some());
        assert!(owner.find_pet_by_name("rocky", true).is_none());
    }

    #[test]
    fn test_find_pet_by_name_missing() {
        let owner = Owner::persisted(1, details("Franklin"), vec![saved_pet(3, "Leo")]);
        assert!(owner.find_pet_by_name("Basil", false).is_none());
    }

    #[test]
    fn test_find_pet_by_id_only_matches_persisted() {
        let mut owner = Owner::persisted(1, details("Franklin"), vec![saved_pet(15, "Lucky")]);
        owner.add_pet(Pet::new("Rocky", None, None));

        assert_eq!(owner.find_pet_by_id(15).unwrap().name, "Lucky");
        assert!(owner.find_pet_by_id(16).is_none());
    }

    #[test]
    fn test_add_visit_to_known_pet() {
        let mut owner = Owner::persisted(1, details("Franklin"), vec![saved_pet(10, "Rex")]);

        owner.add_visit(Some(10), Some(visit())).unwrap();

        let pet = owner.find_pet_by_id(10).unwrap();
        assert_eq!(pet.visits().len(), 1);
        assert_eq!(pet.visits()[0].description, "Checkup");
    }

    #[test]
    fn test_add_visit_rejects_missing_arguments() {
        let mut owner = Owner::persisted(1, details("Franklin"), vec![saved_pet(10, "Rex")]);

        assert!(matches!(
            owner.add_visit(None, Some(visit())),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            owner.add_visit(Some(10), None),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            owner.add_visit(Some(99), Some(visit())),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(owner.find_pet_by_id(10).unwrap().visits().is_empty());
    }

    #[test]
    fn test_add_visit_cannot_reach_unsaved_pet() {
        let mut owner = Owner::persisted(1, details("Franklin"), Vec::new());
        owner.add_pet(Pet::new("Rocky", None, None));

        assert!(owner.add_visit(Some(0), Some(visit())).is_err());
    }

    #[test]
    fn test_update_pet_reorders_by_new_name() {
        let mut owner = Owner::persisted(
            1,
            details("Franklin"),
            vec![saved_pet(1, "Alpha"), saved_pet(2, "Beta")],
        );

        owner
            .update_pet(
                1,
                PetDetails {
                    name: "Zeta".to_string(),
                    ..PetDetails::default()
                },
            )
            .unwrap();

        let names: Vec<_> = owner.pets().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Zeta"]);
        assert_eq!(owner.find_pet_by_id(1).unwrap().name, "Zeta");
    }

    #[test]
    fn test_update_unknown_pet_fails() {
        let mut owner = Owner::persisted(1, details("Franklin"), Vec::new());
        assert!(owner.update_pet(5, PetDetails::default()).is_err());
    }

    #[test]
    fn test_apply_details_keeps_pets() {
        let mut owner = Owner::persisted(1, details("Franklin"), vec![saved_pet(1, "Leo")]);
        owner.apply_details(details("Frank"));

        assert_eq!(owner.last_name, "Frank");
        assert_eq!(owner.id(), Some(1));
        assert_eq!(owner.pets().len(), 1);
    }
}
