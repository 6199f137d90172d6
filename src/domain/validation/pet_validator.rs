use super::{FieldErrors, MAX_NAME_LEN, Reason, Validator};
use crate::domain::entities::Pet;

/// Record-level rules for a candidate pet.
///
/// - `type` is required for new pets only; existing pets may have lost their
///   type in a data migration and are not re-checked on every edit
/// - `birth_date` is required for every pet
/// - `name` may not exceed [`MAX_NAME_LEN`] characters
///
/// Blank and duplicate names are checked by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct PetValidator;

impl Validator<Pet> for PetValidator {
    fn validate(&self, pet: &Pet) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if pet.is_new() && pet.pet_type.is_none() {
            errors.reject("type", Reason::Required);
        }

        if pet.birth_date.is_none() {
            errors.reject("birth_date", Reason::Required);
        }

        if pet.name.chars().count() > MAX_NAME_LEN {
            errors.reject("name", Reason::TooLong);
        }

        errors
    }
}
