use validator::Validate;

use super::{FieldErrors, Validator};
use crate::domain::entities::OwnerDetails;

/// Format rules for owner input: names, address and city non-blank, telephone
/// exactly ten digits.
///
/// The rules themselves are declared on [`OwnerDetails`] with `validator`
/// attributes; this type adapts them to the [`Validator`] capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerValidator;

impl Validator<OwnerDetails> for OwnerValidator {
    fn validate(&self, details: &OwnerDetails) -> FieldErrors {
        match Validate::validate(details) {
            Ok(()) => FieldErrors::new(),
            Err(errors) => errors.into(),
        }
    }
}
