use validator::Validate;

use super::{FieldErrors, Validator};
use crate::domain::entities::VisitDetails;

/// A visit needs a non-blank description.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisitValidator;

impl Validator<VisitDetails> for VisitValidator {
    fn validate(&self, details: &VisitDetails) -> FieldErrors {
        match Validate::validate(details) {
            Ok(()) => FieldErrors::new(),
            Err(errors) => errors.into(),
        }
    }
}
