//! Validation engine for owner, pet and visit input.
//!
//! Every rule set implements [`Validator`] and reports all of its violations at
//! once as [`FieldErrors`]; nothing short-circuits after the first failure.
//!
//! - [`PetValidator`] - procedural rules for a candidate [`crate::domain::entities::Pet`]
//! - [`OwnerValidator`] - format rules declared on [`crate::domain::entities::OwnerDetails`]
//! - [`VisitValidator`] - format rules declared on [`crate::domain::entities::VisitDetails`]
//!
//! Rules that need the owner's other pets (duplicate names) or the current
//! date (future birth dates) are applied by the caller, see
//! [`crate::application::services::PetService`].

mod owner_validator;
mod pet_validator;
mod visit_validator;

pub use owner_validator::OwnerValidator;
pub use pet_validator::PetValidator;
pub use visit_validator::VisitValidator;

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Exactly ten ASCII digits.
pub(crate) static TELEPHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("telephone pattern is valid"));

/// Longest person or pet name the storage accepts.
pub const MAX_NAME_LEN: usize = 30;

/// A capability that checks a candidate value and lists what is wrong with it.
pub trait Validator<T: ?Sized>: Send + Sync {
    fn validate(&self, candidate: &T) -> FieldErrors;
}

/// Stable reason codes attached to field errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    Required,
    Pattern,
    Duplicate,
    Future,
    NotFound,
    Invalid,
    TooLong,
}

impl Reason {
    pub fn code(self) -> &'static str {
        match self {
            Reason::Required => "required",
            Reason::Pattern => "pattern",
            Reason::Duplicate => "duplicate",
            Reason::Future => "future",
            Reason::NotFound => "notFound",
            Reason::Invalid => "invalid",
            Reason::TooLong => "length",
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            Reason::Required => "required",
            Reason::Pattern => "invalid format",
            Reason::Duplicate => "already exists",
            Reason::Future => "must not be in the future",
            Reason::NotFound => "has not been found",
            Reason::Invalid => "is invalid",
            Reason::TooLong => "is too long",
        }
    }
}

/// A single violation, scoped to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// All violations found on one submission, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation with the reason's default message.
    pub fn reject(&mut self, field: &str, reason: Reason) {
        self.reject_with(field, reason.code(), reason.default_message());
    }

    pub fn reject_with(&mut self, field: &str, code: &str, message: &str) {
        self.0.push(FieldError {
            field: field.to_string(),
            code: code.to_string(),
            message: message.to_string(),
        });
    }

    /// Appends every violation from `other`.
    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Returns `(field, code)` pairs, handy for assertions and logs.
    pub fn codes(&self) -> Vec<(&str, &str)> {
        self.0
            .iter()
            .map(|e| (e.field.as_str(), e.code.as_str()))
            .collect()
    }

    /// `Ok(())` when empty, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| (field.to_string(), errs.clone()))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = FieldErrors::new();
        for (field, errs) in fields {
            for err in errs {
                let message = err
                    .message
                    .as_deref()
                    .unwrap_or_else(|| err.code.as_ref())
                    .to_string();
                out.reject_with(&field, &err.code, &message);
            }
        }
        out
    }
}

/// Rejects empty or whitespace-only strings with code `required`.
pub(crate) fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new(Reason::Required.code());
        err.message = Some(Reason::Required.default_message().into());
        return Err(err);
    }
    Ok(())
}
