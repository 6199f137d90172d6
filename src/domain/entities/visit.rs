//! Visit entity: one appointment of a pet at the clinic.

use chrono::NaiveDate;
use validator::Validate;

use crate::domain::clock::Clock;
use crate::domain::identity::Identity;
use crate::domain::validation::not_blank;

/// A visit of a pet to the clinic.
///
/// Visits only ever live inside a [`super::Pet`]; they are attached through
/// [`super::Owner::add_visit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    identity: Identity,
    pub date: NaiveDate,
    pub description: String,
}

impl Visit {
    /// Creates an unsaved visit on the given date.
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            identity: Identity::Unsaved,
            date,
            description: description.into(),
        }
    }

    /// Creates an unsaved visit dated today according to `clock`.
    pub fn today(clock: &dyn Clock, description: impl Into<String>) -> Self {
        Self::new(clock.today(), description)
    }

    /// Rebuilds a visit loaded from storage.
    pub fn persisted(id: i64, date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            identity: Identity::Saved(id),
            date,
            description: description.into(),
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

    pub(crate) fn assign_id(&mut self, id: i64) {
        self.identity.assign(id);
    }
}

/// Input for booking a visit. `date` falls back to today when absent.
#[derive(Debug, Clone, Default, Validate)]
pub struct VisitDetails {
    pub date: Option<NaiveDate>,

    #[validate(
        custom(function = "not_blank"),
        length(max = 255, code = "length", message = "must be at most 255 characters")
    )]
    pub description: String,
}

impl VisitDetails {
    /// Turns the details into an unsaved visit, defaulting the date via `clock`.
    pub fn into_visit(self, clock: &dyn Clock) -> Visit {
        match self.date {
            Some(date) => Visit::new(date, self.description),
            None => Visit::today(clock, self.description),
        }
    }
}
