//! Pet entity and its visit history.

use chrono::NaiveDate;

use super::{PetType, Visit};
use crate::domain::identity::Identity;

/// A pet belonging to exactly one owner.
///
/// Visits are kept ordered by date, oldest first. They are read through
/// [`Pet::visits`]; new visits go through [`super::Owner::add_visit`] so that a
/// visit can only be attached inside the right owner's subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
    identity: Identity,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub pet_type: Option<PetType>,
    visits: Vec<Visit>,
}

impl Pet {
    /// Creates an unsaved pet without visits.
    pub fn new(
        name: impl Into<String>,
        birth_date: Option<NaiveDate>,
        pet_type: Option<PetType>,
    ) -> Self {
        Self {
            identity: Identity::Unsaved,
            name: name.into(),
            birth_date,
            pet_type,
            visits: Vec::new(),
        }
    }

    /// Rebuilds a pet loaded from storage.
    pub fn persisted(
        id: i64,
        name: impl Into<String>,
        birth_date: Option<NaiveDate>,
        pet_type: Option<PetType>,
        mut visits: Vec<Visit>,
    ) -> Self {
        visits.sort_by_key(|v| v.date);
        Self {
            identity: Identity::Saved(id),
            name: name.into(),
            birth_date,
            pet_type,
            visits,
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

    /// Visits ordered by date ascending.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub(crate) fn visits_mut(&mut self) -> &mut [Visit] {
        &mut self.visits
    }

    pub(crate) fn assign_id(&mut self, id: i64) {
        self.identity.assign(id);
    }

    pub(crate) fn add_visit(&mut self, visit: Visit) {
        let at = self.visits.partition_point(|v| v.date <= visit.date);
        self.visits.insert(at, visit);
    }

    pub(crate) fn apply_details(&mut self, details: PetDetails) {
        self.name = details.name;
        self.birth_date = details.birth_date;
        self.pet_type = details.pet_type;
    }
}

/// Editable attributes of a pet, as submitted on a create or edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetDetails {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub pet_type: Option<PetType>,
}

impl PetDetails {
    /// Builds an unsaved pet from the details.
    pub fn into_new_pet(self) -> Pet {
        Pet::new(self.name, self.birth_date, self.pet_type)
    }

    /// Builds the candidate used to validate an edit of pet `id`.
    pub fn to_candidate(&self, id: i64) -> Pet {
        Pet::persisted(
            id,
            self.name.clone(),
            self.birth_date,
            self.pet_type.clone(),
            Vec::new(),
        )
    }
}
