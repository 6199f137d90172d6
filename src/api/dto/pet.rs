//! DTOs for pet endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::visit::VisitItem;
use crate::application::services::PetForm;
use crate::domain::entities::{Pet, PetType};

/// Body of `POST /owners/{id}/pets` and `PUT /owners/{id}/pets/{pet_id}`.
///
/// The pet type is referenced by name, e.g. `"type": "cat"`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PetRequest {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub pet_type: Option<String>,
}

impl From<PetRequest> for PetForm {
    fn from(request: PetRequest) -> Self {
        PetForm {
            name: request.name,
            birth_date: request.birth_date,
            type_name: request.pet_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PetItem {
    pub id: Option<i64>,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub pet_type: Option<String>,
    pub visits: Vec<VisitItem>,
}

impl From<&Pet> for PetItem {
    fn from(pet: &Pet) -> Self {
        Self {
            id: pet.id(),
            name: pet.name.clone(),
            birth_date: pet.birth_date,
            pet_type: pet.pet_type.as_ref().map(|t| t.name.clone()),
            visits: pet.visits().iter().map(VisitItem::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PetTypeItem {
    pub id: i64,
    pub name: String,
}

impl From<PetType> for PetTypeItem {
    fn from(pet_type: PetType) -> Self {
        Self {
            id: pet_type.id,
            name: pet_type.name,
        }
    }
}
