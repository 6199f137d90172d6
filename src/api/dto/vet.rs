//! DTOs for vet endpoints.

use serde::Serialize;

use super::pagination::PaginationMeta;
use crate::domain::entities::{Specialty, Vet, Vets};
use crate::domain::pagination::Page;

#[derive(Debug, Serialize)]
pub struct SpecialtyItem {
    pub id: i64,
    pub name: String,
}

impl From<&Specialty> for SpecialtyItem {
    fn from(specialty: &Specialty) -> Self {
        Self {
            id: specialty.id,
            name: specialty.name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VetItem {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialties: Vec<SpecialtyItem>,
    pub nr_of_specialties: usize,
}

impl From<&Vet> for VetItem {
    fn from(vet: &Vet) -> Self {
        Self {
            id: vet.id,
            first_name: vet.first_name.clone(),
            last_name: vet.last_name.clone(),
            specialties: vet.specialties().iter().map(SpecialtyItem::from).collect(),
            nr_of_specialties: vet.nr_of_specialties(),
        }
    }
}

/// The complete vet list, `{"vet_list": [...]}`.
#[derive(Debug, Serialize)]
pub struct VetsResponse {
    pub vet_list: Vec<VetItem>,
}

impl From<&Vets> for VetsResponse {
    fn from(vets: &Vets) -> Self {
        Self {
            vet_list: vets.vet_list.iter().map(VetItem::from).collect(),
        }
    }
}

/// One page of vets.
#[derive(Debug, Serialize)]
pub struct VetPageResponse {
    pub items: Vec<VetItem>,
    pub pagination: PaginationMeta,
}

impl From<&Page<Vet>> for VetPageResponse {
    fn from(page: &Page<Vet>) -> Self {
        Self {
            items: page.items.iter().map(VetItem::from).collect(),
            pagination: PaginationMeta::from(page),
        }
    }
}
