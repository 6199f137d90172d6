//! DTOs for owner endpoints.

use serde::{Deserialize, Serialize};

use super::pagination::PaginationMeta;
use super::pet::PetItem;
use crate::domain::entities::{Owner, OwnerDetails};

/// Body of `POST /owners` and `PUT /owners/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OwnerRequest {
    /// Only meaningful on update, where it must match the path id.
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
}

impl OwnerRequest {
    pub fn into_details(self) -> OwnerDetails {
        OwnerDetails {
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            city: self.city,
            telephone: self.telephone,
        }
    }
}

/// An owner with pets and visits.
#[derive(Debug, Serialize)]
pub struct OwnerItem {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pub pets: Vec<PetItem>,
}

impl From<&Owner> for OwnerItem {
    fn from(owner: &Owner) -> Self {
        Self {
            id: owner.id(),
            first_name: owner.first_name.clone(),
            last_name: owner.last_name.clone(),
            address: owner.address.clone(),
            city: owner.city.clone(),
            telephone: owner.telephone.clone(),
            pets: owner.pets().iter().map(PetItem::from).collect(),
        }
    }
}

/// One page of owner search results.
#[derive(Debug, Serialize)]
pub struct OwnerListResponse {
    pub items: Vec<OwnerItem>,
    pub pagination: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_blank() {
        let request: OwnerRequest = serde_json::from_str(r#"{"first_name": "Ann"}"#).unwrap();

        assert_eq!(request.first_name, "Ann");
        assert!(request.telephone.is_empty());
        assert!(request.id.is_none());
    }
}
