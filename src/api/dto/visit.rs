//! DTOs for visit endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Visit, VisitDetails};

/// Body of `POST /owners/{id}/pets/{pet_id}/visits`. `date` defaults to today.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VisitRequest {
    pub date: Option<NaiveDate>,
    pub description: String,
}

impl From<VisitRequest> for VisitDetails {
    fn from(request: VisitRequest) -> Self {
        VisitDetails {
            date: request.date,
            description: request.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VisitItem {
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub description: String,
}

impl From<&Visit> for VisitItem {
    fn from(visit: &Visit) -> Self {
        Self {
            id: visit.id(),
            date: visit.date,
            description: visit.description.clone(),
        }
    }
}
