//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{OwnerService, PetService, VetService, VisitService};
use crate::domain::clock::Clock;
use crate::domain::repositories::{OwnerRepository, PetTypeRepository, VetRepository};
use crate::infrastructure::persistence::InMemoryRepository;

/// Services behind trait objects so the storage backend is chosen at startup.
#[derive(Clone)]
pub struct AppState {
    pub owner_service: Arc<OwnerService<dyn OwnerRepository>>,
    pub pet_service: Arc<PetService<dyn OwnerRepository, dyn PetTypeRepository>>,
    pub visit_service: Arc<VisitService<dyn OwnerRepository>>,
    pub vet_service: Arc<VetService<dyn VetRepository>>,
    /// Backend name reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    pub fn new(
        owners: Arc<dyn OwnerRepository>,
        pet_types: Arc<dyn PetTypeRepository>,
        vets: Arc<dyn VetRepository>,
        clock: Arc<dyn Clock>,
        page_size: u32,
        storage: &'static str,
    ) -> Self {
        Self {
            owner_service: Arc::new(OwnerService::new(owners.clone(), page_size)),
            pet_service: Arc::new(PetService::new(owners.clone(), pet_types, clock.clone())),
            visit_service: Arc::new(VisitService::new(owners, clock)),
            vet_service: Arc::new(VetService::new(vets, page_size)),
            storage,
        }
    }

    /// State over a single in-memory store.
    pub fn in_memory(repository: Arc<InMemoryRepository>, clock: Arc<dyn Clock>, page_size: u32) -> Self {
        Self::new(
            repository.clone(),
            repository.clone(),
            repository,
            clock,
            page_size,
            "memory",
        )
    }
}
