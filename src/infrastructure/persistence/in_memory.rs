//! In-process storage backend.
//!
//! Keeps every aggregate in a map keyed by owner id and hands out identifiers
//! from per-entity counters, the same way a database sequence would. Used when
//! `STORAGE_BACKEND=memory` and by the HTTP integration tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::entities::{Owner, OwnerDetails, Pet, PetType, Specialty, Vet, Visit};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repositories::{OwnerRepository, PetTypeRepository, VetRepository};
use crate::error::AppError;

#[derive(Debug, Default)]
struct Store {
    owners: BTreeMap<i64, Owner>,
    pet_types: Vec<PetType>,
    vets: Vec<Vet>,
    next_owner_id: i64,
    next_pet_id: i64,
    next_visit_id: i64,
}

impl Store {
    fn next(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }

    fn put(&mut self, mut owner: Owner) -> Result<Owner, AppError> {
        let owner_id = match owner.id() {
            Some(id) if !self.owners.contains_key(&id) => {
                return Err(AppError::entity_not_found("Owner", id));
            }
            Some(id) => id,
            None => {
                let id = Self::next(&mut self.next_owner_id);
                owner.assign_id(id);
                id
            }
        };

        for pet in owner.pets_mut() {
            if pet.is_new() {
                pet.assign_id(Self::next(&mut self.next_pet_id));
            }
            for visit in pet.visits_mut().iter_mut().filter(|v| v.is_new()) {
                visit.assign_id(Self::next(&mut self.next_visit_id));
            }
        }

        self.owners.insert(owner_id, owner.clone());
        Ok(owner)
    }

    fn sorted_owners<'a>(&'a self, prefix: &str) -> Vec<&'a Owner> {
        let mut owners: Vec<&Owner> = self
            .owners
            .values()
            .filter(|o| o.last_name.starts_with(prefix))
            .collect();
        owners.sort_by(|a, b| {
            (&a.last_name, &a.first_name, a.id()).cmp(&(&b.last_name, &b.first_name, b.id()))
        });
        owners
    }
}

/// Thread-safe in-memory implementation of every repository trait.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    store: RwLock<Store>,
}

impl InMemoryRepository {
    /// Creates an empty store with no pet types and no vets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the pet type catalogue.
    pub fn with_pet_types(self, pet_types: Vec<PetType>) -> Self {
        let mut store = self.store.into_inner();
        store.pet_types = pet_types;
        store.pet_types.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            store: RwLock::new(store),
        }
    }

    /// Replaces the vet list.
    pub fn with_vets(self, vets: Vec<Vet>) -> Self {
        let mut store = self.store.into_inner();
        store.vets = vets;
        store.vets.sort_by(|a, b| {
            (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id))
        });
        Self {
            store: RwLock::new(store),
        }
    }

    /// Creates a store holding the clinic's sample data: six pet types, six
    /// vets and ten owners with their pets and visits.
    pub fn with_sample_data() -> Result<Self, AppError> {
        let types: Vec<PetType> = ["cat", "dog", "lizard", "snake", "bird", "hamster"]
            .into_iter()
            .zip(1..)
            .map(|(name, id)| PetType::new(id, name))
            .collect();

        let radiology = Specialty::new(1, "radiology");
        let surgery = Specialty::new(2, "surgery");
        let dentistry = Specialty::new(3, "dentistry");
        fn vet(id: i64, first: &str, last: &str, specialties: &[&Specialty]) -> Vet {
            let mut vet = Vet::new(id, first, last);
            for s in specialties {
                vet.add_specialty((*s).clone());
            }
            vet
        }
        let vets = vec![
            vet(1, "James", "Carter", &[]),
            vet(2, "Helen", "Leary", &[&radiology]),
            vet(3, "Linda", "Douglas", &[&surgery, &dentistry]),
            vet(4, "Rafael", "Ortega", &[&surgery]),
            vet(5, "Henry", "Stevens", &[&radiology]),
            vet(6, "Sharon", "Jenkins", &[]),
        ];

        let repo = Self::new().with_pet_types(types.clone()).with_vets(vets);
        {
            let mut store = repo.store.try_write().map_err(|_| {
                AppError::internal("In-memory store is locked", serde_json::json!({}))
            })?;

            let kind = |id: i64| types.iter().find(|t| t.id == id).cloned();
            let date = NaiveDate::from_ymd_opt;

            let owners: [(&str, &str, &str, &str, &str, Vec<Pet>); 10] = [
                ("George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023",
                    vec![Pet::new("Leo", date(2010, 9, 7), kind(1))]),
                ("Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749",
                    vec![Pet::new("Basil", date(2012, 8, 6), kind(6))]),
                ("Eduardo", "Rodriquez", "2693 Commerce St.", "McFarland", "6085558763",
                    vec![
                        Pet::new("Rosy", date(2011, 4, 17), kind(2)),
                        Pet::new("Jewel", date(2010, 3, 7), kind(2)),
                    ]),
                ("Harold", "Davis", "563 Friendly St.", "Windsor", "6085553198",
                    vec![Pet::new("Iggy", date(2010, 11, 30), kind(3))]),
                ("Peter", "McTavish", "2387 S. Fair Way", "Madison", "6085552765",
                    vec![Pet::new("George", date(2010, 1, 20), kind(4))]),
                ("Jean", "Coleman", "105 N. Lake St.", "Monona", "6085552654",
                    vec![
                        Pet::new("Samantha", date(2012, 9, 4), kind(1)),
                        Pet::new("Max", date(2012, 9, 4), kind(1)),
                    ]),
                ("Jeff", "Black", "1450 Oak Blvd.", "Monona", "6085555387",
                    vec![Pet::new("Lucky", date(2011, 8, 6), kind(5))]),
                ("Maria", "Escobito", "345 Maple St.", "Madison", "6085557683",
                    vec![Pet::new("Mulligan", date(2007, 2, 24), kind(2))]),
                ("David", "Schroeder", "2749 Blackhawk Trail", "Madison", "6085559435",
                    vec![Pet::new("Freddy", date(2010, 3, 9), kind(5))]),
                ("Carlos", "Estaban", "2335 Independence La.", "Waunakee", "6085555487",
                    vec![
                        Pet::new("Lucky", date(2010, 6, 24), kind(2)),
                        Pet::new("Sly", date(2012, 6, 8), kind(1)),
                    ]),
            ];

            for (first_name, last_name, address, city, telephone, pets) in owners {
                let mut owner = Owner::new(OwnerDetails {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    address: address.to_string(),
                    city: city.to_string(),
                    telephone: telephone.to_string(),
                });
                for pet in pets {
                    owner.add_pet(pet);
                }
                store.put(owner)?;
            }

            let coleman = store.owners.values().find(|o| o.last_name == "Coleman").cloned();
            if let Some(mut jean) = coleman {
                let visits = [
                    ("Samantha", date(2013, 1, 1), "rabies shot"),
                    ("Max", date(2013, 1, 2), "rabies shot"),
                    ("Max", date(2013, 1, 3), "neutered"),
                    ("Samantha", date(2013, 1, 4), "spayed"),
                ];
                for (pet_name, day, description) in visits {
                    let pet_id = jean.find_pet_by_name(pet_name, true).and_then(Pet::id);
                    let visit = day.map(|d| Visit::new(d, description));
                    jean.add_visit(pet_id, visit)?;
                }
                store.put(jean)?;
            }
        }

        Ok(repo)
    }
}

#[async_trait]
impl OwnerRepository for InMemoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Owner>, AppError> {
        Ok(self.store.read().await.owners.get(&id).cloned())
    }

    async fn find_by_last_name_prefix(
        &self,
        prefix: &str,
        page: PageRequest,
    ) -> Result<Page<Owner>, AppError> {
        let store = self.store.read().await;
        let matches = store.sorted_owners(prefix);
        Ok(Page::slice(&matches, page).map(Owner::clone))
    }

    async fn save(&self, owner: Owner) -> Result<Owner, AppError> {
        self.store.write().await.put(owner)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.store.write().await.owners.remove(&id).is_some())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.store.read().await.owners.len() as i64)
    }

    async fn find_all(&self) -> Result<Vec<Owner>, AppError> {
        let store = self.store.read().await;
        Ok(store.sorted_owners("").into_iter().cloned().collect())
    }
}

#[async_trait]
impl PetTypeRepository for InMemoryRepository {
    async fn find_pet_types(&self) -> Result<Vec<PetType>, AppError> {
        Ok(self.store.read().await.pet_types.clone())
    }
}

#[async_trait]
impl VetRepository for InMemoryRepository {
    async fn find_all(&self) -> Result<Vec<Vet>, AppError> {
        Ok(self.store.read().await.vets.clone())
    }

    async fn find_page(&self, page: PageRequest) -> Result<Page<Vet>, AppError> {
        Ok(Page::slice(&self.store.read().await.vets, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(first_name: &str, last_name: &str) -> OwnerDetails {
        OwnerDetails {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            address: "1 Road".to_string(),
            city: "Town".to_string(),
            telephone: "0123456789".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_assigns_ids_to_whole_tree() {
        let repo = InMemoryRepository::new();
        let mut owner = Owner::new(details("Ann", "Lee"));
        owner.add_pet(Pet::new("Rex", NaiveDate::from_ymd_opt(2020, 1, 1), None));

        let saved = repo.save(owner).await.unwrap();
        let pet_id = saved.pets()[0].id().unwrap();
        assert_eq!(saved.id(), Some(1));

        let mut saved = saved;
        saved
            .add_visit(
                Some(pet_id),
                Some(Visit::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "shots")),
            )
            .unwrap();
        let saved = repo.save(saved).await.unwrap();

        let reloaded = OwnerRepository::find_by_id(&repo, 1).await.unwrap().unwrap();
        assert_eq!(reloaded, saved);
        assert!(!reloaded.pets()[0].visits()[0].is_new());
    }

    #[tokio::test]
    async fn test_save_unknown_owner_id_fails() {
        let repo = InMemoryRepository::new();
        let ghost = Owner::persisted(42, details("Ann", "Lee"), Vec::new());

        assert!(matches!(
            repo.save(ghost).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_prefix_search_is_case_sensitive_and_paged() {
        let repo = InMemoryRepository::new();
        for (first, last) in [("A", "Smith"), ("B", "Smithson"), ("C", "smith"), ("D", "Jones")] {
            repo.save(Owner::new(details(first, last))).await.unwrap();
        }

        let page = repo
            .find_by_last_name_prefix("Smith", PageRequest::new(1, 1))
            .await
            .unwrap();
        assert_eq!(page.total_items, 2);
        assert_eq!(page.items[0].first_name, "A");

        let all = repo
            .find_by_last_name_prefix("", PageRequest::new(1, 10))
            .await
            .unwrap();
        assert_eq!(all.total_items, 4);
    }

    #[tokio::test]
    async fn test_delete_removes_owner() {
        let repo = InMemoryRepository::new();
        let saved = repo.save(Owner::new(details("Ann", "Lee"))).await.unwrap();
        let id = saved.id().unwrap();

        assert!(repo.delete_by_id(id).await.unwrap());
        assert!(!repo.delete_by_id(id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sample_data() {
        let repo = InMemoryRepository::with_sample_data().unwrap();

        assert_eq!(repo.count().await.unwrap(), 10);
        assert_eq!(repo.find_pet_types().await.unwrap().len(), 6);
        assert_eq!(VetRepository::find_all(&repo).await.unwrap().len(), 6);

        let davis = repo
            .find_by_last_name_prefix("Davis", PageRequest::first(5))
            .await
            .unwrap();
        assert_eq!(davis.total_items, 2);

        let coleman = repo
            .find_by_last_name_prefix("Coleman", PageRequest::first(5))
            .await
            .unwrap();
        let max = coleman.items[0].find_pet_by_name("Max", false).unwrap();
        assert_eq!(max.visits().len(), 2);
    }
}
