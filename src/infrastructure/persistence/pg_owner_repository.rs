//! PostgreSQL implementation of the owner repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::debug;

use crate::domain::entities::{Owner, OwnerDetails, Pet, PetType, Visit};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repositories::OwnerRepository;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct OwnerRow {
    id: i64,
    first_name: String,
    last_name: String,
    address: String,
    city: String,
    telephone: String,
}

impl OwnerRow {
    fn into_parts(self) -> (i64, OwnerDetails) {
        (
            self.id,
            OwnerDetails {
                first_name: self.first_name,
                last_name: self.last_name,
                address: self.address,
                city: self.city,
                telephone: self.telephone,
            },
        )
    }
}

#[derive(Debug, FromRow)]
struct PetRow {
    id: i64,
    owner_id: i64,
    name: String,
    birth_date: Option<NaiveDate>,
    type_id: Option<i64>,
    type_name: Option<String>,
}

#[derive(Debug, FromRow)]
struct VisitRow {
    id: i64,
    pet_id: i64,
    visit_date: NaiveDate,
    description: String,
}

/// PostgreSQL repository for the owner aggregate.
///
/// An owner is read with two extra queries (pets, then visits) regardless of
/// how many owners are loaded. Saves run in a single transaction.
pub struct PgOwnerRepository {
    pool: Arc<PgPool>,
}

impl PgOwnerRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn assemble(&self, rows: Vec<OwnerRow>) -> Result<Vec<Owner>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let owner_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let pet_rows: Vec<PetRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.owner_id, p.name, p.birth_date,
                   t.id AS type_id, t.name AS type_name
            FROM pets p
            LEFT JOIN types t ON t.id = p.type_id
            WHERE p.owner_id = ANY($1)
            ORDER BY p.name, p.id
            "#,
        )
        .bind(&owner_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let pet_ids: Vec<i64> = pet_rows.iter().map(|r| r.id).collect();
        let visit_rows: Vec<VisitRow> = sqlx::query_as(
            r#"
            SELECT id, pet_id, visit_date, description
            FROM visits
            WHERE pet_id = ANY($1)
            ORDER BY visit_date, id
            "#,
        )
        .bind(&pet_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut visits_by_pet: HashMap<i64, Vec<Visit>> = HashMap::new();
        for row in visit_rows {
            visits_by_pet
                .entry(row.pet_id)
                .or_default()
                .push(Visit::persisted(row.id, row.visit_date, row.description));
        }

        let mut pets_by_owner: HashMap<i64, Vec<Pet>> = HashMap::new();
        for row in pet_rows {
            let pet_type = match (row.type_id, row.type_name) {
                (Some(id), Some(name)) => Some(PetType::new(id, name)),
                _ => None,
            };
            let visits = visits_by_pet.remove(&row.id).unwrap_or_default();
            pets_by_owner.entry(row.owner_id).or_default().push(Pet::persisted(
                row.id,
                row.name,
                row.birth_date,
                pet_type,
                visits,
            ));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let pets = pets_by_owner.remove(&row.id).unwrap_or_default();
                let (id, details) = row.into_parts();
                Owner::persisted(id, details, pets)
            })
            .collect())
    }

    async fn save_pets(
        tx: &mut Transaction<'_, Postgres>,
        owner_id: i64,
        pets: &mut [Pet],
    ) -> Result<(), AppError> {
        for pet in pets {
            let type_id = pet.pet_type.as_ref().map(|t| t.id);
            let pet_id = match pet.id() {
                None => {
                    let id: i64 = sqlx::query_scalar(
                        r#"
                        INSERT INTO pets (name, birth_date, type_id, owner_id)
                        VALUES ($1, $2, $3, $4)
                        RETURNING id
                        "#,
                    )
                    .bind(&pet.name)
                    .bind(pet.birth_date)
                    .bind(type_id)
                    .bind(owner_id)
                    .fetch_one(&mut **tx)
                    .await?;
                    pet.assign_id(id);
                    id
                }
                Some(id) => {
                    sqlx::query(
                        r#"
                        UPDATE pets
                        SET name = $1, birth_date = $2, type_id = $3
                        WHERE id = $4 AND owner_id = $5
                        "#,
                    )
                    .bind(&pet.name)
                    .bind(pet.birth_date)
                    .bind(type_id)
                    .bind(id)
                    .bind(owner_id)
                    .execute(&mut **tx)
                    .await?;
                    id
                }
            };

            for visit in pet.visits_mut().iter_mut().filter(|v| v.is_new()) {
                let id: i64 = sqlx::query_scalar(
                    r#"
                    INSERT INTO visits (pet_id, visit_date, description)
                    VALUES ($1, $2, $3)
                    RETURNING id
                    "#,
                )
                .bind(pet_id)
                .bind(visit.date)
                .bind(&visit.description)
                .fetch_one(&mut **tx)
                .await?;
                visit.assign_id(id);
            }
        }

        Ok(())
    }
}

#[async_trait]
impl OwnerRepository for PgOwnerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Owner>, AppError> {
        let row: Option<OwnerRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, address, city, telephone
            FROM owners
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(self.assemble(vec![row]).await?.pop())
    }

    async fn find_by_last_name_prefix(
        &self,
        prefix: &str,
        page: PageRequest,
    ) -> Result<Page<Owner>, AppError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM owners WHERE starts_with(last_name, $1)")
                .bind(prefix)
                .fetch_one(self.pool.as_ref())
                .await?;

        if total == 0 {
            return Ok(Page::empty(page));
        }

        let rows: Vec<OwnerRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, address, city, telephone
            FROM owners
            WHERE starts_with(last_name, $1)
            ORDER BY last_name, first_name, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(prefix)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool.as_ref())
        .await?;

        debug!(prefix, total, returned = rows.len(), "Owner prefix search");

        Ok(Page::new(self.assemble(rows).await?, page, total))
    }

    async fn save(&self, mut owner: Owner) -> Result<Owner, AppError> {
        let mut tx = self.pool.begin().await?;

        let owner_id = match owner.id() {
            None => {
                let id: i64 = sqlx::query_scalar(
                    r#"
                    INSERT INTO owners (first_name, last_name, address, city, telephone)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id
                    "#,
                )
                .bind(&owner.first_name)
                .bind(&owner.last_name)
                .bind(&owner.address)
                .bind(&owner.city)
                .bind(&owner.telephone)
                .fetch_one(&mut *tx)
                .await?;
                owner.assign_id(id);
                id
            }
            Some(id) => {
                let result = sqlx::query(
                    r#"
                    UPDATE owners
                    SET first_name = $1, last_name = $2, address = $3, city = $4, telephone = $5
                    WHERE id = $6
                    "#,
                )
                .bind(&owner.first_name)
                .bind(&owner.last_name)
                .bind(&owner.address)
                .bind(&owner.city)
                .bind(&owner.telephone)
                .bind(id)
                .execute(&mut *tx)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(AppError::entity_not_found("Owner", id));
                }
                id
            }
        };

        Self::save_pets(&mut tx, owner_id, owner.pets_mut()).await?;
        tx.commit().await?;

        Ok(owner)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM owners WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM owners")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(count)
    }

    async fn find_all(&self) -> Result<Vec<Owner>, AppError> {
        let rows: Vec<OwnerRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, address, city, telephone
            FROM owners
            ORDER BY last_name, first_name, id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        self.assemble(rows).await
    }
}
