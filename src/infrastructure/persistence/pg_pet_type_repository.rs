//! PostgreSQL implementation of the pet type repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::PetType;
use crate::domain::repositories::PetTypeRepository;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct PetTypeRow {
    id: i64,
    name: String,
}

pub struct PgPetTypeRepository {
    pool: Arc<PgPool>,
}

impl PgPetTypeRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetTypeRepository for PgPetTypeRepository {
    async fn find_pet_types(&self) -> Result<Vec<PetType>, AppError> {
        let rows: Vec<PetTypeRow> = sqlx::query_as("SELECT id, name FROM types ORDER BY name")
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| PetType::new(r.id, r.name))
            .collect())
    }
}
