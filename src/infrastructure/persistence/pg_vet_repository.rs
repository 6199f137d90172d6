//! PostgreSQL implementation of the vet repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::domain::entities::{Specialty, Vet};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repositories::VetRepository;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct VetRow {
    id: i64,
    first_name: String,
    last_name: String,
}

#[derive(Debug, FromRow)]
struct VetSpecialtyRow {
    vet_id: i64,
    id: i64,
    name: String,
}

pub struct PgVetRepository {
    pool: Arc<PgPool>,
}

impl PgVetRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn with_specialties(&self, rows: Vec<VetRow>) -> Result<Vec<Vet>, AppError> {
        let vet_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let specialty_rows: Vec<VetSpecialtyRow> = sqlx::query_as(
            r#"
            SELECT vs.vet_id, s.id, s.name
            FROM vet_specialties vs
            JOIN specialties s ON s.id = vs.specialty_id
            WHERE vs.vet_id = ANY($1)
            "#,
        )
        .bind(&vet_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut by_vet: HashMap<i64, Vec<Specialty>> = HashMap::new();
        for row in specialty_rows {
            by_vet
                .entry(row.vet_id)
                .or_default()
                .push(Specialty::new(row.id, row.name));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let mut vet = Vet::new(row.id, row.first_name, row.last_name);
                for specialty in by_vet.remove(&row.id).unwrap_or_default() {
                    vet.add_specialty(specialty);
                }
                vet
            })
            .collect())
    }
}

#[async_trait]
impl VetRepository for PgVetRepository {
    async fn find_all(&self) -> Result<Vec<Vet>, AppError> {
        let rows: Vec<VetRow> = sqlx::query_as(
            "SELECT id, first_name, last_name FROM vets ORDER BY last_name, first_name, id",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        self.with_specialties(rows).await
    }

    async fn find_page(&self, page: PageRequest) -> Result<Page<Vet>, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vets")
            .fetch_one(self.pool.as_ref())
            .await?;

        let rows: Vec<VetRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name
            FROM vets
            ORDER BY last_name, first_name, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(Page::new(self.with_specialties(rows).await?, page, total))
    }
}
