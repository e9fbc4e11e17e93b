//! Postgres-backed repositories.
//!
//! Single-statement writes rely on statement atomicity; multi-row writes
//! (`create_with_skills`) run in an explicit transaction that rolls back on
//! any error.

mod activity_logs;
mod applications;
mod interviews;
mod jobs;
mod profiles;
mod skills;
mod users;

use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, PgPool};

use super::base::{Entity, Repository};
use crate::error::{Error, Result};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Table metadata plus the per-entity insert/update statements.
#[async_trait]
pub trait PgMapped: Entity + for<'r> FromRow<'r, PgRow> + Unpin {
    const TABLE: &'static str;
    const COLUMNS: &'static str;

    async fn insert(pool: &PgPool, fields: Self::Create) -> Result<Self>;

    /// `None` when there is no live row with this id.
    async fn apply(pool: &PgPool, id: i64, patch: Self::Update) -> Result<Option<Self>>;
}

#[async_trait]
impl<E: PgMapped> Repository<E> for PgStore {
    async fn get(&self, id: i64) -> Result<Option<E>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1 AND deleted_at IS NULL",
            E::COLUMNS,
            E::TABLE
        );
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<E>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE deleted_at IS NULL ORDER BY id LIMIT $1 OFFSET $2",
            E::COLUMNS,
            E::TABLE
        );
        let rows = sqlx::query_as::<_, E>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create(&self, fields: E::Create) -> Result<E> {
        E::insert(&self.pool, fields).await
    }

    async fn update(&self, id: i64, patch: E::Update) -> Result<E> {
        E::apply(&self.pool, id, patch)
            .await?
            .ok_or_else(|| Error::not_found(E::NAME))
    }

    async fn soft_delete(&self, id: i64) -> Result<Option<E>> {
        let sql = format!(
            "UPDATE {} SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            E::TABLE,
            E::COLUMNS
        );
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
