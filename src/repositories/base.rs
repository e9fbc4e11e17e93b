//! Generic CRUD contract shared by every soft-deletable entity.
//!
//! Reads never return tombstoned rows. There is deliberately no hard delete:
//! `soft_delete` stamps `deleted_at` and the row stays in storage for audit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

/// Explicit field mapping for an entity, used by stores that materialise rows
/// themselves instead of delegating to SQL.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Fields supplied on insert.
    type Create: Send + 'static;
    /// Partial payload; `None` fields are left untouched.
    type Update: Send + 'static;

    const NAME: &'static str;

    fn id(&self) -> i64;
    fn deleted_at(&self) -> Option<DateTime<Utc>>;
    fn build(id: i64, now: DateTime<Utc>, fields: Self::Create) -> Self;
    fn merge(&mut self, patch: Self::Update, now: DateTime<Utc>);
    fn tombstone(&mut self, at: DateTime<Utc>);

    /// Mirrors the table's unique constraints among live rows.
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }

    fn is_live(&self) -> bool {
        self.deleted_at().is_none()
    }
}

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn get(&self, id: i64) -> Result<Option<E>>;

    /// Live rows ordered by insertion.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<E>>;

    async fn create(&self, fields: E::Create) -> Result<E>;

    /// Fails with `NotFound` when the row is missing or tombstoned.
    async fn update(&self, id: i64, patch: E::Update) -> Result<E>;

    /// Returns the tombstoned row, or `None` if there was no live row.
    async fn soft_delete(&self, id: i64) -> Result<Option<E>>;
}
