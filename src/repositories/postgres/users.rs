use async_trait::async_trait;
use sqlx::PgPool;

use super::{PgMapped, PgStore};
use crate::error::Result;
use crate::models::user::{NewUser, User, UserPatch};
use crate::repositories::UserRepository;

const USER_COLUMNS: &str =
    "id, email, password_hash, role, is_active, created_at, updated_at, deleted_at";

#[async_trait]
impl PgMapped for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static str = USER_COLUMNS;

    async fn insert(pool: &PgPool, fields: NewUser) -> Result<Self> {
        let sql = format!(
            "INSERT INTO users (email, password_hash, role, is_active) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(fields.email)
            .bind(fields.password_hash)
            .bind(fields.role)
            .bind(fields.is_active)
            .fetch_one(pool)
            .await?;
        Ok(user)
    }

    async fn apply(pool: &PgPool, id: i64, patch: UserPatch) -> Result<Option<Self>> {
        let sql = format!(
            r#"
            UPDATE users
            SET
                email = COALESCE($2, email),
                password_hash = COALESCE($3, password_hash),
                role = COALESCE($4, role),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(patch.email)
            .bind(patch.password_hash)
            .bind(patch.role)
            .bind(patch.is_active)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!(
            "SELECT {} FROM users WHERE email = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
