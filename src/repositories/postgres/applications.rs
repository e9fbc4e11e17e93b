use async_trait::async_trait;
use sqlx::PgPool;

use super::{PgMapped, PgStore};
use crate::error::Result;
use crate::models::application::{Application, ApplicationPatch, NewApplication};
use crate::repositories::ApplicationRepository;

const APPLICATION_COLUMNS: &str =
    "id, job_id, job_seeker_id, status, created_at, updated_at, deleted_at";

#[async_trait]
impl PgMapped for Application {
    const TABLE: &'static str = "applications";
    const COLUMNS: &'static str = APPLICATION_COLUMNS;

    /// A concurrent duplicate hits `uq_applications_job_seeker_live` and
    /// surfaces as `Conflict`.
    async fn insert(pool: &PgPool, fields: NewApplication) -> Result<Self> {
        let sql = format!(
            "INSERT INTO applications (job_id, job_seeker_id) VALUES ($1, $2) RETURNING {}",
            APPLICATION_COLUMNS
        );
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(fields.job_id)
            .bind(fields.job_seeker_id)
            .fetch_one(pool)
            .await?;
        Ok(application)
    }

    async fn apply(pool: &PgPool, id: i64, patch: ApplicationPatch) -> Result<Option<Self>> {
        let sql = format!(
            r#"
            UPDATE applications
            SET status = COALESCE($2, status), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        );
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .bind(patch.status)
            .fetch_optional(pool)
            .await?;
        Ok(application)
    }
}

#[async_trait]
impl ApplicationRepository for PgStore {
    async fn find_by_pair(
        &self,
        job_id: i64,
        job_seeker_id: i64,
    ) -> Result<Option<Application>> {
        let sql = format!(
            r#"
            SELECT {} FROM applications
            WHERE job_id = $1 AND job_seeker_id = $2 AND deleted_at IS NULL
            "#,
            APPLICATION_COLUMNS
        );
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(job_id)
            .bind(job_seeker_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(application)
    }

    async fn list_by_job_seeker(
        &self,
        job_seeker_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Application>> {
        let sql = format!(
            r#"
            SELECT {} FROM applications
            WHERE job_seeker_id = $1 AND deleted_at IS NULL
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
            APPLICATION_COLUMNS
        );
        let applications = sqlx::query_as::<_, Application>(&sql)
            .bind(job_seeker_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(applications)
    }

    async fn list_by_job(
        &self,
        job_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Application>> {
        let sql = format!(
            r#"
            SELECT {} FROM applications
            WHERE job_id = $1 AND deleted_at IS NULL
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
            APPLICATION_COLUMNS
        );
        let applications = sqlx::query_as::<_, Application>(&sql)
            .bind(job_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(applications)
    }
}
