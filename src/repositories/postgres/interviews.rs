use async_trait::async_trait;
use sqlx::PgPool;

use super::{PgMapped, PgStore};
use crate::error::Result;
use crate::models::interview::{Interview, InterviewPatch, NewInterview};
use crate::repositories::InterviewRepository;

const INTERVIEW_COLUMNS: &str =
    "id, application_id, interview_date, mode, result, created_at, updated_at, deleted_at";

#[async_trait]
impl PgMapped for Interview {
    const TABLE: &'static str = "interviews";
    const COLUMNS: &'static str = INTERVIEW_COLUMNS;

    async fn insert(pool: &PgPool, fields: NewInterview) -> Result<Self> {
        let sql = format!(
            "INSERT INTO interviews (application_id, interview_date, mode) \
             VALUES ($1, $2, $3) RETURNING {}",
            INTERVIEW_COLUMNS
        );
        let interview = sqlx::query_as::<_, Interview>(&sql)
            .bind(fields.application_id)
            .bind(fields.interview_date)
            .bind(fields.mode)
            .fetch_one(pool)
            .await?;
        Ok(interview)
    }

    async fn apply(pool: &PgPool, id: i64, patch: InterviewPatch) -> Result<Option<Self>> {
        let sql = format!(
            r#"
            UPDATE interviews
            SET
                interview_date = COALESCE($2, interview_date),
                mode = COALESCE($3, mode),
                result = COALESCE($4, result),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            INTERVIEW_COLUMNS
        );
        let interview = sqlx::query_as::<_, Interview>(&sql)
            .bind(id)
            .bind(patch.interview_date)
            .bind(patch.mode)
            .bind(patch.result)
            .fetch_optional(pool)
            .await?;
        Ok(interview)
    }
}

#[async_trait]
impl InterviewRepository for PgStore {
    async fn list_by_application(&self, application_id: i64) -> Result<Vec<Interview>> {
        let sql = format!(
            "SELECT {} FROM interviews WHERE application_id = $1 AND deleted_at IS NULL \
             ORDER BY interview_date",
            INTERVIEW_COLUMNS
        );
        let interviews = sqlx::query_as::<_, Interview>(&sql)
            .bind(application_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(interviews)
    }
}
