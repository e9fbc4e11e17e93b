use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use super::{PgMapped, PgStore};
use crate::error::{Error, Result};
use crate::models::job::{Job, JobPatch, JobSearch, JobStatus, NewJob};
use crate::repositories::JobRepository;

const JOB_COLUMNS: &str = "id, recruiter_id, title, description, location, salary_min, \
     salary_max, job_type, status, created_at, updated_at, deleted_at";

async fn insert_job<'e, X>(executor: X, fields: NewJob) -> Result<Job>
where
    X: PgExecutor<'e>,
{
    let sql = format!(
        r#"
        INSERT INTO jobs (recruiter_id, title, description, location, salary_min, salary_max, job_type, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {}
        "#,
        JOB_COLUMNS
    );
    let job = sqlx::query_as::<_, Job>(&sql)
        .bind(fields.recruiter_id)
        .bind(fields.title)
        .bind(fields.description)
        .bind(fields.location)
        .bind(fields.salary_min)
        .bind(fields.salary_max)
        .bind(fields.job_type)
        .bind(fields.status)
        .fetch_one(executor)
        .await?;
    Ok(job)
}

/// Escapes LIKE metacharacters so user input only ever matches literally.
fn like_pattern(raw: &str) -> String {
    let escaped = raw
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl PgMapped for Job {
    const TABLE: &'static str = "jobs";
    const COLUMNS: &'static str = JOB_COLUMNS;

    async fn insert(pool: &PgPool, fields: NewJob) -> Result<Self> {
        insert_job(pool, fields).await
    }

    async fn apply(pool: &PgPool, id: i64, patch: JobPatch) -> Result<Option<Self>> {
        let sql = format!(
            r#"
            UPDATE jobs
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                salary_min = COALESCE($5, salary_min),
                salary_max = COALESCE($6, salary_max),
                job_type = COALESCE($7, job_type),
                status = COALESCE($8, status),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            JOB_COLUMNS
        );
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.description)
            .bind(patch.location)
            .bind(patch.salary_min)
            .bind(patch.salary_max)
            .bind(patch.job_type)
            .bind(patch.status)
            .fetch_optional(pool)
            .await?;
        Ok(job)
    }
}

#[async_trait]
impl JobRepository for PgStore {
    async fn create_with_skills(&self, fields: NewJob, skill_ids: &[i64]) -> Result<Job> {
        let mut wanted: Vec<i64> = skill_ids.to_vec();
        wanted.sort_unstable();
        wanted.dedup();

        let mut tx = self.pool.begin().await?;

        if !wanted.is_empty() {
            let found: Vec<i64> = sqlx::query_scalar(
                "SELECT id FROM skills WHERE id = ANY($1) AND deleted_at IS NULL",
            )
            .bind(&wanted)
            .fetch_all(&mut *tx)
            .await?;

            if let Some(missing) = wanted.iter().find(|id| !found.contains(id)) {
                tx.rollback().await?;
                return Err(Error::NotFound(format!("Skill {} not found", missing)));
            }
        }

        let job = insert_job(&mut *tx, fields).await?;

        if !wanted.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO job_skills (job_id, skill_id)
                SELECT $1, skill_id FROM UNNEST($2::BIGINT[]) AS skill_id
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(job.id)
            .bind(&wanted)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(job)
    }

    async fn skill_ids(&self, job_id: i64) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar(
            "SELECT skill_id FROM job_skills WHERE job_id = $1 ORDER BY skill_id",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn search(&self, search: &JobSearch) -> Result<Vec<Job>> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM jobs WHERE deleted_at IS NULL AND status = ",
            JOB_COLUMNS
        ));
        query.push_bind(JobStatus::Open);

        if let Some(location) = search.location_filter() {
            query
                .push(" AND location ILIKE ")
                .push_bind(like_pattern(location));
        }
        if let Some(job_type) = search.job_type {
            query.push(" AND job_type = ").push_bind(job_type);
        }
        if let Some(min_salary) = search.min_salary_filter() {
            query.push(" AND salary_min >= ").push_bind(min_salary);
        }

        query
            .push(" ORDER BY id LIMIT ")
            .push_bind(search.limit)
            .push(" OFFSET ")
            .push_bind(search.offset);

        let jobs = query
            .build_query_as::<Job>()
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    async fn list_by_recruiter(
        &self,
        recruiter_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Job>> {
        let sql = format!(
            r#"
            SELECT {} FROM jobs
            WHERE recruiter_id = $1 AND deleted_at IS NULL
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
            JOB_COLUMNS
        );
        let jobs = sqlx::query_as::<_, Job>(&sql)
            .bind(recruiter_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    async fn count_by_status(&self, status: JobStatus) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM jobs WHERE status = $1 AND deleted_at IS NULL",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
