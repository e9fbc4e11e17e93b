use async_trait::async_trait;
use sqlx::PgPool;

use super::{PgMapped, PgStore};
use crate::error::{Error, Result};
use crate::models::profile::{
    JobSeeker, JobSeekerPatch, JobSeekerSkill, NewJobSeeker, NewRecruiter, ProficiencyLevel,
    Recruiter, RecruiterPatch,
};
use crate::repositories::{Entity, JobSeekerRepository, RecruiterRepository};

const JOB_SEEKER_COLUMNS: &str = "id, user_id, full_name, phone, experience_years, education, \
     resume_url, created_at, updated_at, deleted_at";

const RECRUITER_COLUMNS: &str =
    "id, user_id, company_name, company_website, created_at, updated_at, deleted_at";

#[async_trait]
impl PgMapped for JobSeeker {
    const TABLE: &'static str = "job_seekers";
    const COLUMNS: &'static str = JOB_SEEKER_COLUMNS;

    async fn insert(pool: &PgPool, fields: NewJobSeeker) -> Result<Self> {
        let sql = format!(
            r#"
            INSERT INTO job_seekers (user_id, full_name, phone, experience_years, education, resume_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            JOB_SEEKER_COLUMNS
        );
        let profile = sqlx::query_as::<_, JobSeeker>(&sql)
            .bind(fields.user_id)
            .bind(fields.full_name)
            .bind(fields.phone)
            .bind(fields.experience_years)
            .bind(fields.education)
            .bind(fields.resume_url)
            .fetch_one(pool)
            .await?;
        Ok(profile)
    }

    async fn apply(pool: &PgPool, id: i64, patch: JobSeekerPatch) -> Result<Option<Self>> {
        let sql = format!(
            r#"
            UPDATE job_seekers
            SET
                full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                experience_years = COALESCE($4, experience_years),
                education = COALESCE($5, education),
                resume_url = COALESCE($6, resume_url),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            JOB_SEEKER_COLUMNS
        );
        let profile = sqlx::query_as::<_, JobSeeker>(&sql)
            .bind(id)
            .bind(patch.full_name)
            .bind(patch.phone)
            .bind(patch.experience_years)
            .bind(patch.education)
            .bind(patch.resume_url)
            .fetch_optional(pool)
            .await?;
        Ok(profile)
    }
}

#[async_trait]
impl JobSeekerRepository for PgStore {
    async fn find_by_user(&self, user_id: i64) -> Result<Option<JobSeeker>> {
        let sql = format!(
            "SELECT {} FROM job_seekers WHERE user_id = $1 AND deleted_at IS NULL",
            JOB_SEEKER_COLUMNS
        );
        let profile = sqlx::query_as::<_, JobSeeker>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    async fn upsert_skill(
        &self,
        job_seeker_id: i64,
        skill_id: i64,
        level: ProficiencyLevel,
    ) -> Result<JobSeekerSkill> {
        let seeker_exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM job_seekers WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(job_seeker_id)
        .fetch_one(&self.pool)
        .await?;
        if !seeker_exists {
            return Err(Error::not_found(JobSeeker::NAME));
        }

        let skill_exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM skills WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(skill_id)
        .fetch_one(&self.pool)
        .await?;
        if !skill_exists {
            return Err(Error::NotFound(format!("Skill {} not found", skill_id)));
        }

        let link = sqlx::query_as::<_, JobSeekerSkill>(
            r#"
            INSERT INTO job_seeker_skills (job_seeker_id, skill_id, proficiency_level)
            VALUES ($1, $2, $3)
            ON CONFLICT (job_seeker_id, skill_id)
            DO UPDATE SET proficiency_level = EXCLUDED.proficiency_level
            RETURNING job_seeker_id, skill_id, proficiency_level
            "#,
        )
        .bind(job_seeker_id)
        .bind(skill_id)
        .bind(level)
        .fetch_one(&self.pool)
        .await?;
        Ok(link)
    }

    async fn skills(&self, job_seeker_id: i64) -> Result<Vec<JobSeekerSkill>> {
        let links = sqlx::query_as::<_, JobSeekerSkill>(
            r#"
            SELECT job_seeker_id, skill_id, proficiency_level
            FROM job_seeker_skills
            WHERE job_seeker_id = $1
            ORDER BY skill_id
            "#,
        )
        .bind(job_seeker_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(links)
    }
}

#[async_trait]
impl PgMapped for Recruiter {
    const TABLE: &'static str = "recruiters";
    const COLUMNS: &'static str = RECRUITER_COLUMNS;

    async fn insert(pool: &PgPool, fields: NewRecruiter) -> Result<Self> {
        let sql = format!(
            "INSERT INTO recruiters (user_id, company_name, company_website) \
             VALUES ($1, $2, $3) RETURNING {}",
            RECRUITER_COLUMNS
        );
        let profile = sqlx::query_as::<_, Recruiter>(&sql)
            .bind(fields.user_id)
            .bind(fields.company_name)
            .bind(fields.company_website)
            .fetch_one(pool)
            .await?;
        Ok(profile)
    }

    async fn apply(pool: &PgPool, id: i64, patch: RecruiterPatch) -> Result<Option<Self>> {
        let sql = format!(
            r#"
            UPDATE recruiters
            SET
                company_name = COALESCE($2, company_name),
                company_website = COALESCE($3, company_website),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            RECRUITER_COLUMNS
        );
        let profile = sqlx::query_as::<_, Recruiter>(&sql)
            .bind(id)
            .bind(patch.company_name)
            .bind(patch.company_website)
            .fetch_optional(pool)
            .await?;
        Ok(profile)
    }
}

#[async_trait]
impl RecruiterRepository for PgStore {
    async fn find_by_user(&self, user_id: i64) -> Result<Option<Recruiter>> {
        let sql = format!(
            "SELECT {} FROM recruiters WHERE user_id = $1 AND deleted_at IS NULL",
            RECRUITER_COLUMNS
        );
        let profile = sqlx::query_as::<_, Recruiter>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }
}
