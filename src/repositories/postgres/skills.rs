use async_trait::async_trait;
use sqlx::PgPool;

use super::{PgMapped, PgStore};
use crate::error::Result;
use crate::models::skill::{NewSkill, Skill, SkillPatch};
use crate::repositories::SkillRepository;

const SKILL_COLUMNS: &str = "id, name, created_at, updated_at, deleted_at";

#[async_trait]
impl PgMapped for Skill {
    const TABLE: &'static str = "skills";
    const COLUMNS: &'static str = SKILL_COLUMNS;

    async fn insert(pool: &PgPool, fields: NewSkill) -> Result<Self> {
        let sql = format!(
            "INSERT INTO skills (name) VALUES ($1) RETURNING {}",
            SKILL_COLUMNS
        );
        let skill = sqlx::query_as::<_, Skill>(&sql)
            .bind(fields.name)
            .fetch_one(pool)
            .await?;
        Ok(skill)
    }

    async fn apply(pool: &PgPool, id: i64, patch: SkillPatch) -> Result<Option<Self>> {
        let sql = format!(
            "UPDATE skills SET name = COALESCE($2, name), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            SKILL_COLUMNS
        );
        let skill = sqlx::query_as::<_, Skill>(&sql)
            .bind(id)
            .bind(patch.name)
            .fetch_optional(pool)
            .await?;
        Ok(skill)
    }
}

#[async_trait]
impl SkillRepository for PgStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Skill>> {
        let sql = format!(
            "SELECT {} FROM skills WHERE name = $1 AND deleted_at IS NULL",
            SKILL_COLUMNS
        );
        let skill = sqlx::query_as::<_, Skill>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(skill)
    }
}
