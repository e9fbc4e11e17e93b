use crate::error::{Error, Result};
use crate::models::skill::{NewSkill, Skill};
use crate::repositories::Store;

#[derive(Clone)]
pub struct SkillService {
    store: Store,
}

impl SkillService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create(&self, name: &str) -> Result<Skill> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::BadRequest("Skill name must not be empty".to_string()));
        }
        if self.store.skills.find_by_name(name).await?.is_some() {
            return Err(Error::Conflict(format!("Skill '{}' already exists", name)));
        }

        let skill = self
            .store
            .skills
            .create(NewSkill {
                name: name.to_string(),
            })
            .await?;
        tracing::info!(skill_id = skill.id, name = %skill.name, "Skill created");
        Ok(skill)
    }

    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Skill>> {
        self.store.skills.list(offset, limit).await
    }
}
