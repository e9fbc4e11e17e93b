use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::repositories::base::Entity;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewSkill {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct SkillPatch {
    pub name: Option<String>,
}

impl Entity for Skill {
    type Create = NewSkill;
    type Update = SkillPatch;
    const NAME: &'static str = "Skill";

    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn build(id: i64, now: DateTime<Utc>, fields: NewSkill) -> Self {
        Self {
            id,
            name: fields.name,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn merge(&mut self, patch: SkillPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        self.updated_at = now;
    }

    fn tombstone(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
