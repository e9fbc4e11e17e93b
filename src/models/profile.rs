use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::repositories::base::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "proficiency_level", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobSeeker {
    pub id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub phone: Option<String>,
    pub experience_years: Option<i32>,
    pub education: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewJobSeeker {
    pub user_id: i64,
    pub full_name: String,
    pub phone: Option<String>,
    pub experience_years: Option<i32>,
    pub education: Option<String>,
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct JobSeekerPatch {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub experience_years: Option<i32>,
    pub education: Option<String>,
    pub resume_url: Option<String>,
}

impl Entity for JobSeeker {
    type Create = NewJobSeeker;
    type Update = JobSeekerPatch;
    const NAME: &'static str = "Job seeker profile";

    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn build(id: i64, now: DateTime<Utc>, fields: NewJobSeeker) -> Self {
        Self {
            id,
            user_id: fields.user_id,
            full_name: fields.full_name,
            phone: fields.phone,
            experience_years: fields.experience_years,
            education: fields.education,
            resume_url: fields.resume_url,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn merge(&mut self, patch: JobSeekerPatch, now: DateTime<Utc>) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
        if patch.experience_years.is_some() {
            self.experience_years = patch.experience_years;
        }
        if patch.education.is_some() {
            self.education = patch.education;
        }
        if patch.resume_url.is_some() {
            self.resume_url = patch.resume_url;
        }
        self.updated_at = now;
    }

    fn tombstone(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.user_id == other.user_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recruiter {
    pub id: i64,
    pub user_id: i64,
    pub company_name: String,
    pub company_website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewRecruiter {
    pub user_id: i64,
    pub company_name: String,
    pub company_website: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RecruiterPatch {
    pub company_name: Option<String>,
    pub company_website: Option<String>,
}

impl Entity for Recruiter {
    type Create = NewRecruiter;
    type Update = RecruiterPatch;
    const NAME: &'static str = "Recruiter profile";

    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn build(id: i64, now: DateTime<Utc>, fields: NewRecruiter) -> Self {
        Self {
            id,
            user_id: fields.user_id,
            company_name: fields.company_name,
            company_website: fields.company_website,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn merge(&mut self, patch: RecruiterPatch, now: DateTime<Utc>) {
        if let Some(company_name) = patch.company_name {
            self.company_name = company_name;
        }
        if patch.company_website.is_some() {
            self.company_website = patch.company_website;
        }
        self.updated_at = now;
    }

    fn tombstone(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.user_id == other.user_id
    }
}

/// Join row between a job seeker and a skill.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobSeekerSkill {
    pub job_seeker_id: i64,
    pub skill_id: i64,
    pub proficiency_level: ProficiencyLevel,
}
