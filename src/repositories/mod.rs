pub mod base;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{
    activity_log::{ActivityLog, NewActivityLog},
    application::Application,
    interview::Interview,
    job::{Job, JobSearch, NewJob, JobStatus},
    profile::{JobSeeker, JobSeekerSkill, ProficiencyLevel, Recruiter},
    skill::Skill,
    user::User,
};

pub use base::{Entity, Repository};

#[async_trait]
pub trait UserRepository: Repository<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

#[async_trait]
pub trait JobSeekerRepository: Repository<JobSeeker> {
    async fn find_by_user(&self, user_id: i64) -> Result<Option<JobSeeker>>;

    /// Adds or replaces the proficiency for one skill. Unknown skills fail
    /// with `NotFound`.
    async fn upsert_skill(
        &self,
        job_seeker_id: i64,
        skill_id: i64,
        level: ProficiencyLevel,
    ) -> Result<JobSeekerSkill>;

    async fn skills(&self, job_seeker_id: i64) -> Result<Vec<JobSeekerSkill>>;
}

#[async_trait]
pub trait RecruiterRepository: Repository<Recruiter> {
    async fn find_by_user(&self, user_id: i64) -> Result<Option<Recruiter>>;
}

#[async_trait]
pub trait JobRepository: Repository<Job> {
    /// Inserts the job and one `job_skills` row per skill id as one unit.
    /// Any unknown skill id fails with `NotFound` and nothing is written.
    async fn create_with_skills(&self, fields: NewJob, skill_ids: &[i64]) -> Result<Job>;

    async fn skill_ids(&self, job_id: i64) -> Result<Vec<i64>>;

    async fn search(&self, search: &JobSearch) -> Result<Vec<Job>>;

    async fn list_by_recruiter(
        &self,
        recruiter_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Job>>;

    async fn count_by_status(&self, status: JobStatus) -> Result<i64>;
}

#[async_trait]
pub trait ApplicationRepository: Repository<Application> {
    async fn find_by_pair(&self, job_id: i64, job_seeker_id: i64)
        -> Result<Option<Application>>;

    async fn list_by_job_seeker(
        &self,
        job_seeker_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Application>>;

    async fn list_by_job(&self, job_id: i64, offset: i64, limit: i64)
        -> Result<Vec<Application>>;
}

#[async_trait]
pub trait SkillRepository: Repository<Skill> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Skill>>;
}

#[async_trait]
pub trait InterviewRepository: Repository<Interview> {
    async fn list_by_application(&self, application_id: i64) -> Result<Vec<Interview>>;
}

/// Append-only; there is no update or delete.
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn append(&self, entry: NewActivityLog) -> Result<ActivityLog>;

    async fn list_for_entity(&self, entity_type: &str, entity_id: i64)
        -> Result<Vec<ActivityLog>>;
}

/// Every repository the services need, behind one cloneable handle.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserRepository>,
    pub job_seekers: Arc<dyn JobSeekerRepository>,
    pub recruiters: Arc<dyn RecruiterRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub skills: Arc<dyn SkillRepository>,
    pub interviews: Arc<dyn InterviewRepository>,
    pub activity_logs: Arc<dyn ActivityLogRepository>,
}

impl Store {
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: UserRepository
            + JobSeekerRepository
            + RecruiterRepository
            + JobRepository
            + ApplicationRepository
            + SkillRepository
            + InterviewRepository
            + ActivityLogRepository
            + 'static,
    {
        Self {
            users: backend.clone(),
            job_seekers: backend.clone(),
            recruiters: backend.clone(),
            jobs: backend.clone(),
            applications: backend.clone(),
            skills: backend.clone(),
            interviews: backend.clone(),
            activity_logs: backend,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::from_backend(Arc::new(postgres::PgStore::new(pool)))
    }

    pub fn in_memory() -> (Self, Arc<memory::MemoryStore>) {
        let backend = Arc::new(memory::MemoryStore::new());
        (Self::from_backend(backend.clone()), backend)
    }
}
