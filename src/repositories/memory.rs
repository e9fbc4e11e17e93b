//! Process-local store with the same contract as the Postgres one.
//!
//! All tables sit behind a single lock, so every operation (including the
//! multi-row `create_with_skills`) is atomic. Unique constraints are mirrored
//! through [`Entity::conflicts_with`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::{
    base::{Entity, Repository},
    ActivityLogRepository, ApplicationRepository, InterviewRepository, JobRepository,
    JobSeekerRepository, RecruiterRepository, SkillRepository, UserRepository,
};
use crate::error::{Error, Result};
use crate::models::{
    activity_log::{ActivityLog, NewActivityLog},
    application::Application,
    interview::Interview,
    job::{Job, JobSearch, JobStatus, NewJob},
    profile::{JobSeeker, JobSeekerSkill, ProficiencyLevel, Recruiter},
    skill::Skill,
    user::User,
};

pub struct Table<E> {
    rows: Vec<E>,
    next_id: i64,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E: Entity> Table<E> {
    fn live(&self) -> impl Iterator<Item = &E> {
        self.rows.iter().filter(|row| row.is_live())
    }

    fn get(&self, id: i64) -> Option<&E> {
        self.live().find(|row| row.id() == id)
    }

    fn get_any(&self, id: i64) -> Option<&E> {
        self.rows.iter().find(|row| row.id() == id)
    }

    fn page(&self, offset: i64, limit: i64) -> Vec<E> {
        self.live()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect()
    }

    fn ensure_unique(&self, candidate: &E) -> Result<()> {
        let clash = self
            .live()
            .any(|row| row.id() != candidate.id() && candidate.conflicts_with(row));
        if clash {
            return Err(Error::Conflict(format!("{} already exists", E::NAME)));
        }
        Ok(())
    }

    fn insert(&mut self, fields: E::Create, now: DateTime<Utc>) -> Result<E> {
        let candidate = E::build(self.next_id + 1, now, fields);
        self.ensure_unique(&candidate)?;
        self.next_id += 1;
        self.rows.push(candidate.clone());
        Ok(candidate)
    }

    fn update(&mut self, id: i64, patch: E::Update, now: DateTime<Utc>) -> Result<E> {
        let mut updated = self.get(id).cloned().ok_or_else(|| Error::not_found(E::NAME))?;
        updated.merge(patch, now);
        self.ensure_unique(&updated)?;
        if let Some(slot) = self.rows.iter_mut().find(|row| row.id() == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    fn soft_delete(&mut self, id: i64, now: DateTime<Utc>) -> Option<E> {
        let slot = self
            .rows
            .iter_mut()
            .find(|row| row.id() == id && row.is_live())?;
        slot.tombstone(now);
        Some(slot.clone())
    }
}

#[derive(Default)]
pub struct Tables {
    users: Table<User>,
    job_seekers: Table<JobSeeker>,
    recruiters: Table<Recruiter>,
    jobs: Table<Job>,
    applications: Table<Application>,
    skills: Table<Skill>,
    interviews: Table<Interview>,
    job_skills: Vec<(i64, i64)>,
    job_seeker_skills: Vec<JobSeekerSkill>,
    activity_logs: Vec<ActivityLog>,
}

pub trait HasTable<E> {
    fn table(&self) -> &Table<E>;
    fn table_mut(&mut self) -> &mut Table<E>;
}

macro_rules! has_table {
    ($($field:ident: $entity:ty),* $(,)?) => {
        $(
            impl HasTable<$entity> for Tables {
                fn table(&self) -> &Table<$entity> {
                    &self.$field
                }

                fn table_mut(&mut self) -> &mut Table<$entity> {
                    &mut self.$field
                }
            }
        )*
    };
}

has_table!(
    users: User,
    job_seekers: JobSeeker,
    recruiters: Recruiter,
    jobs: Job,
    applications: Application,
    skills: Skill,
    interviews: Interview,
);

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bypasses the tombstone filter. Not part of the repository contract;
    /// used for audits and tests.
    pub async fn get_including_deleted<E>(&self, id: i64) -> Option<E>
    where
        E: Entity,
        Tables: HasTable<E>,
    {
        let tables = self.tables.lock().await;
        <Tables as HasTable<E>>::table(&tables).get_any(id).cloned()
    }

    pub async fn count_rows<E>(&self) -> usize
    where
        E: Entity,
        Tables: HasTable<E>,
    {
        let tables = self.tables.lock().await;
        <Tables as HasTable<E>>::table(&tables).rows.len()
    }
}

#[async_trait]
impl<E> Repository<E> for MemoryStore
where
    E: Entity,
    Tables: HasTable<E>,
{
    async fn get(&self, id: i64) -> Result<Option<E>> {
        let tables = self.tables.lock().await;
        Ok(<Tables as HasTable<E>>::table(&tables).get(id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<E>> {
        let tables = self.tables.lock().await;
        Ok(<Tables as HasTable<E>>::table(&tables).page(offset, limit))
    }

    async fn create(&self, fields: E::Create) -> Result<E> {
        let mut tables = self.tables.lock().await;
        <Tables as HasTable<E>>::table_mut(&mut tables).insert(fields, Utc::now())
    }

    async fn update(&self, id: i64, patch: E::Update) -> Result<E> {
        let mut tables = self.tables.lock().await;
        <Tables as HasTable<E>>::table_mut(&mut tables).update(id, patch, Utc::now())
    }

    async fn soft_delete(&self, id: i64) -> Result<Option<E>> {
        let mut tables = self.tables.lock().await;
        Ok(<Tables as HasTable<E>>::table_mut(&mut tables).soft_delete(id, Utc::now()))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.lock().await;
        let user = tables.users.live().find(|u| u.email == email).cloned();
        Ok(user)
    }
}

#[async_trait]
impl JobSeekerRepository for MemoryStore {
    async fn find_by_user(&self, user_id: i64) -> Result<Option<JobSeeker>> {
        let tables = self.tables.lock().await;
        let profile = tables
            .job_seekers
            .live()
            .find(|s| s.user_id == user_id)
            .cloned();
        Ok(profile)
    }

    async fn upsert_skill(
        &self,
        job_seeker_id: i64,
        skill_id: i64,
        level: ProficiencyLevel,
    ) -> Result<JobSeekerSkill> {
        let mut tables = self.tables.lock().await;
        if tables.job_seekers.get(job_seeker_id).is_none() {
            return Err(Error::not_found(JobSeeker::NAME));
        }
        if tables.skills.get(skill_id).is_none() {
            return Err(Error::NotFound(format!("Skill {} not found", skill_id)));
        }

        let link = JobSeekerSkill {
            job_seeker_id,
            skill_id,
            proficiency_level: level,
        };
        let links = &mut tables.job_seeker_skills;
        match links
            .iter()
            .position(|l| l.job_seeker_id == job_seeker_id && l.skill_id == skill_id)
        {
            Some(idx) => links[idx].proficiency_level = level,
            None => links.push(link.clone()),
        }
        Ok(link)
    }

    async fn skills(&self, job_seeker_id: i64) -> Result<Vec<JobSeekerSkill>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .job_seeker_skills
            .iter()
            .filter(|l| l.job_seeker_id == job_seeker_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RecruiterRepository for MemoryStore {
    async fn find_by_user(&self, user_id: i64) -> Result<Option<Recruiter>> {
        let tables = self.tables.lock().await;
        let profile = tables
            .recruiters
            .live()
            .find(|r| r.user_id == user_id)
            .cloned();
        Ok(profile)
    }
}

#[async_trait]
impl JobRepository for MemoryStore {
    async fn create_with_skills(&self, fields: NewJob, skill_ids: &[i64]) -> Result<Job> {
        let mut tables = self.tables.lock().await;
        if let Some(missing) = skill_ids.iter().find(|id| tables.skills.get(**id).is_none()) {
            return Err(Error::NotFound(format!("Skill {} not found", missing)));
        }

        let job = tables.jobs.insert(fields, Utc::now())?;
        for skill_id in skill_ids {
            if !tables.job_skills.contains(&(job.id, *skill_id)) {
                tables.job_skills.push((job.id, *skill_id));
            }
        }
        Ok(job)
    }

    async fn skill_ids(&self, job_id: i64) -> Result<Vec<i64>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .job_skills
            .iter()
            .filter(|(job, _)| *job == job_id)
            .map(|(_, skill)| *skill)
            .collect())
    }

    async fn search(&self, search: &JobSearch) -> Result<Vec<Job>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .jobs
            .live()
            .filter(|job| search.matches(job))
            .skip(search.offset.max(0) as usize)
            .take(search.limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn list_by_recruiter(
        &self,
        recruiter_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Job>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .jobs
            .live()
            .filter(|job| job.recruiter_id == recruiter_id)
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count_by_status(&self, status: JobStatus) -> Result<i64> {
        let tables = self.tables.lock().await;
        Ok(tables.jobs.live().filter(|job| job.status == status).count() as i64)
    }
}

#[async_trait]
impl ApplicationRepository for MemoryStore {
    async fn find_by_pair(
        &self,
        job_id: i64,
        job_seeker_id: i64,
    ) -> Result<Option<Application>> {
        let tables = self.tables.lock().await;
        let application = tables
            .applications
            .live()
            .find(|a| a.job_id == job_id && a.job_seeker_id == job_seeker_id)
            .cloned();
        Ok(application)
    }

    async fn list_by_job_seeker(
        &self,
        job_seeker_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Application>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .applications
            .live()
            .filter(|a| a.job_seeker_id == job_seeker_id)
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn list_by_job(
        &self,
        job_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Application>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .applications
            .live()
            .filter(|a| a.job_id == job_id)
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SkillRepository for MemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Skill>> {
        let tables = self.tables.lock().await;
        let skill = tables.skills.live().find(|s| s.name == name).cloned();
        Ok(skill)
    }
}

#[async_trait]
impl InterviewRepository for MemoryStore {
    async fn list_by_application(&self, application_id: i64) -> Result<Vec<Interview>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .interviews
            .live()
            .filter(|i| i.application_id == application_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ActivityLogRepository for MemoryStore {
    async fn append(&self, entry: NewActivityLog) -> Result<ActivityLog> {
        let mut tables = self.tables.lock().await;
        let log = ActivityLog {
            id: tables.activity_logs.len() as i64 + 1,
            user_id: entry.user_id,
            action: entry.action,
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            created_at: Utc::now(),
        };
        tables.activity_logs.push(log.clone());
        Ok(log)
    }

    async fn list_for_entity(
        &self,
        entity_type: &str,
        entity_id: i64,
    ) -> Result<Vec<ActivityLog>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .activity_logs
            .iter()
            .filter(|l| l.entity_type == entity_type && l.entity_id == entity_id)
            .cloned()
            .collect())
    }
}
