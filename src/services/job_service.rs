use crate::cache::{self, keys, Cache};
use crate::dto::job_dto::{CreateJobPayload, JobDetail};
use crate::error::{Error, Result};
use crate::models::job::{Job, JobPatch, JobSearch, JobStatus, NewJob};
use crate::repositories::{Entity, Store};
use crate::services::activity_service::{self, ActivityService};

/// Job lifecycle plus the cache discipline around it. Any write that can
/// change which jobs a search returns clears the whole search namespace.
#[derive(Clone)]
pub struct JobService {
    store: Store,
    cache: Cache,
    activity: ActivityService,
}

impl JobService {
    pub fn new(store: Store, cache: Cache, activity: ActivityService) -> Self {
        Self {
            store,
            cache,
            activity,
        }
    }

    pub async fn create_job_posting(
        &self,
        payload: CreateJobPayload,
        recruiter_id: i64,
        actor_id: Option<i64>,
    ) -> Result<Job> {
        if let (Some(min), Some(max)) = (payload.salary_min, payload.salary_max) {
            if min > max {
                return Err(Error::BadRequest(
                    "salary_min cannot be greater than salary_max".to_string(),
                ));
            }
        }

        let fields = NewJob {
            recruiter_id,
            title: payload.title,
            description: payload.description,
            location: payload.location,
            salary_min: payload.salary_min,
            salary_max: payload.salary_max,
            job_type: payload.job_type,
            status: JobStatus::Open,
        };
        let job = self
            .store
            .jobs
            .create_with_skills(fields, &payload.skill_ids)
            .await?;

        tracing::info!(job_id = job.id, recruiter_id, "Job posted");
        self.invalidate_listings(recruiter_id).await;
        self.activity.record(
            actor_id,
            activity_service::JOB_POSTED,
            activity_service::ENTITY_JOB,
            job.id,
        );
        Ok(job)
    }

    pub async fn get_job(&self, job_id: i64) -> Result<JobDetail> {
        let key = keys::job_detail(job_id);
        if let Some(detail) = self.cache.get_json::<JobDetail>(&key).await {
            return Ok(detail);
        }

        let job = self
            .store
            .jobs
            .get(job_id)
            .await?
            .ok_or_else(|| Error::not_found(Job::NAME))?;
        let skill_ids = self.store.jobs.skill_ids(job_id).await?;
        let detail = JobDetail { job, skill_ids };

        self.cache
            .set_json(&key, &detail, cache::JOB_DETAIL_TTL_SECONDS)
            .await;
        Ok(detail)
    }

    pub async fn list_jobs(&self, offset: i64, limit: i64) -> Result<Vec<Job>> {
        self.store.jobs.list(offset, limit).await
    }

    pub async fn search_jobs(&self, search: JobSearch) -> Result<Vec<Job>> {
        let key = keys::job_search(&search);
        if let Some(jobs) = self.cache.get_json::<Vec<Job>>(&key).await {
            return Ok(jobs);
        }

        let jobs = self.store.jobs.search(&search).await?;
        self.cache
            .set_json(&key, &jobs, cache::JOB_SEARCH_TTL_SECONDS)
            .await;
        Ok(jobs)
    }

    pub async fn update_job_status(
        &self,
        job_id: i64,
        new_status: JobStatus,
        recruiter_id: i64,
        actor_id: Option<i64>,
    ) -> Result<Job> {
        let job = self.owned_job(job_id, recruiter_id).await?;

        if job.status == new_status {
            return Ok(job);
        }
        if !job.status.can_transition_to(new_status) {
            return Err(Error::InvalidTransition(format!(
                "Cannot change job status from {} to {}",
                job.status, new_status
            )));
        }

        let updated = self
            .store
            .jobs
            .update(job_id, JobPatch::status(new_status))
            .await?;

        tracing::info!(job_id, from = %job.status, to = %new_status, "Job status changed");
        self.cache.delete(&keys::job_detail(job_id)).await;
        self.invalidate_listings(updated.recruiter_id).await;
        self.activity.record(
            actor_id,
            activity_service::JOB_STATUS_CHANGED,
            activity_service::ENTITY_JOB,
            job_id,
        );
        Ok(updated)
    }

    pub async fn remove_job(&self, job_id: i64, recruiter_id: i64) -> Result<Job> {
        self.owned_job(job_id, recruiter_id).await?;

        let removed = self
            .store
            .jobs
            .soft_delete(job_id)
            .await?
            .ok_or_else(|| Error::not_found(Job::NAME))?;

        tracing::info!(job_id, recruiter_id, "Job removed");
        self.cache.delete(&keys::job_detail(job_id)).await;
        self.invalidate_listings(recruiter_id).await;
        Ok(removed)
    }

    pub async fn jobs_for_recruiter(
        &self,
        recruiter_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Job>> {
        let key = keys::recruiter_jobs(recruiter_id, offset, limit);
        if let Some(jobs) = self.cache.get_json::<Vec<Job>>(&key).await {
            return Ok(jobs);
        }

        let jobs = self
            .store
            .jobs
            .list_by_recruiter(recruiter_id, offset, limit)
            .await?;
        self.cache
            .set_json(&key, &jobs, cache::RECRUITER_JOBS_TTL_SECONDS)
            .await;
        Ok(jobs)
    }

    pub async fn get_active_jobs_count(&self) -> Result<i64> {
        if let Some(count) = self.cache.get_json::<i64>(keys::ACTIVE_JOBS_COUNT).await {
            return Ok(count);
        }

        let count = self.store.jobs.count_by_status(JobStatus::Open).await?;
        self.cache
            .set_json(
                keys::ACTIVE_JOBS_COUNT,
                &count,
                cache::ACTIVE_JOBS_COUNT_TTL_SECONDS,
            )
            .await;
        Ok(count)
    }

    async fn owned_job(&self, job_id: i64, recruiter_id: i64) -> Result<Job> {
        let job = self
            .store
            .jobs
            .get(job_id)
            .await?
            .ok_or_else(|| Error::not_found(Job::NAME))?;
        if job.recruiter_id != recruiter_id {
            return Err(Error::Forbidden(
                "Not authorized to modify this job".to_string(),
            ));
        }
        Ok(job)
    }

    async fn invalidate_listings(&self, recruiter_id: i64) {
        self.cache.clear_prefix(keys::JOB_SEARCH_PREFIX).await;
        self.cache
            .clear_prefix(&keys::recruiter_jobs_prefix(recruiter_id))
            .await;
        self.cache.delete(keys::ACTIVE_JOBS_COUNT).await;
    }
}
