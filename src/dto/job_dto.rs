use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::common::Pagination;
use crate::models::job::{Job, JobSearch, JobStatus, JobType};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1, max = 150))]
    pub location: String,
    #[validate(range(min = 0))]
    pub salary_min: Option<i64>,
    #[validate(range(min = 0))]
    pub salary_max: Option<i64>,
    pub job_type: JobType,
    #[serde(default)]
    pub skill_ids: Vec<i64>,
    /// Only honoured for admins posting on behalf of a recruiter.
    pub recruiter_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobSearchQuery {
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub min_salary: Option<i64>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl From<JobSearchQuery> for JobSearch {
    fn from(query: JobSearchQuery) -> Self {
        let page = Pagination {
            skip: query.skip,
            limit: query.limit,
        };
        JobSearch {
            location: query.location,
            job_type: query.job_type,
            min_salary: query.min_salary,
            offset: page.offset(),
            limit: page.limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusQuery {
    pub new_status: JobStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: Job,
    pub skill_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveJobsCount {
    pub active_jobs: i64,
}
