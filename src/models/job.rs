use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use crate::repositories::base::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = match self {
            JobType::FullTime => "FULL_TIME",
            JobType::PartTime => "PART_TIME",
            JobType::Contract => "CONTRACT",
            JobType::Internship => "INTERNSHIP",
        };
        f.write_str(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Open,
    Closed,
    Paused,
}

impl JobStatus {
    /// `Open <-> Paused`, either of them `-> Closed`. Closed is terminal.
    /// Re-applying the current status is accepted as a no-op.
    pub fn can_transition_to(self, next: JobStatus) -> bool {
        use JobStatus::*;
        matches!(
            (self, next),
            (Open, Open)
                | (Paused, Paused)
                | (Closed, Closed)
                | (Open, Paused)
                | (Paused, Open)
                | (Open, Closed)
                | (Paused, Closed)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = match self {
            JobStatus::Open => "OPEN",
            JobStatus::Closed => "CLOSED",
            JobStatus::Paused => "PAUSED",
        };
        f.write_str(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i64,
    pub recruiter_id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub job_type: JobType,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewJob {
    pub recruiter_id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub job_type: JobType,
    pub status: JobStatus,
}

#[derive(Debug, Clone, Default)]
pub struct JobPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub job_type: Option<JobType>,
    pub status: Option<JobStatus>,
}

impl JobPatch {
    pub fn status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl Entity for Job {
    type Create = NewJob;
    type Update = JobPatch;
    const NAME: &'static str = "Job";

    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn build(id: i64, now: DateTime<Utc>, fields: NewJob) -> Self {
        Self {
            id,
            recruiter_id: fields.recruiter_id,
            title: fields.title,
            description: fields.description,
            location: fields.location,
            salary_min: fields.salary_min,
            salary_max: fields.salary_max,
            job_type: fields.job_type,
            status: fields.status,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn merge(&mut self, patch: JobPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if patch.salary_min.is_some() {
            self.salary_min = patch.salary_min;
        }
        if patch.salary_max.is_some() {
            self.salary_max = patch.salary_max;
        }
        if let Some(job_type) = patch.job_type {
            self.job_type = job_type;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = now;
    }

    fn tombstone(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }
}

/// Conjunctive search over open jobs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobSearch {
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub min_salary: Option<i64>,
    pub offset: i64,
    pub limit: i64,
}

impl JobSearch {
    /// Blank location strings are treated as "no filter".
    pub fn location_filter(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|loc| !loc.is_empty())
    }

    /// A minimum salary of zero means "no filter" as well.
    pub fn min_salary_filter(&self) -> Option<i64> {
        self.min_salary.filter(|salary| *salary != 0)
    }

    pub fn matches(&self, job: &Job) -> bool {
        if job.status != JobStatus::Open || !job.is_live() {
            return false;
        }
        if let Some(loc) = self.location_filter() {
            if !job.location.to_lowercase().contains(&loc.to_lowercase()) {
                return false;
            }
        }
        if let Some(job_type) = self.job_type {
            if job.job_type != job_type {
                return false;
            }
        }
        if let Some(min_salary) = self.min_salary_filter() {
            match job.salary_min {
                Some(salary) if salary >= min_salary => {}
                _ => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(location: &str, salary_min: Option<i64>, status: JobStatus) -> Job {
        Job::build(
            1,
            Utc::now(),
            NewJob {
                recruiter_id: 1,
                title: "Backend Engineer".into(),
                description: "Rust".into(),
                location: location.into(),
                salary_min,
                salary_max: None,
                job_type: JobType::FullTime,
                status,
            },
        )
    }

    #[test]
    fn closed_is_terminal() {
        assert!(!JobStatus::Closed.can_transition_to(JobStatus::Open));
        assert!(!JobStatus::Closed.can_transition_to(JobStatus::Paused));
        assert!(JobStatus::Closed.can_transition_to(JobStatus::Closed));
    }

    #[test]
    fn open_and_paused_toggle() {
        assert!(JobStatus::Open.can_transition_to(JobStatus::Paused));
        assert!(JobStatus::Paused.can_transition_to(JobStatus::Open));
        assert!(JobStatus::Paused.can_transition_to(JobStatus::Closed));
    }

    #[test]
    fn location_match_is_case_insensitive_substring() {
        let search = JobSearch {
            location: Some("hyder".into()),
            limit: 10,
            ..Default::default()
        };
        assert!(search.matches(&job("Hyderabad", None, JobStatus::Open)));
        assert!(!search.matches(&job("Pune", None, JobStatus::Open)));
    }

    #[test]
    fn only_open_jobs_match() {
        let search = JobSearch::default();
        assert!(!search.matches(&job("Hyderabad", None, JobStatus::Paused)));
        assert!(!search.matches(&job("Hyderabad", None, JobStatus::Closed)));
    }

    #[test]
    fn min_salary_excludes_jobs_without_salary() {
        let search = JobSearch {
            min_salary: Some(500_000),
            ..Default::default()
        };
        assert!(search.matches(&job("Hyderabad", Some(600_000), JobStatus::Open)));
        assert!(!search.matches(&job("Hyderabad", Some(400_000), JobStatus::Open)));
        assert!(!search.matches(&job("Hyderabad", None, JobStatus::Open)));
    }

    #[test]
    fn zero_min_salary_keeps_jobs_without_salary() {
        let search = JobSearch {
            min_salary: Some(0),
            ..Default::default()
        };
        assert_eq!(search.min_salary_filter(), None);
        assert!(search.matches(&job("Hyderabad", None, JobStatus::Open)));
        assert!(search.matches(&job("Hyderabad", Some(400_000), JobStatus::Open)));
    }

    #[test]
    fn blank_location_is_ignored() {
        let search = JobSearch {
            location: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(search.location_filter(), None);
        assert!(search.matches(&job("Anywhere", None, JobStatus::Open)));
    }
}
