use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::models::interview::{InterviewMode, InterviewResult};
use crate::models::profile::{
    JobSeekerPatch, NewJobSeeker, NewRecruiter, ProficiencyLevel, RecruiterPatch,
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobSeekerPayload {
    pub user_id: i64,
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(range(min = 0))]
    pub experience_years: Option<i32>,
    #[validate(length(max = 200))]
    pub education: Option<String>,
    #[validate(url)]
    pub resume_url: Option<String>,
}

impl From<CreateJobSeekerPayload> for NewJobSeeker {
    fn from(p: CreateJobSeekerPayload) -> Self {
        NewJobSeeker {
            user_id: p.user_id,
            full_name: p.full_name,
            phone: p.phone,
            experience_years: p.experience_years,
            education: p.education,
            resume_url: p.resume_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateJobSeekerPayload {
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(range(min = 0))]
    pub experience_years: Option<i32>,
    #[validate(length(max = 200))]
    pub education: Option<String>,
    #[validate(url)]
    pub resume_url: Option<String>,
}

impl From<UpdateJobSeekerPayload> for JobSeekerPatch {
    fn from(p: UpdateJobSeekerPayload) -> Self {
        JobSeekerPatch {
            full_name: p.full_name,
            phone: p.phone,
            experience_years: p.experience_years,
            education: p.education,
            resume_url: p.resume_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRecruiterPayload {
    pub user_id: i64,
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,
    #[validate(url)]
    pub company_website: Option<String>,
}

impl From<CreateRecruiterPayload> for NewRecruiter {
    fn from(p: CreateRecruiterPayload) -> Self {
        NewRecruiter {
            user_id: p.user_id,
            company_name: p.company_name,
            company_website: p.company_website,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRecruiterPayload {
    #[validate(length(min = 1, max = 200))]
    pub company_name: Option<String>,
    #[validate(url)]
    pub company_website: Option<String>,
}

impl From<UpdateRecruiterPayload> for RecruiterPatch {
    fn from(p: UpdateRecruiterPayload) -> Self {
        RecruiterPatch {
            company_name: p.company_name,
            company_website: p.company_website,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSkillPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddSkillPayload {
    pub skill_id: i64,
    pub proficiency_level: ProficiencyLevel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleInterviewPayload {
    pub application_id: i64,
    pub interview_date: DateTime<Utc>,
    pub mode: InterviewMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInterviewPayload {
    pub interview_date: Option<DateTime<Utc>>,
    pub mode: Option<InterviewMode>,
    pub result: Option<InterviewResult>,
}
