use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::repositories::base::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "interview_mode", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewMode {
    Online,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "interview_result", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewResult {
    Pending,
    Pass,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Interview {
    pub id: i64,
    pub application_id: i64,
    pub interview_date: DateTime<Utc>,
    pub mode: InterviewMode,
    pub result: InterviewResult,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewInterview {
    pub application_id: i64,
    pub interview_date: DateTime<Utc>,
    pub mode: InterviewMode,
}

#[derive(Debug, Clone, Default)]
pub struct InterviewPatch {
    pub interview_date: Option<DateTime<Utc>>,
    pub mode: Option<InterviewMode>,
    pub result: Option<InterviewResult>,
}

impl Entity for Interview {
    type Create = NewInterview;
    type Update = InterviewPatch;
    const NAME: &'static str = "Interview";

    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn build(id: i64, now: DateTime<Utc>, fields: NewInterview) -> Self {
        Self {
            id,
            application_id: fields.application_id,
            interview_date: fields.interview_date,
            mode: fields.mode,
            result: InterviewResult::Pending,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn merge(&mut self, patch: InterviewPatch, now: DateTime<Utc>) {
        if let Some(date) = patch.interview_date {
            self.interview_date = date;
        }
        if let Some(mode) = patch.mode {
            self.mode = mode;
        }
        if let Some(result) = patch.result {
            self.result = result;
        }
        self.updated_at = now;
    }

    fn tombstone(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }
}
