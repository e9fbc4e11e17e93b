use serde::Deserialize;

use crate::models::application::ApplicationStatus;

#[derive(Debug, Clone, Deserialize)]
pub struct ApplyPayload {
    pub job_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationStatusPayload {
    pub new_status: ApplicationStatus,
}
