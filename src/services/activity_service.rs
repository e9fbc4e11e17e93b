use std::sync::Arc;

use crate::error::Result;
use crate::models::activity_log::{ActivityLog, NewActivityLog};
use crate::repositories::ActivityLogRepository;

pub const JOB_POSTED: &str = "JOB_POSTED";
pub const JOB_STATUS_CHANGED: &str = "JOB_STATUS_CHANGED";
pub const USER_CREATED: &str = "USER_CREATED";
pub const APPLICATION_SUBMITTED: &str = "APPLICATION_SUBMITTED";
pub const APPLICATION_STATUS_CHANGED: &str = "APPLICATION_STATUS_CHANGED";
pub const INTERVIEW_SCHEDULED: &str = "INTERVIEW_SCHEDULED";

pub const ENTITY_JOB: &str = "JOB";
pub const ENTITY_USER: &str = "USER";
pub const ENTITY_APPLICATION: &str = "APPLICATION";
pub const ENTITY_INTERVIEW: &str = "INTERVIEW";

#[derive(Clone)]
pub struct ActivityService {
    logs: Arc<dyn ActivityLogRepository>,
}

impl ActivityService {
    pub fn new(logs: Arc<dyn ActivityLogRepository>) -> Self {
        Self { logs }
    }

    pub async fn log(
        &self,
        user_id: Option<i64>,
        action: &str,
        entity_type: &str,
        entity_id: i64,
    ) -> Result<ActivityLog> {
        self.logs
            .append(NewActivityLog {
                user_id,
                action: action.to_string(),
                entity_type: entity_type.to_string(),
                entity_id,
            })
            .await
    }

    /// Appends in the background; a failed append is logged and dropped.
    pub fn record(
        &self,
        user_id: Option<i64>,
        action: &'static str,
        entity_type: &'static str,
        entity_id: i64,
    ) {
        let service = self.clone();
        tokio::spawn(async move {
            if let Err(e) = service.log(user_id, action, entity_type, entity_id).await {
                tracing::warn!(
                    action,
                    entity_type,
                    entity_id,
                    error = %e,
                    "Activity log append failed"
                );
            }
        });
    }

    pub async fn history(&self, entity_type: &str, entity_id: i64) -> Result<Vec<ActivityLog>> {
        self.logs.list_for_entity(entity_type, entity_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::Store;

    #[tokio::test]
    async fn entries_are_listed_per_entity() {
        let (store, _) = Store::in_memory();
        let activity = ActivityService::new(store.activity_logs.clone());

        activity.log(Some(1), JOB_POSTED, ENTITY_JOB, 10).await.unwrap();
        activity.log(Some(1), JOB_STATUS_CHANGED, ENTITY_JOB, 10).await.unwrap();
        activity.log(Some(2), JOB_POSTED, ENTITY_JOB, 11).await.unwrap();

        let history = activity.history(ENTITY_JOB, 10).await.unwrap();
        let actions: Vec<_> = history.iter().map(|l| l.action.as_str()).collect();
        assert_eq!(actions, vec![JOB_POSTED, JOB_STATUS_CHANGED]);
    }
}
