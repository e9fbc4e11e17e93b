use async_trait::async_trait;

use super::PgStore;
use crate::error::Result;
use crate::models::activity_log::{ActivityLog, NewActivityLog};
use crate::repositories::ActivityLogRepository;

#[async_trait]
impl ActivityLogRepository for PgStore {
    async fn append(&self, entry: NewActivityLog) -> Result<ActivityLog> {
        let log = sqlx::query_as::<_, ActivityLog>(
            r#"
            INSERT INTO activity_logs (user_id, action, entity_type, entity_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, action, entity_type, entity_id, created_at
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.action)
        .bind(entry.entity_type)
        .bind(entry.entity_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(log)
    }

    async fn list_for_entity(
        &self,
        entity_type: &str,
        entity_id: i64,
    ) -> Result<Vec<ActivityLog>> {
        let logs = sqlx::query_as::<_, ActivityLog>(
            r#"
            SELECT id, user_id, action, entity_type, entity_id, created_at
            FROM activity_logs
            WHERE entity_type = $1 AND entity_id = $2
            ORDER BY id
            "#,
        )
        .bind(entity_type)
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }
}
