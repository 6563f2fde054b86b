//! Log repository.

use std::sync::Arc;

use crate::entities::{Log, log};
use lumbr_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Log repository for database operations.
#[derive(Clone)]
pub struct LogRepository {
    db: Arc<DatabaseConnection>,
}

impl LogRepository {
    /// Create a new log repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new log.
    pub async fn create(&self, model: log::ActiveModel) -> AppResult<log::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a log by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<log::Model>> {
        Log::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a log by ID, failing if absent.
    pub async fn get_by_id(&self, id: &str) -> AppResult<log::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::LogNotFound(id.to_string()))
    }

    /// Get a user's logs, newest first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<log::Model>> {
        Log::find()
            .filter(log::Column::UserId.eq(user_id))
            .order_by_desc(log::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a log owned by a user with an exact title.
    pub async fn find_by_user_and_title(
        &self,
        user_id: &str,
        title: &str,
    ) -> AppResult<Option<log::Model>> {
        Log::find()
            .filter(log::Column::UserId.eq(user_id))
            .filter(log::Column::Title.eq(title))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find logs by ID set, newest first.
    pub async fn find_by_ids(&self, ids: &[String], limit: u64) -> AppResult<Vec<log::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Log::find()
            .filter(log::Column::Id.is_in(ids.to_vec()))
            .order_by_desc(log::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the latest logs.
    pub async fn find_latest(&self, limit: u64) -> AppResult<Vec<log::Model>> {
        Log::find()
            .order_by_desc(log::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a log. Posts, comments, likes and tag associations cascade.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Log::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Search logs by title or description substring.
    pub async fn search(&self, query: &str, limit: u64) -> AppResult<Vec<log::Model>> {
        Log::find()
            .filter(
                Condition::any()
                    .add(log::Column::Title.contains(query))
                    .add(log::Column::Description.contains(query)),
            )
            .order_by_desc(log::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_log(id: &str, user_id: &str, title: &str) -> log::Model {
        log::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            description: "A test log".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<log::Model>::new()])
                .into_connection(),
        );

        let repo = LogRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::LogNotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_user_and_title() {
        let log = create_test_log("log1", "u1", "devlog");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[log.clone()]])
                .into_connection(),
        );

        let repo = LogRepository::new(db);
        let result = repo.find_by_user_and_title("u1", "devlog").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().id, "log1");
    }

    #[tokio::test]
    async fn test_find_by_ids_empty_skips_query() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = LogRepository::new(db);
        let result = repo.find_by_ids(&[], 100).await.unwrap();

        assert!(result.is_empty());
    }
}
