//! Like repository for log and post likes.

use std::sync::Arc;

use crate::entities::{LogLike, PostLike, log_like, post_like};
use lumbr_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// Like repository for database operations.
#[derive(Clone)]
pub struct LikeRepository {
    db: Arc<DatabaseConnection>,
}

impl LikeRepository {
    /// Create a new like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    // ========== Log likes ==========

    /// Find a user's like on a log.
    pub async fn find_log_like(
        &self,
        user_id: &str,
        log_id: &str,
    ) -> AppResult<Option<log_like::Model>> {
        LogLike::find_by_id((user_id.to_string(), log_id.to_string()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a log like.
    pub async fn create_log_like(&self, model: log_like::ActiveModel) -> AppResult<log_like::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a user's like on a log. Returns whether a row existed.
    pub async fn delete_log_like(&self, user_id: &str, log_id: &str) -> AppResult<bool> {
        let result = LogLike::delete_many()
            .filter(log_like::Column::UserId.eq(user_id))
            .filter(log_like::Column::LogId.eq(log_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }

    /// Get a log's likes, newest first.
    pub async fn find_log_likes(&self, log_id: &str) -> AppResult<Vec<log_like::Model>> {
        LogLike::find()
            .filter(log_like::Column::LogId.eq(log_id))
            .order_by_desc(log_like::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count a log's likes.
    pub async fn count_log_likes(&self, log_id: &str) -> AppResult<u64> {
        LogLike::find()
            .filter(log_like::Column::LogId.eq(log_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ========== Post likes ==========

    /// Find a user's like on a post.
    pub async fn find_post_like(
        &self,
        user_id: &str,
        post_id: &str,
    ) -> AppResult<Option<post_like::Model>> {
        PostLike::find_by_id((user_id.to_string(), post_id.to_string()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a post like.
    pub async fn create_post_like(
        &self,
        model: post_like::ActiveModel,
    ) -> AppResult<post_like::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a user's like on a post. Returns whether a row existed.
    pub async fn delete_post_like(&self, user_id: &str, post_id: &str) -> AppResult<bool> {
        let result = PostLike::delete_many()
            .filter(post_like::Column::UserId.eq(user_id))
            .filter(post_like::Column::PostId.eq(post_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }

    /// Get a post's likes, newest first.
    pub async fn find_post_likes(&self, post_id: &str) -> AppResult<Vec<post_like::Model>> {
        PostLike::find()
            .filter(post_like::Column::PostId.eq(post_id))
            .order_by_desc(post_like::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count a post's likes.
    pub async fn count_post_likes(&self, post_id: &str) -> AppResult<u64> {
        PostLike::find()
            .filter(post_like::Column::PostId.eq(post_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_find_log_like_found() {
        let like = log_like::Model {
            user_id: "u1".to_string(),
            log_id: "log1".to_string(),
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[like]])
                .into_connection(),
        );

        let repo = LikeRepository::new(db);
        let result = repo.find_log_like("u1", "log1").await.unwrap();

        assert!(result.is_some());
    }

    #[tokio::test]
    async fn test_delete_log_like_missing_row_is_noop() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = LikeRepository::new(db);
        assert!(!repo.delete_log_like("u1", "log1").await.unwrap());
    }
}
