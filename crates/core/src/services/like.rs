//! Like service for log and post likes.

use chrono::Utc;
use lumbr_common::{AppError, AppResult};
use lumbr_db::{
    entities::{log_like, post_like},
    repositories::{LikeRepository, LogRepository, PostRepository},
};
use sea_orm::Set;

/// Like service. A like is a single row per (user, target); liking twice
/// is a conflict, unliking something never liked is a no-op.
#[derive(Clone)]
pub struct LikeService {
    like_repo: LikeRepository,
    log_repo: LogRepository,
    post_repo: PostRepository,
}

impl LikeService {
    /// Create a new like service.
    #[must_use]
    pub const fn new(
        like_repo: LikeRepository,
        log_repo: LogRepository,
        post_repo: PostRepository,
    ) -> Self {
        Self {
            like_repo,
            log_repo,
            post_repo,
        }
    }

    // ========== Log likes ==========

    /// Like a log.
    pub async fn like_log(&self, actor_id: &str, log_id: &str) -> AppResult<log_like::Model> {
        self.log_repo.get_by_id(log_id).await?;

        if self
            .like_repo
            .find_log_like(actor_id, log_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "You already liked this log".to_string(),
            ));
        }

        let model = log_like::ActiveModel {
            user_id: Set(actor_id.to_string()),
            log_id: Set(log_id.to_string()),
            created_at: Set(Utc::now().into()),
        };
        self.like_repo.create_log_like(model).await
    }

    /// Remove a like from a log. Removing a like that does not exist is
    /// a no-op.
    pub async fn unlike_log(&self, actor_id: &str, log_id: &str) -> AppResult<()> {
        self.like_repo.delete_log_like(actor_id, log_id).await?;
        Ok(())
    }

    /// Get the user IDs that liked a log, newest first.
    pub async fn log_likers(&self, log_id: &str) -> AppResult<Vec<String>> {
        Ok(self
            .like_repo
            .find_log_likes(log_id)
            .await?
            .into_iter()
            .map(|l| l.user_id)
            .collect())
    }

    /// Count a log's likes.
    pub async fn count_log_likes(&self, log_id: &str) -> AppResult<u64> {
        self.like_repo.count_log_likes(log_id).await
    }

    /// Whether a user has liked a log.
    pub async fn has_liked_log(&self, actor_id: &str, log_id: &str) -> AppResult<bool> {
        Ok(self
            .like_repo
            .find_log_like(actor_id, log_id)
            .await?
            .is_some())
    }

    // ========== Post likes ==========

    /// Like a post.
    pub async fn like_post(&self, actor_id: &str, post_id: &str) -> AppResult<post_like::Model> {
        self.post_repo.get_by_id(post_id).await?;

        if self
            .like_repo
            .find_post_like(actor_id, post_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "You already liked this post".to_string(),
            ));
        }

        let model = post_like::ActiveModel {
            user_id: Set(actor_id.to_string()),
            post_id: Set(post_id.to_string()),
            created_at: Set(Utc::now().into()),
        };
        self.like_repo.create_post_like(model).await
    }

    /// Remove a like from a post. Removing a like that does not exist is
    /// a no-op.
    pub async fn unlike_post(&self, actor_id: &str, post_id: &str) -> AppResult<()> {
        self.like_repo.delete_post_like(actor_id, post_id).await?;
        Ok(())
    }

    /// Get the user IDs that liked a post, newest first.
    pub async fn post_likers(&self, post_id: &str) -> AppResult<Vec<String>> {
        Ok(self
            .like_repo
            .find_post_likes(post_id)
            .await?
            .into_iter()
            .map(|l| l.user_id)
            .collect())
    }

    /// Count a post's likes.
    pub async fn count_post_likes(&self, post_id: &str) -> AppResult<u64> {
        self.like_repo.count_post_likes(post_id).await
    }

    /// Whether a user has liked a post.
    pub async fn has_liked_post(&self, actor_id: &str, post_id: &str) -> AppResult<bool> {
        Ok(self
            .like_repo
            .find_post_like(actor_id, post_id)
            .await?
            .is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lumbr_db::entities::log;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_log(id: &str) -> log::Model {
        log::Model {
            id: id.to_string(),
            user_id: "owner".to_string(),
            title: "devlog".to_string(),
            description: "A test log".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_log_like(user_id: &str, log_id: &str) -> log_like::Model {
        log_like::Model {
            user_id: user_id.to_string(),
            log_id: log_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> LikeService {
        LikeService::new(
            LikeRepository::new(Arc::clone(&db)),
            LogRepository::new(Arc::clone(&db)),
            PostRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_like_log_twice_conflicts() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_log("log1")]])
                .append_query_results([[create_log_like("u1", "log1")]])
                .into_connection(),
        );

        let result = service(db).like_log("u1", "log1").await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_like_missing_log_propagates_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<log::Model>::new()])
                .into_connection(),
        );

        let result = service(db).like_log("u1", "missing").await;

        assert!(matches!(result, Err(AppError::LogNotFound(_))));
    }

    #[tokio::test]
    async fn test_unlike_log_missing_like_is_noop() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let result = service(db).unlike_log("u1", "log1").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_log_likers_returns_user_ids() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![
                    create_log_like("u2", "log1"),
                    create_log_like("u1", "log1"),
                ]])
                .into_connection(),
        );

        let likers = service(db).log_likers("log1").await.unwrap();

        assert_eq!(likers, vec!["u2".to_string(), "u1".to_string()]);
    }
}
