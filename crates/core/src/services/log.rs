//! Log service.

use chrono::Utc;
use lumbr_common::{AppError, AppResult, IdGenerator};
use lumbr_db::{
    entities::log,
    repositories::{LogRepository, TagRepository, UserRepository},
};
use sea_orm::Set;

/// Input for creating a log.
pub struct CreateLogInput {
    pub title: String,
    pub description: String,
}

/// Log service for creating, browsing and deleting logs.
#[derive(Clone)]
pub struct LogService {
    log_repo: LogRepository,
    user_repo: UserRepository,
    tag_repo: TagRepository,
    id_gen: IdGenerator,
}

impl LogService {
    /// Create a new log service.
    #[must_use]
    pub const fn new(
        log_repo: LogRepository,
        user_repo: UserRepository,
        tag_repo: TagRepository,
    ) -> Self {
        Self {
            log_repo,
            user_repo,
            tag_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a log owned by the actor.
    pub async fn create(&self, actor_id: &str, input: CreateLogInput) -> AppResult<log::Model> {
        let title = input.title.trim();
        if title.len() < 2 || title.len() > 20 {
            return Err(AppError::Validation(
                "Title must be between 2 and 20 characters".to_string(),
            ));
        }
        let description = input.description.trim();
        if description.len() > 60 {
            return Err(AppError::Validation(
                "Description must be less than 60 characters".to_string(),
            ));
        }

        self.user_repo.get_by_id(actor_id).await?;

        if self
            .log_repo
            .find_by_user_and_title(actor_id, title)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "You already have a log with this title".to_string(),
            ));
        }

        let model = log::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(actor_id.to_string()),
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        self.log_repo.create(model).await
    }

    /// Get a log by ID.
    pub async fn get(&self, log_id: &str) -> AppResult<log::Model> {
        self.log_repo.get_by_id(log_id).await
    }

    /// Get a user's logs, newest first.
    pub async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<log::Model>> {
        self.log_repo.find_by_user(user_id).await
    }

    /// Get the latest logs across all users.
    pub async fn latest(&self, limit: u64) -> AppResult<Vec<log::Model>> {
        self.log_repo.find_latest(limit).await
    }

    /// Get the latest logs whose tags intersect the actor's interests.
    pub async fn explore(&self, actor_id: &str, limit: u64) -> AppResult<Vec<log::Model>> {
        let interests = self.tag_repo.find_interest_ids(actor_id).await?;
        let log_ids = self.tag_repo.find_log_ids_with_tags(&interests).await?;
        self.log_repo.find_by_ids(&log_ids, limit).await
    }

    /// Delete a log. Posts, comments, likes and tag associations cascade.
    pub async fn delete(&self, actor_id: &str, log_id: &str) -> AppResult<()> {
        let log = self.log_repo.get_by_id(log_id).await?;
        if log.user_id != actor_id {
            let actor = self.user_repo.get_by_id(actor_id).await?;
            if !actor.is_admin {
                return Err(AppError::Forbidden(
                    "Only the log owner can delete it".to_string(),
                ));
            }
        }

        self.log_repo.delete(log_id).await?;
        tracing::info!(log_id, actor_id, "Deleted log");
        Ok(())
    }

    /// Search logs by title or description substring.
    pub async fn search(&self, query: &str, limit: u64) -> AppResult<Vec<log::Model>> {
        self.log_repo.search(query, limit).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lumbr_db::entities::user;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_user(id: &str, is_admin: bool) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: format!("user_{id}"),
            name: None,
            token: None,
            avatar_url: None,
            is_admin,
            suspended: false,
            suspend_reason: None,
            suspend_date: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

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

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> LogService {
        LogService::new(
            LogRepository::new(Arc::clone(&db)),
            UserRepository::new(Arc::clone(&db)),
            TagRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_short_title() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let result = service(db)
            .create(
                "u1",
                CreateLogInput {
                    title: "x".to_string(),
                    description: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_duplicate_title_conflicts() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("u1", false)]])
                .append_query_results([[create_test_log("log1", "u1", "devlog")]])
                .into_connection(),
        );

        let result = service(db)
            .create(
                "u1",
                CreateLogInput {
                    title: "devlog".to_string(),
                    description: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_forbidden_for_non_owner() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_log("log1", "owner", "devlog")]])
                .append_query_results([[create_test_user("intruder", false)]])
                .into_connection(),
        );

        let result = service(db).delete("intruder", "log1").await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_allowed_for_admin() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_log("log1", "owner", "devlog")]])
                .append_query_results([[create_test_user("admin", true)]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let result = service(db).delete("admin", "log1").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_explore_queries_interest_overlap() {
        let interests = vec![
            lumbr_db::entities::user_interest::Model {
                user_id: "u1".to_string(),
                tag_id: "tag_rust".to_string(),
            },
        ];
        let tagged = vec![lumbr_db::entities::log_tag::Model {
            log_id: "log2".to_string(),
            tag_id: "tag_rust".to_string(),
        }];

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([interests])
                .append_query_results([tagged])
                .append_query_results([[create_test_log("log2", "u2", "gamedev")]])
                .into_connection(),
        );

        let logs = service(db).explore("u1", 20).await.unwrap();

        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].id, "log2");
    }

    #[tokio::test]
    async fn test_explore_without_interests_is_empty() {
        // No interests means no tag overlap query and no matching logs.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<lumbr_db::entities::user_interest::Model>::new()])
                .into_connection(),
        );

        let logs = service(db).explore("u1", 20).await.unwrap();

        assert!(logs.is_empty());
    }
}
