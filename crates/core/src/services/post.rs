//! Post service.

use chrono::Utc;
use lumbr_common::{AppError, AppResult, IdGenerator};
use lumbr_db::{
    entities::post,
    repositories::{LogRepository, PostRepository, UserRepository},
};
use sea_orm::Set;

/// Input for creating a post.
pub struct CreatePostInput {
    pub log_id: String,
    pub title: String,
    pub content: String,
}

/// Post service for articles within a log.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    log_repo: LogRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(
        post_repo: PostRepository,
        log_repo: LogRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            post_repo,
            log_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Publish a post into one of the actor's logs.
    pub async fn create(&self, actor_id: &str, input: CreatePostInput) -> AppResult<post::Model> {
        let title = input.title.trim();
        if title.len() < 2 || title.len() > 20 {
            return Err(AppError::Validation(
                "Title must be between 2 and 20 characters".to_string(),
            ));
        }
        let content = input.content.trim();
        if content.is_empty() || content.len() > 1000 {
            return Err(AppError::Validation(
                "Content must be between 1 and 1000 characters".to_string(),
            ));
        }

        let log = self.log_repo.get_by_id(&input.log_id).await?;
        if log.user_id != actor_id {
            return Err(AppError::Forbidden(
                "Only the log owner can post to it".to_string(),
            ));
        }

        if self
            .post_repo
            .find_by_user_and_title(actor_id, title)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "You already have a post with this title".to_string(),
            ));
        }

        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            log_id: Set(input.log_id),
            user_id: Set(actor_id.to_string()),
            title: Set(title.to_string()),
            content: Set(content.to_string()),
            created_at: Set(Utc::now().into()),
        };

        self.post_repo.create(model).await
    }

    /// Get a post by ID.
    pub async fn get(&self, post_id: &str) -> AppResult<post::Model> {
        self.post_repo.get_by_id(post_id).await
    }

    /// Get a log's posts, newest first.
    pub async fn list_by_log(&self, log_id: &str) -> AppResult<Vec<post::Model>> {
        self.log_repo.get_by_id(log_id).await?;
        self.post_repo.find_by_log(log_id).await
    }

    /// Delete a post. Comments and likes cascade.
    pub async fn delete(&self, actor_id: &str, post_id: &str) -> AppResult<()> {
        let post = self.post_repo.get_by_id(post_id).await?;
        if post.user_id != actor_id {
            let actor = self.user_repo.get_by_id(actor_id).await?;
            if !actor.is_admin {
                return Err(AppError::Forbidden(
                    "Only the post author can delete it".to_string(),
                ));
            }
        }

        self.post_repo.delete(post_id).await?;
        tracing::info!(post_id, actor_id, "Deleted post");
        Ok(())
    }

    /// Search posts by title or content substring.
    pub async fn search(&self, query: &str, limit: u64) -> AppResult<Vec<post::Model>> {
        self.post_repo.search(query, limit).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lumbr_db::entities::{log, user};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_log(id: &str, user_id: &str) -> log::Model {
        log::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title: "devlog".to_string(),
            description: "A test log".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_post(id: &str, user_id: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            log_id: "log1".to_string(),
            user_id: user_id.to_string(),
            title: "first entry".to_string(),
            content: "Hello, world".to_string(),
            created_at: Utc::now().into(),
        }
    }

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

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> PostService {
        PostService::new(
            PostRepository::new(Arc::clone(&db)),
            LogRepository::new(Arc::clone(&db)),
            UserRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_empty_content() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let result = service(db)
            .create(
                "u1",
                CreatePostInput {
                    log_id: "log1".to_string(),
                    title: "first entry".to_string(),
                    content: "   ".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_forbidden_in_foreign_log() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_log("log1", "owner")]])
                .into_connection(),
        );

        let result = service(db)
            .create(
                "intruder",
                CreatePostInput {
                    log_id: "log1".to_string(),
                    title: "first entry".to_string(),
                    content: "Hello".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_duplicate_title_conflicts() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_log("log1", "u1")]])
                .append_query_results([[create_test_post("p1", "u1")]])
                .into_connection(),
        );

        let result = service(db)
            .create(
                "u1",
                CreatePostInput {
                    log_id: "log1".to_string(),
                    title: "first entry".to_string(),
                    content: "Hello".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_forbidden_for_non_author() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_post("p1", "author")]])
                .append_query_results([[create_test_user("intruder", false)]])
                .into_connection(),
        );

        let result = service(db).delete("intruder", "p1").await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_list_by_log_missing_log_propagates_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<log::Model>::new()])
                .into_connection(),
        );

        let result = service(db).list_by_log("missing").await;

        assert!(matches!(result, Err(AppError::LogNotFound(_))));
    }
}
