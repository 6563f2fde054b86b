//! Comment service.

use chrono::Utc;
use lumbr_common::{AppError, AppResult, IdGenerator};
use lumbr_db::{
    entities::comment,
    repositories::{CommentRepository, LogRepository, PostRepository, UserRepository},
};
use sea_orm::Set;

/// Input for creating a comment. Exactly one of `log_id` and `post_id`
/// must be set.
pub struct CreateCommentInput {
    pub log_id: Option<String>,
    pub post_id: Option<String>,
    pub body: String,
}

/// Comment service for discussion on logs and posts.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    log_repo: LogRepository,
    post_repo: PostRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub const fn new(
        comment_repo: CommentRepository,
        log_repo: LogRepository,
        post_repo: PostRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            comment_repo,
            log_repo,
            post_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Comment on a log or a post.
    pub async fn create(
        &self,
        actor_id: &str,
        input: CreateCommentInput,
    ) -> AppResult<comment::Model> {
        let body = input.body.trim();
        if body.is_empty() || body.len() > 240 {
            return Err(AppError::Validation(
                "Comment must be between 1 and 240 characters".to_string(),
            ));
        }

        match (&input.log_id, &input.post_id) {
            (Some(log_id), None) => {
                self.log_repo.get_by_id(log_id).await?;
            }
            (None, Some(post_id)) => {
                self.post_repo.get_by_id(post_id).await?;
            }
            _ => {
                return Err(AppError::Validation(
                    "A comment targets exactly one log or one post".to_string(),
                ));
            }
        }

        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(actor_id.to_string()),
            log_id: Set(input.log_id),
            post_id: Set(input.post_id),
            body: Set(body.to_string()),
            created_at: Set(Utc::now().into()),
        };

        self.comment_repo.create(model).await
    }

    /// Get a log's comments, oldest first.
    pub async fn list_for_log(&self, log_id: &str) -> AppResult<Vec<comment::Model>> {
        self.comment_repo.find_by_log(log_id).await
    }

    /// Get a post's comments, oldest first.
    pub async fn list_for_post(&self, post_id: &str) -> AppResult<Vec<comment::Model>> {
        self.comment_repo.find_by_post(post_id).await
    }

    /// Delete a comment.
    pub async fn delete(&self, actor_id: &str, comment_id: &str) -> AppResult<()> {
        let comment = self.comment_repo.get_by_id(comment_id).await?;
        if comment.user_id != actor_id {
            let actor = self.user_repo.get_by_id(actor_id).await?;
            if !actor.is_admin {
                return Err(AppError::Forbidden(
                    "Only the comment author can delete it".to_string(),
                ));
            }
        }

        self.comment_repo.delete(comment_id).await
    }

    /// Search comments by body substring.
    pub async fn search(&self, query: &str, limit: u64) -> AppResult<Vec<comment::Model>> {
        self.comment_repo.search(query, limit).await
    }
}
