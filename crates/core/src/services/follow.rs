//! Follow service.

use chrono::Utc;
use lumbr_common::{AppError, AppResult, IdGenerator};
use lumbr_db::{
    entities::follow,
    repositories::{FollowRepository, UserRepository},
};
use sea_orm::Set;

/// Follow service for the user-to-user follow graph.
#[derive(Clone)]
pub struct FollowService {
    follow_repo: FollowRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl FollowService {
    /// Create a new follow service.
    #[must_use]
    pub const fn new(follow_repo: FollowRepository, user_repo: UserRepository) -> Self {
        Self {
            follow_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Follow a user.
    pub async fn follow(&self, follower_id: &str, followee_id: &str) -> AppResult<follow::Model> {
        if follower_id == followee_id {
            return Err(AppError::BadRequest("Cannot follow yourself".to_string()));
        }

        self.user_repo.get_by_id(followee_id).await?;

        if self
            .follow_repo
            .find_by_pair(follower_id, followee_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "You are already following this user".to_string(),
            ));
        }

        let model = follow::ActiveModel {
            id: Set(self.id_gen.generate()),
            follower_id: Set(follower_id.to_string()),
            followee_id: Set(followee_id.to_string()),
            created_at: Set(Utc::now().into()),
        };
        self.follow_repo.create(model).await
    }

    /// Unfollow a user. Unfollowing someone never followed is a no-op.
    pub async fn unfollow(&self, follower_id: &str, followee_id: &str) -> AppResult<()> {
        self.follow_repo
            .delete_by_pair(follower_id, followee_id)
            .await?;
        Ok(())
    }

    /// Whether one user follows another.
    pub async fn is_following(&self, follower_id: &str, followee_id: &str) -> AppResult<bool> {
        self.follow_repo.is_following(follower_id, followee_id).await
    }

    /// Get the IDs of users following a user, newest first.
    pub async fn followers(&self, user_id: &str, limit: u64) -> AppResult<Vec<String>> {
        Ok(self
            .follow_repo
            .find_followers(user_id, limit)
            .await?
            .into_iter()
            .map(|f| f.follower_id)
            .collect())
    }

    /// Get the IDs of users a user is following, newest first.
    pub async fn following(&self, user_id: &str, limit: u64) -> AppResult<Vec<String>> {
        Ok(self
            .follow_repo
            .find_following(user_id, limit)
            .await?
            .into_iter()
            .map(|f| f.followee_id)
            .collect())
    }

    /// Count a user's followers.
    pub async fn count_followers(&self, user_id: &str) -> AppResult<u64> {
        self.follow_repo.count_followers(user_id).await
    }

    /// Count how many users a user is following.
    pub async fn count_following(&self, user_id: &str) -> AppResult<u64> {
        self.follow_repo.count_following(user_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lumbr_db::entities::user;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_user(id: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: format!("user_{id}"),
            name: None,
            token: None,
            avatar_url: None,
            is_admin: false,
            suspended: false,
            suspend_reason: None,
            suspend_date: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_follow(follower_id: &str, followee_id: &str) -> follow::Model {
        follow::Model {
            id: "f1".to_string(),
            follower_id: follower_id.to_string(),
            followee_id: followee_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> FollowService {
        FollowService::new(
            FollowRepository::new(Arc::clone(&db)),
            UserRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_follow_rejects_self_follow() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let result = service(db).follow("u1", "u1").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_follow_twice_conflicts() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("u2")]])
                .append_query_results([[create_test_follow("u1", "u2")]])
                .into_connection(),
        );

        let result = service(db).follow("u1", "u2").await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_follow_missing_user_propagates_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let result = service(db).follow("u1", "ghost").await;

        assert!(matches!(result, Err(AppError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_unfollow_missing_relationship_is_noop() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let result = service(db).unfollow("u1", "u2").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_followers_returns_follower_ids() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![
                    create_test_follow("u3", "u1"),
                    create_test_follow("u2", "u1"),
                ]])
                .into_connection(),
        );

        let followers = service(db).followers("u1", 100).await.unwrap();

        assert_eq!(followers, vec!["u3".to_string(), "u2".to_string()]);
    }
}
