//! User service.

use chrono::Utc;
use lumbr_common::{AppError, AppResult, IdGenerator};
use lumbr_db::{entities::user, repositories::UserRepository};
use sea_orm::Set;

/// Input for updating a user's profile.
#[derive(Default)]
pub struct UpdateProfileInput {
    pub username: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

/// User service for accounts and profiles.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new account and issue its API token.
    pub async fn register(
        &self,
        username: &str,
        name: Option<String>,
    ) -> AppResult<user::Model> {
        let username = validate_username(username)?;

        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(AppError::Conflict(
                "This username is already taken".to_string(),
            ));
        }

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            username: Set(username.to_string()),
            name: Set(name),
            token: Set(Some(self.id_gen.generate_token())),
            avatar_url: Set(None),
            is_admin: Set(false),
            suspended: Set(false),
            suspend_reason: Set(None),
            suspend_date: Set(None),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        let user = self.user_repo.create(model).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "Registered user");
        Ok(user)
    }

    /// Get a user by ID.
    pub async fn get(&self, user_id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(user_id).await
    }

    /// Get a user by username.
    pub async fn get_by_username(&self, username: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_username(username).await
    }

    /// Resolve a bearer token to its user.
    ///
    /// Suspended accounts do not authenticate; their requests fall back
    /// to anonymous handling until the sweep reactivates them.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if user.suspended {
            return Err(AppError::Forbidden("Account is suspended".to_string()));
        }
        Ok(user)
    }

    /// Update the actor's own profile.
    pub async fn update_profile(
        &self,
        actor_id: &str,
        input: UpdateProfileInput,
    ) -> AppResult<user::Model> {
        let user = self.user_repo.get_by_id(actor_id).await?;

        let mut active: user::ActiveModel = user.clone().into();

        if let Some(username) = input.username.as_deref() {
            let username = validate_username(username)?;
            if username != user.username {
                if self.user_repo.find_by_username(username).await?.is_some() {
                    return Err(AppError::Conflict(
                        "This username is already taken".to_string(),
                    ));
                }
                active.username = Set(username.to_string());
            }
        }
        if let Some(name) = input.name {
            let name = name.trim();
            if name.len() < 2 || name.len() > 20 {
                return Err(AppError::Validation(
                    "Name must be between 2 and 20 characters".to_string(),
                ));
            }
            active.name = Set(Some(name.to_string()));
        }
        if let Some(avatar_url) = input.avatar_url {
            active.avatar_url = Set(Some(avatar_url));
        }
        active.updated_at = Set(Some(Utc::now().into()));

        self.user_repo.update(active).await
    }

    /// Search users by username or display name substring.
    pub async fn search(&self, query: &str, limit: u64) -> AppResult<Vec<user::Model>> {
        self.user_repo.search(query, limit).await
    }
}

fn validate_username(username: &str) -> AppResult<&str> {
    let username = username.trim();
    if username.len() < 2 || username.len() > 20 {
        return Err(AppError::Validation(
            "Username must be between 2 and 20 characters".to_string(),
        ));
    }
    Ok(username)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: &str, username: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            name: None,
            token: Some("token123".to_string()),
            avatar_url: None,
            is_admin: false,
            suspended: false,
            suspend_reason: None,
            suspend_date: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> UserService {
        UserService::new(UserRepository::new(db))
    }

    #[tokio::test]
    async fn test_register_rejects_short_username() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let result = service(db).register("x", None).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_taken_username_conflicts() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("u1", "alice")]])
                .into_connection(),
        );

        let result = service(db).register("alice", None).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_authenticate_by_token_unknown_token() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let result = service(db).authenticate_by_token("bogus").await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_authenticate_by_token_suspended_account() {
        let mut user = create_test_user("u1", "alice");
        user.suspended = true;

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );

        let result = service(db).authenticate_by_token("token123").await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_update_profile_taken_username_conflicts() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("u1", "alice")]])
                .append_query_results([[create_test_user("u2", "bob")]])
                .into_connection(),
        );

        let result = service(db)
            .update_profile(
                "u1",
                UpdateProfileInput {
                    username: Some("bob".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
