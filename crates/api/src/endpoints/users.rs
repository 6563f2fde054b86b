//! User endpoints.

use axum::{Json, Router, extract::State, routing::post};
use lumbr_common::{AppError, AppResult};
use lumbr_core::UpdateProfileInput;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Public user representation. The API token never leaves the register
/// response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
    pub suspended: bool,
    pub created_at: String,
}

impl From<lumbr_db::entities::user::Model> for UserResponse {
    fn from(u: lumbr_db::entities::user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            name: u.name,
            avatar_url: u.avatar_url,
            is_admin: u.is_admin,
            suspended: u.suspended,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Registration request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 20))]
    pub username: String,
    pub name: Option<String>,
}

/// Registration response carrying the freshly issued API token.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Register a new account.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<ApiResponse<RegisterResponse>> {
    req.validate()?;
    let user = state.user_service.register(&req.username, req.name).await?;
    let token = user.token.clone().unwrap_or_default();

    Ok(ApiResponse::ok(RegisterResponse {
        user: user.into(),
        token,
    }))
}

/// Get the authenticated user.
async fn me(AuthUser(user): AuthUser) -> ApiResponse<UserResponse> {
    ApiResponse::ok(user.into())
}

/// Show user request. One of `user_id` and `username` must be set.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowUserRequest {
    pub user_id: Option<String>,
    pub username: Option<String>,
}

/// Get a user by ID or username.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<ShowUserRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = match (req.user_id.as_deref(), req.username.as_deref()) {
        (Some(user_id), _) => state.user_service.get(user_id).await?,
        (None, Some(username)) => state.user_service.get_by_username(username).await?,
        (None, None) => {
            return Err(AppError::BadRequest(
                "userId or username is required".to_string(),
            ));
        }
    };

    Ok(ApiResponse::ok(user.into()))
}

/// Profile update request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 20))]
    pub username: Option<String>,
    #[validate(length(min = 2, max = 20))]
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Update the authenticated user's profile.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    req.validate()?;
    let updated = state
        .user_service
        .update_profile(
            &user.id,
            UpdateProfileInput {
                username: req.username,
                name: req.name,
                avatar_url: req.avatar_url,
            },
        )
        .await?;

    Ok(ApiResponse::ok(updated.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/me", post(me))
        .route("/show", post(show))
        .route("/update", post(update))
}
