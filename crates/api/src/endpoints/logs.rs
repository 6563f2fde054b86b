//! Log endpoints.

use axum::{Json, Router, extract::State, routing::post};
use lumbr_common::AppResult;
use lumbr_core::CreateLogInput;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

const fn default_limit() -> u64 {
    20
}

/// Log representation.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

impl From<lumbr_db::entities::log::Model> for LogResponse {
    fn from(l: lumbr_db::entities::log::Model) -> Self {
        Self {
            id: l.id,
            user_id: l.user_id,
            title: l.title,
            description: l.description,
            created_at: l.created_at.to_rfc3339(),
        }
    }
}

/// Create log request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogRequest {
    #[validate(length(min = 2, max = 20))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 60))]
    pub description: String,
}

/// Create a log.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateLogRequest>,
) -> AppResult<ApiResponse<LogResponse>> {
    req.validate()?;
    let log = state
        .log_service
        .create(
            &user.id,
            CreateLogInput {
                title: req.title,
                description: req.description,
            },
        )
        .await?;

    Ok(ApiResponse::ok(log.into()))
}

/// Log ID request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogIdRequest {
    pub log_id: String,
}

/// Get a log by ID.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<LogIdRequest>,
) -> AppResult<ApiResponse<LogResponse>> {
    let log = state.log_service.get(&req.log_id).await?;
    Ok(ApiResponse::ok(log.into()))
}

/// Delete a log. Posts, comments, likes and tag rows go with it.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<LogIdRequest>,
) -> AppResult<ApiResponse<()>> {
    state.log_service.delete(&user.id, &req.log_id).await?;
    Ok(ApiResponse::ok(()))
}

/// List logs of a user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLogsRequest {
    pub user_id: String,
}

/// Get a user's logs, newest first.
async fn by_user(
    State(state): State<AppState>,
    Json(req): Json<UserLogsRequest>,
) -> AppResult<ApiResponse<Vec<LogResponse>>> {
    let logs = state.log_service.list_by_user(&req.user_id).await?;
    Ok(ApiResponse::ok(logs.into_iter().map(Into::into).collect()))
}

/// Feed request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRequest {
    #[serde(default = "default_limit")]
    pub limit: u64,
}

/// Get the latest logs across all users.
async fn latest(
    State(state): State<AppState>,
    Json(req): Json<FeedRequest>,
) -> AppResult<ApiResponse<Vec<LogResponse>>> {
    let logs = state.log_service.latest(req.limit.min(100)).await?;
    Ok(ApiResponse::ok(logs.into_iter().map(Into::into).collect()))
}

/// Get the latest logs matching the caller's interests.
async fn explore(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FeedRequest>,
) -> AppResult<ApiResponse<Vec<LogResponse>>> {
    let logs = state
        .log_service
        .explore(&user.id, req.limit.min(100))
        .await?;
    Ok(ApiResponse::ok(logs.into_iter().map(Into::into).collect()))
}

/// Like a log.
async fn like(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<LogIdRequest>,
) -> AppResult<ApiResponse<()>> {
    state.like_service.like_log(&user.id, &req.log_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Remove a like from a log.
async fn unlike(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<LogIdRequest>,
) -> AppResult<ApiResponse<()>> {
    state.like_service.unlike_log(&user.id, &req.log_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Likes of a log.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikesResponse {
    pub count: u64,
    pub user_ids: Vec<String>,
}

/// Get who liked a log.
async fn likes(
    State(state): State<AppState>,
    Json(req): Json<LogIdRequest>,
) -> AppResult<ApiResponse<LikesResponse>> {
    let user_ids = state.like_service.log_likers(&req.log_id).await?;
    Ok(ApiResponse::ok(LikesResponse {
        count: user_ids.len() as u64,
        user_ids,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/show", post(show))
        .route("/delete", post(delete))
        .route("/user", post(by_user))
        .route("/latest", post(latest))
        .route("/explore", post(explore))
        .route("/like", post(like))
        .route("/unlike", post(unlike))
        .route("/likes", post(likes))
}
