//! Search endpoints, one route per category.

use axum::{Json, Router, extract::State, routing::post};
use lumbr_common::AppResult;
use serde::Deserialize;

use crate::{
    endpoints::comments::CommentResponse, endpoints::logs::LogResponse,
    endpoints::posts::PostResponse, endpoints::users::UserResponse, middleware::AppState,
    response::ApiResponse,
};

const fn default_limit() -> u64 {
    20
}

/// Search request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

/// Search logs by title or description.
async fn logs(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> AppResult<ApiResponse<Vec<LogResponse>>> {
    let logs = state
        .log_service
        .search(&req.query, req.limit.min(100))
        .await?;
    Ok(ApiResponse::ok(logs.into_iter().map(Into::into).collect()))
}

/// Search posts by title or content.
async fn posts(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = state
        .post_service
        .search(&req.query, req.limit.min(100))
        .await?;
    Ok(ApiResponse::ok(posts.into_iter().map(Into::into).collect()))
}

/// Search comments by body.
async fn comments(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> AppResult<ApiResponse<Vec<CommentResponse>>> {
    let comments = state
        .comment_service
        .search(&req.query, req.limit.min(100))
        .await?;
    Ok(ApiResponse::ok(
        comments.into_iter().map(Into::into).collect(),
    ))
}

/// Search users by username or display name.
async fn users(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state
        .user_service
        .search(&req.query, req.limit.min(100))
        .await?;
    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/logs", post(logs))
        .route("/posts", post(posts))
        .route("/comments", post(comments))
        .route("/users", post(users))
}
