//! Post endpoints.

use axum::{Json, Router, extract::State, routing::post};
use lumbr_common::AppResult;
use lumbr_core::CreatePostInput;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Post representation.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub log_id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
}

impl From<lumbr_db::entities::post::Model> for PostResponse {
    fn from(p: lumbr_db::entities::post::Model) -> Self {
        Self {
            id: p.id,
            log_id: p.log_id,
            user_id: p.user_id,
            title: p.title,
            content: p.content,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Create post request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub log_id: String,
    #[validate(length(min = 2, max = 20))]
    pub title: String,
    #[validate(length(min = 1, max = 1000))]
    pub content: String,
}

/// Publish a post into one of the caller's logs.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    req.validate()?;
    let post = state
        .post_service
        .create(
            &user.id,
            CreatePostInput {
                log_id: req.log_id,
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    Ok(ApiResponse::ok(post.into()))
}

/// Post ID request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIdRequest {
    pub post_id: String,
}

/// Get a post by ID.
async fn show(
    State(state): State<AppState>,
    Json(req): Json<PostIdRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state.post_service.get(&req.post_id).await?;
    Ok(ApiResponse::ok(post.into()))
}

/// Delete a post.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<PostIdRequest>,
) -> AppResult<ApiResponse<()>> {
    state.post_service.delete(&user.id, &req.post_id).await?;
    Ok(ApiResponse::ok(()))
}

/// List posts of a log.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPostsRequest {
    pub log_id: String,
}

/// Get a log's posts, newest first.
async fn by_log(
    State(state): State<AppState>,
    Json(req): Json<LogPostsRequest>,
) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = state.post_service.list_by_log(&req.log_id).await?;
    Ok(ApiResponse::ok(posts.into_iter().map(Into::into).collect()))
}

/// Like a post.
async fn like(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<PostIdRequest>,
) -> AppResult<ApiResponse<()>> {
    state.like_service.like_post(&user.id, &req.post_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Remove a like from a post.
async fn unlike(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<PostIdRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .like_service
        .unlike_post(&user.id, &req.post_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Likes of a post.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikesResponse {
    pub count: u64,
    pub user_ids: Vec<String>,
}

/// Get who liked a post.
async fn likes(
    State(state): State<AppState>,
    Json(req): Json<PostIdRequest>,
) -> AppResult<ApiResponse<LikesResponse>> {
    let user_ids = state.like_service.post_likers(&req.post_id).await?;
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
        .route("/log", post(by_log))
        .route("/like", post(like))
        .route("/unlike", post(unlike))
        .route("/likes", post(likes))
}
