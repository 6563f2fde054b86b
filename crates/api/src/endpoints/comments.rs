//! Comment endpoints.

use axum::{Json, Router, extract::State, routing::post};
use lumbr_common::AppResult;
use lumbr_core::CreateCommentInput;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Comment representation.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub user_id: String,
    pub log_id: Option<String>,
    pub post_id: Option<String>,
    pub body: String,
    pub created_at: String,
}

impl From<lumbr_db::entities::comment::Model> for CommentResponse {
    fn from(c: lumbr_db::entities::comment::Model) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            log_id: c.log_id,
            post_id: c.post_id,
            body: c.body,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// Create comment request. Exactly one of `log_id` and `post_id` must
/// be set.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub log_id: Option<String>,
    pub post_id: Option<String>,
    #[validate(length(min = 1, max = 240))]
    pub body: String,
}

/// Comment on a log or a post.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateCommentRequest>,
) -> AppResult<ApiResponse<CommentResponse>> {
    req.validate()?;
    let comment = state
        .comment_service
        .create(
            &user.id,
            CreateCommentInput {
                log_id: req.log_id,
                post_id: req.post_id,
                body: req.body,
            },
        )
        .await?;

    Ok(ApiResponse::ok(comment.into()))
}

/// List comments of a log.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogCommentsRequest {
    pub log_id: String,
}

/// Get a log's comments, oldest first.
async fn by_log(
    State(state): State<AppState>,
    Json(req): Json<LogCommentsRequest>,
) -> AppResult<ApiResponse<Vec<CommentResponse>>> {
    let comments = state.comment_service.list_for_log(&req.log_id).await?;
    Ok(ApiResponse::ok(
        comments.into_iter().map(Into::into).collect(),
    ))
}

/// List comments of a post.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentsRequest {
    pub post_id: String,
}

/// Get a post's comments, oldest first.
async fn by_post(
    State(state): State<AppState>,
    Json(req): Json<PostCommentsRequest>,
) -> AppResult<ApiResponse<Vec<CommentResponse>>> {
    let comments = state.comment_service.list_for_post(&req.post_id).await?;
    Ok(ApiResponse::ok(
        comments.into_iter().map(Into::into).collect(),
    ))
}

/// Delete comment request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentRequest {
    pub comment_id: String,
}

/// Delete a comment.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteCommentRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .comment_service
        .delete(&user.id, &req.comment_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/log", post(by_log))
        .route("/post", post(by_post))
        .route("/delete", post(delete))
}
