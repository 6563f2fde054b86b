//! Follow endpoints.

use axum::{Json, Router, extract::State, routing::post};
use lumbr_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::ApiResponse,
};

const fn default_limit() -> u64 {
    50
}

/// Follow target request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    pub user_id: String,
}

/// Follow a user.
async fn follow(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FollowRequest>,
) -> AppResult<ApiResponse<()>> {
    state.follow_service.follow(&user.id, &req.user_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Unfollow a user.
async fn unfollow(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FollowRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .follow_service
        .unfollow(&user.id, &req.user_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Follower/following list request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    pub user_id: String,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

/// Get the IDs of users following a user.
async fn followers(
    State(state): State<AppState>,
    Json(req): Json<ListRequest>,
) -> AppResult<ApiResponse<Vec<String>>> {
    let ids = state
        .follow_service
        .followers(&req.user_id, req.limit.min(100))
        .await?;
    Ok(ApiResponse::ok(ids))
}

/// Get the IDs of users a user is following.
async fn following(
    State(state): State<AppState>,
    Json(req): Json<ListRequest>,
) -> AppResult<ApiResponse<Vec<String>>> {
    let ids = state
        .follow_service
        .following(&req.user_id, req.limit.min(100))
        .await?;
    Ok(ApiResponse::ok(ids))
}

/// Follow-graph summary for a profile page.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStateResponse {
    pub followers_count: u64,
    pub following_count: u64,
    /// Whether the caller follows this user; absent for anonymous calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
}

/// Get follower/following counts for a user.
async fn follow_state(
    MaybeAuthUser(caller): MaybeAuthUser,
    State(state): State<AppState>,
    Json(req): Json<FollowRequest>,
) -> AppResult<ApiResponse<FollowStateResponse>> {
    let followers_count = state.follow_service.count_followers(&req.user_id).await?;
    let following_count = state.follow_service.count_following(&req.user_id).await?;

    let is_following = match caller {
        Some(caller) => Some(
            state
                .follow_service
                .is_following(&caller.id, &req.user_id)
                .await?,
        ),
        None => None,
    };

    Ok(ApiResponse::ok(FollowStateResponse {
        followers_count,
        following_count,
        is_following,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(follow))
        .route("/delete", post(unfollow))
        .route("/followers", post(followers))
        .route("/following", post(following))
        .route("/state", post(follow_state))
}
