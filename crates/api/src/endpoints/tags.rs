//! Tag endpoints: the catalog plus log-tag and interest selections.

use axum::{Json, Router, extract::State, routing::post};
use lumbr_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Tag representation.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub id: String,
    pub name: String,
}

impl From<lumbr_db::entities::tag::Model> for TagResponse {
    fn from(t: lumbr_db::entities::tag::Model) -> Self {
        Self {
            id: t.id,
            name: t.name,
        }
    }
}

/// What a reconciliation changed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDiffResponse {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl From<lumbr_core::TagDiff> for TagDiffResponse {
    fn from(d: lumbr_core::TagDiff) -> Self {
        Self {
            added: d.added,
            removed: d.removed,
        }
    }
}

/// Get the full tag catalog.
async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<TagResponse>>> {
    let tags = state.tag_service.list().await?;
    Ok(ApiResponse::ok(tags.into_iter().map(Into::into).collect()))
}

/// Log tags request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogTagsRequest {
    pub log_id: String,
}

/// Get the tags on a log.
async fn log_tags(
    State(state): State<AppState>,
    Json(req): Json<LogTagsRequest>,
) -> AppResult<ApiResponse<Vec<TagResponse>>> {
    let tags = state.tag_service.get_log_tags(&req.log_id).await?;
    Ok(ApiResponse::ok(tags.into_iter().map(Into::into).collect()))
}

/// Log tag selection request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLogTagsRequest {
    pub log_id: String,
    pub tag_ids: Vec<String>,
}

/// Replace a log's tag selection. At most 5 tags; the server converges
/// the stored associations toward the submitted set.
async fn set_log_tags(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SetLogTagsRequest>,
) -> AppResult<ApiResponse<TagDiffResponse>> {
    let diff = state
        .tag_service
        .reconcile_log_tags(&user.id, &req.log_id, &req.tag_ids)
        .await?;
    Ok(ApiResponse::ok(diff.into()))
}

/// Interests request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestsRequest {
    pub user_id: String,
}

/// Get a user's interest tags.
async fn interests(
    State(state): State<AppState>,
    Json(req): Json<InterestsRequest>,
) -> AppResult<ApiResponse<Vec<TagResponse>>> {
    let tags = state.tag_service.get_interests(&req.user_id).await?;
    Ok(ApiResponse::ok(tags.into_iter().map(Into::into).collect()))
}

/// Interest selection request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetInterestsRequest {
    pub tag_ids: Vec<String>,
}

/// Replace the caller's interest selection.
async fn set_interests(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SetInterestsRequest>,
) -> AppResult<ApiResponse<TagDiffResponse>> {
    let diff = state
        .tag_service
        .reconcile_interests(&user.id, &req.tag_ids)
        .await?;
    Ok(ApiResponse::ok(diff.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/log", post(log_tags))
        .route("/log/set", post(set_log_tags))
        .route("/interests", post(interests))
        .route("/interests/set", post(set_interests))
}
