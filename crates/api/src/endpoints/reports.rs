//! Report endpoints.

use axum::{Json, Router, extract::State, routing::post};
use lumbr_common::AppResult;
use lumbr_core::CreateReportInput;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Report representation.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: String,
    pub log_id: String,
    pub reporter_id: String,
    pub reported_user_id: String,
    pub reason: String,
    pub created_at: String,
}

impl From<lumbr_db::entities::report::Model> for ReportResponse {
    fn from(r: lumbr_db::entities::report::Model) -> Self {
        Self {
            id: r.id,
            log_id: r.log_id,
            reporter_id: r.reporter_id,
            reported_user_id: r.reported_user_id,
            reason: r.reason,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Create report request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    pub log_id: String,
    pub reported_user_id: String,
    #[validate(length(min = 2, max = 60))]
    pub reason: String,
}

/// Report a log and its owner. One report per (log, reporter, reported
/// user) triple.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateReportRequest>,
) -> AppResult<ApiResponse<ReportResponse>> {
    req.validate()?;
    let report = state
        .moderation_service
        .create_report(
            &user.id,
            CreateReportInput {
                log_id: req.log_id,
                reported_user_id: req.reported_user_id,
                reason: req.reason,
            },
        )
        .await?;

    Ok(ApiResponse::ok(report.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/create", post(create))
}
