//! Admin moderation endpoints.
//!
//! Every handler passes the caller as the explicit actor; the service
//! layer decides whether they may moderate.

use axum::{Json, Router, extract::State, routing::post};
use chrono::{NaiveDate, Utc};
use lumbr_common::AppResult;
use lumbr_core::SuspendUserInput;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    endpoints::reports::ReportResponse, extractors::AuthUser, middleware::AppState,
    response::ApiResponse,
};

/// Get all open reports, oldest first.
async fn list_reports(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<ReportResponse>>> {
    let reports = state.moderation_service.list_reports(&user.id).await?;
    Ok(ApiResponse::ok(
        reports.into_iter().map(Into::into).collect(),
    ))
}

/// Ignore report request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoreReportRequest {
    pub report_id: String,
}

/// Dismiss a report without suspending anyone.
async fn ignore_report(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<IgnoreReportRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .moderation_service
        .ignore_report(&user.id, &req.report_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Suspend request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SuspendRequest {
    pub user_id: String,
    pub log_id: String,
    /// Calendar date (UTC) on which the suspension lifts.
    pub suspend_until: NaiveDate,
    #[validate(length(max = 60))]
    pub reason: Option<String>,
}

/// Suspend a user until a date, removing their reports and the
/// triggering log.
async fn suspend(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SuspendRequest>,
) -> AppResult<ApiResponse<()>> {
    req.validate()?;
    state
        .moderation_service
        .suspend_user(
            &user.id,
            SuspendUserInput {
                user_id: req.user_id,
                log_id: req.log_id,
                suspend_until: req.suspend_until,
                reason: req.reason,
            },
        )
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Sweep outcome.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepResponse {
    pub unsuspended: Vec<String>,
}

/// Run the suspension sweep immediately.
///
/// The same sweep runs in-process on an interval; this route exists for
/// an external scheduler and for operators. Idempotent within a day.
async fn sweep(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<SweepResponse>> {
    state.moderation_service.ensure_admin(&user.id).await?;
    let unsuspended = state
        .moderation_service
        .sweep_expired_suspensions(Utc::now())
        .await?;
    Ok(ApiResponse::ok(SweepResponse { unsuspended }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports/list", post(list_reports))
        .route("/reports/ignore", post(ignore_report))
        .route("/suspend", post(suspend))
        .route("/sweep", post(sweep))
}
