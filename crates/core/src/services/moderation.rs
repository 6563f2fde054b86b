//! Moderation service: report lifecycle and user suspensions.
//!
//! A user is either active or suspended. Suspension is entered by an
//! admin action and left again by the daily sweep once the recorded
//! lift date arrives; there is no permanent-ban state.

use chrono::{DateTime, NaiveDate, Utc};
use lumbr_common::{AppError, AppResult, IdGenerator};
use lumbr_db::{
    entities::{report, user},
    repositories::{LogRepository, ReportRepository, UserRepository},
};
use sea_orm::Set;

/// Longest accepted report or suspension reason.
const REASON_MAX_LEN: usize = 60;

/// Input for creating a report.
pub struct CreateReportInput {
    pub log_id: String,
    pub reported_user_id: String,
    pub reason: String,
}

/// Input for suspending a user.
pub struct SuspendUserInput {
    pub user_id: String,
    /// The log that triggered the suspension. Deleted as part of the
    /// action; its posts, comments, likes and tag rows cascade.
    pub log_id: String,
    /// Calendar date (UTC) on which the suspension lifts.
    pub suspend_until: NaiveDate,
    pub reason: Option<String>,
}

/// Moderation service for reports and the suspension lifecycle.
#[derive(Clone)]
pub struct ModerationService {
    report_repo: ReportRepository,
    user_repo: UserRepository,
    log_repo: LogRepository,
    id_gen: IdGenerator,
}

impl ModerationService {
    /// Create a new moderation service.
    #[must_use]
    pub const fn new(
        report_repo: ReportRepository,
        user_repo: UserRepository,
        log_repo: LogRepository,
    ) -> Self {
        Self {
            report_repo,
            user_repo,
            log_repo,
            id_gen: IdGenerator::new(),
        }
    }

    // ========== Reports ==========

    /// Create a report against a log and its owner.
    ///
    /// At most one report may exist per (log, reporter, reported user)
    /// triple; the check here produces the user-facing conflict and a
    /// unique index over the triple closes the check-then-insert race.
    pub async fn create_report(
        &self,
        reporter_id: &str,
        input: CreateReportInput,
    ) -> AppResult<report::Model> {
        let reason = input.reason.trim();
        if reason.len() < 2 {
            return Err(AppError::Validation(
                "Report reason must be at least 2 characters".to_string(),
            ));
        }
        if reason.len() > REASON_MAX_LEN {
            return Err(AppError::Validation(
                "Report reason must be less than 60 characters".to_string(),
            ));
        }
        if reporter_id == input.reported_user_id {
            return Err(AppError::BadRequest("Cannot report yourself".to_string()));
        }

        self.log_repo.get_by_id(&input.log_id).await?;
        self.user_repo.get_by_id(&input.reported_user_id).await?;

        if self
            .report_repo
            .find_by_triple(&input.log_id, reporter_id, &input.reported_user_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "You have already reported this log".to_string(),
            ));
        }

        let model = report::ActiveModel {
            id: Set(self.id_gen.generate()),
            log_id: Set(input.log_id),
            reporter_id: Set(reporter_id.to_string()),
            reported_user_id: Set(input.reported_user_id),
            reason: Set(reason.to_string()),
            created_at: Set(Utc::now().into()),
        };

        self.report_repo.create(model).await
    }

    /// Get all reports for the admin dashboard, oldest first.
    pub async fn list_reports(&self, actor_id: &str) -> AppResult<Vec<report::Model>> {
        self.ensure_admin(actor_id).await?;
        self.report_repo.find_all().await
    }

    /// Dismiss a single report without touching the reported user.
    pub async fn ignore_report(&self, actor_id: &str, report_id: &str) -> AppResult<()> {
        self.ensure_admin(actor_id).await?;

        let report = self.report_repo.get_by_id(report_id).await?;
        self.report_repo.delete(&report.id).await?;

        tracing::info!(report_id, actor_id, "Ignored report");
        Ok(())
    }

    // ========== Suspensions ==========

    /// Suspend a user until a given date.
    ///
    /// Performs, in order: set the user's suspension fields, delete every
    /// report against the user, delete the triggering log. A failed
    /// sub-step propagates immediately; completed sub-steps are not
    /// rolled back here.
    pub async fn suspend_user(&self, actor_id: &str, input: SuspendUserInput) -> AppResult<()> {
        if let Some(reason) = input.reason.as_deref()
            && reason.len() > REASON_MAX_LEN
        {
            return Err(AppError::Validation(
                "Reason must be less than 60 characters".to_string(),
            ));
        }
        if input.suspend_until < Utc::now().date_naive() {
            return Err(AppError::Validation(
                "Suspension lift date must not be in the past".to_string(),
            ));
        }

        let actor = self.ensure_admin(actor_id).await?;
        if actor.id == input.user_id {
            return Err(AppError::BadRequest("Cannot suspend yourself".to_string()));
        }

        let target = self.user_repo.get_by_id(&input.user_id).await?;
        if target.is_admin {
            return Err(AppError::Forbidden("Cannot suspend an admin".to_string()));
        }

        // The triggering log must exist before any mutation is issued.
        self.log_repo.get_by_id(&input.log_id).await?;

        self.user_repo
            .set_suspension(&input.user_id, input.suspend_until, input.reason)
            .await?;
        let reports_removed = self
            .report_repo
            .delete_by_reported_user(&input.user_id)
            .await?;
        self.log_repo.delete(&input.log_id).await?;

        tracing::info!(
            user_id = %input.user_id,
            log_id = %input.log_id,
            suspend_until = %input.suspend_until,
            reports_removed,
            "Suspended user"
        );
        Ok(())
    }

    /// Reactivate every user whose suspension lifts on the given instant's
    /// UTC date. Returns the IDs of the users unsuspended.
    ///
    /// Idempotent: a cleared user no longer matches the query, so a
    /// second run with the same `now` unsuspends nobody.
    pub async fn sweep_expired_suspensions(&self, now: DateTime<Utc>) -> AppResult<Vec<String>> {
        let date = now.date_naive();
        let expired = self.user_repo.find_suspended_on(date).await?;

        let mut unsuspended = Vec::with_capacity(expired.len());
        for user in expired {
            self.user_repo.clear_suspension(&user.id).await?;
            unsuspended.push(user.id);
        }

        if unsuspended.is_empty() {
            tracing::debug!(%date, "Suspension sweep found nothing to lift");
        } else {
            tracing::info!(%date, count = unsuspended.len(), "Lifted expired suspensions");
        }
        Ok(unsuspended)
    }

    /// Fail unless the actor exists and is an admin.
    pub async fn ensure_admin(&self, actor_id: &str) -> AppResult<user::Model> {
        let actor = self.user_repo.get_by_id(actor_id).await?;
        if !actor.is_admin {
            return Err(AppError::Forbidden(
                "Only admins can perform moderation actions".to_string(),
            ));
        }
        Ok(actor)
    }
}
