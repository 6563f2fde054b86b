//! Tag service.
//!
//! Converges an owner's tag associations toward a submitted selection by
//! set difference rather than dropping and recreating every row: removals
//! are issued first, then the missing associations go in as one batch.

use std::collections::BTreeSet;

use lumbr_common::{AppError, AppResult};
use lumbr_db::{
    entities::tag,
    repositories::{LogRepository, TagRepository, UserRepository},
};

/// Maximum number of tags a log may carry.
pub const LOG_TAG_LIMIT: usize = 5;

/// Outcome of a reconciliation: which associations were inserted and
/// which were removed. The two sets are always disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagDiff {
    /// Tag IDs that were newly associated, sorted.
    pub added: Vec<String>,
    /// Tag IDs whose associations were removed, sorted.
    pub removed: Vec<String>,
}

impl TagDiff {
    /// Compute the minimal add/remove sets taking `current` to `desired`.
    #[must_use]
    pub fn between(current: &[String], desired: &[String]) -> Self {
        let current: BTreeSet<&str> = current.iter().map(String::as_str).collect();
        let desired: BTreeSet<&str> = desired.iter().map(String::as_str).collect();

        Self {
            added: desired
                .difference(&current)
                .map(|s| (*s).to_string())
                .collect(),
            removed: current
                .difference(&desired)
                .map(|s| (*s).to_string())
                .collect(),
        }
    }

    /// Whether the reconciliation changed anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Tag service for the catalog and for association reconciliation.
#[derive(Clone)]
pub struct TagService {
    tag_repo: TagRepository,
    log_repo: LogRepository,
    user_repo: UserRepository,
}

impl TagService {
    /// Create a new tag service.
    #[must_use]
    pub const fn new(
        tag_repo: TagRepository,
        log_repo: LogRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            tag_repo,
            log_repo,
            user_repo,
        }
    }

    /// Get the full tag catalog.
    pub async fn list(&self) -> AppResult<Vec<tag::Model>> {
        self.tag_repo.find_all().await
    }

    /// Get the tags currently associated with a log.
    pub async fn get_log_tags(&self, log_id: &str) -> AppResult<Vec<tag::Model>> {
        let ids = self.tag_repo.find_log_tag_ids(log_id).await?;
        self.tag_repo.find_by_ids(&ids).await
    }

    /// Get a user's interest tags.
    pub async fn get_interests(&self, user_id: &str) -> AppResult<Vec<tag::Model>> {
        let ids = self.tag_repo.find_interest_ids(user_id).await?;
        self.tag_repo.find_by_ids(&ids).await
    }

    /// Converge a log's tag associations toward the submitted selection.
    ///
    /// The cap is checked before anything touches the store. Removals
    /// target disjoint keys and are issued before the add batch, so the
    /// result is deterministic; removing an association that is already
    /// gone is a no-op.
    pub async fn reconcile_log_tags(
        &self,
        actor_id: &str,
        log_id: &str,
        desired: &[String],
    ) -> AppResult<TagDiff> {
        let desired = dedup_sorted(desired);
        if desired.len() > LOG_TAG_LIMIT {
            return Err(AppError::Validation(
                "You can only select up to 5 tags.".to_string(),
            ));
        }

        let log = self.log_repo.get_by_id(log_id).await?;
        if log.user_id != actor_id {
            let actor = self.user_repo.get_by_id(actor_id).await?;
            if !actor.is_admin {
                return Err(AppError::Forbidden(
                    "Only the log owner can edit its tags".to_string(),
                ));
            }
        }

        let current = self.tag_repo.find_log_tag_ids(log_id).await?;
        let diff = TagDiff::between(&current, &desired);

        for tag_id in &diff.removed {
            self.tag_repo.delete_log_tag(log_id, tag_id).await?;
        }
        if !diff.added.is_empty() {
            self.tag_repo.insert_log_tags(log_id, &diff.added).await?;
        }

        tracing::debug!(
            log_id,
            added = diff.added.len(),
            removed = diff.removed.len(),
            "Reconciled log tags"
        );
        Ok(diff)
    }

    /// Converge a user's interest associations toward the submitted
    /// selection. Interests carry no cap.
    pub async fn reconcile_interests(
        &self,
        user_id: &str,
        desired: &[String],
    ) -> AppResult<TagDiff> {
        let desired = dedup_sorted(desired);

        self.user_repo.get_by_id(user_id).await?;

        let current = self.tag_repo.find_interest_ids(user_id).await?;
        let diff = TagDiff::between(&current, &desired);

        for tag_id in &diff.removed {
            self.tag_repo.delete_interest(user_id, tag_id).await?;
        }
        if !diff.added.is_empty() {
            self.tag_repo.insert_interests(user_id, &diff.added).await?;
        }

        tracing::debug!(
            user_id,
            added = diff.added.len(),
            removed = diff.removed.len(),
            "Reconciled user interests"
        );
        Ok(diff)
    }
}

fn dedup_sorted(ids: &[String]) -> Vec<String> {
    let set: BTreeSet<&String> = ids.iter().collect();
    set.into_iter().cloned().collect()
}
