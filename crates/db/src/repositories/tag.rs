//! Tag repository.
//!
//! Covers the tag catalog plus the two association tables (log tags and
//! user interests) that the reconciler converges.

use std::collections::HashSet;
use std::sync::Arc;

use crate::entities::{LogTag, Tag, UserInterest, log_tag, tag, user_interest};
use lumbr_common::{AppError, AppResult};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

/// Tag repository for database operations.
#[derive(Clone)]
pub struct TagRepository {
    db: Arc<DatabaseConnection>,
}

impl TagRepository {
    /// Create a new tag repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    // ========== Tag catalog ==========

    /// Get the full tag catalog.
    pub async fn find_all(&self) -> AppResult<Vec<tag::Model>> {
        Tag::find()
            .order_by_asc(tag::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a tag by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<tag::Model>> {
        Tag::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find tags by ID set, sorted by name.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<tag::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Tag::find()
            .filter(tag::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(tag::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ========== Log tag associations ==========

    /// Get the tag IDs currently associated with a log.
    pub async fn find_log_tag_ids(&self, log_id: &str) -> AppResult<Vec<String>> {
        Ok(LogTag::find()
            .filter(log_tag::Column::LogId.eq(log_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .into_iter()
            .map(|m| m.tag_id)
            .collect())
    }

    /// Delete one log/tag association. Returns whether a row existed.
    pub async fn delete_log_tag(&self, log_id: &str, tag_id: &str) -> AppResult<bool> {
        let result = LogTag::delete_many()
            .filter(log_tag::Column::LogId.eq(log_id))
            .filter(log_tag::Column::TagId.eq(tag_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }

    /// Insert log/tag associations as a single batch.
    pub async fn insert_log_tags(&self, log_id: &str, tag_ids: &[String]) -> AppResult<()> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        let models = tag_ids.iter().map(|tag_id| log_tag::ActiveModel {
            log_id: Set(log_id.to_string()),
            tag_id: Set(tag_id.clone()),
        });
        LogTag::insert_many(models)
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get the IDs of logs carrying any of the given tags.
    pub async fn find_log_ids_with_tags(&self, tag_ids: &[String]) -> AppResult<Vec<String>> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = LogTag::find()
            .filter(log_tag::Column::TagId.is_in(tag_ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut seen = HashSet::new();
        Ok(rows
            .into_iter()
            .map(|m| m.log_id)
            .filter(|id| seen.insert(id.clone()))
            .collect())
    }

    // ========== User interest associations ==========

    /// Get the tag IDs a user has marked as interests.
    pub async fn find_interest_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        Ok(UserInterest::find()
            .filter(user_interest::Column::UserId.eq(user_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .into_iter()
            .map(|m| m.tag_id)
            .collect())
    }

    /// Delete one user/tag interest. Returns whether a row existed.
    pub async fn delete_interest(&self, user_id: &str, tag_id: &str) -> AppResult<bool> {
        let result = UserInterest::delete_many()
            .filter(user_interest::Column::UserId.eq(user_id))
            .filter(user_interest::Column::TagId.eq(tag_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }

    /// Insert user/tag interests as a single batch.
    pub async fn insert_interests(&self, user_id: &str, tag_ids: &[String]) -> AppResult<()> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        let models = tag_ids.iter().map(|tag_id| user_interest::ActiveModel {
            user_id: Set(user_id.to_string()),
            tag_id: Set(tag_id.clone()),
        });
        UserInterest::insert_many(models)
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_log_tag(log_id: &str, tag_id: &str) -> log_tag::Model {
        log_tag::Model {
            log_id: log_id.to_string(),
            tag_id: tag_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_log_tag_ids() {
        let rows = vec![create_log_tag("log1", "tag_rust"), create_log_tag("log1", "tag_webdev")];

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([rows])
                .into_connection(),
        );

        let repo = TagRepository::new(db);
        let result = repo.find_log_tag_ids("log1").await.unwrap();

        assert_eq!(result, vec!["tag_rust".to_string(), "tag_webdev".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_log_tag_existing_row() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = TagRepository::new(db);
        let deleted = repo.delete_log_tag("log1", "tag_rust").await.unwrap();

        assert!(deleted);
    }

    #[tokio::test]
    async fn test_delete_log_tag_missing_row_is_noop() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = TagRepository::new(db);
        let deleted = repo.delete_log_tag("log1", "tag_gone").await.unwrap();

        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_insert_log_tags_empty_skips_query() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = TagRepository::new(db);
        repo.insert_log_tags("log1", &[]).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_log_ids_with_tags_dedups() {
        let rows = vec![
            create_log_tag("log1", "tag_rust"),
            create_log_tag("log1", "tag_webdev"),
            create_log_tag("log2", "tag_rust"),
        ];

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([rows])
                .into_connection(),
        );

        let repo = TagRepository::new(db);
        let result = repo
            .find_log_ids_with_tags(&["tag_rust".to_string(), "tag_webdev".to_string()])
            .await
            .unwrap();

        assert_eq!(result, vec!["log1".to_string(), "log2".to_string()]);
    }
}
