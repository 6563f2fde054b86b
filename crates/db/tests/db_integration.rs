//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `lumbr_test`)
//!   `TEST_DB_PASSWORD` (default: `lumbr_test`)
//!   `TEST_DB_NAME` (default: `lumbr_test`)

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::Utc;
use lumbr_db::entities::{log, user};
use lumbr_db::repositories::{LogRepository, TagRepository, UserRepository};
use lumbr_db::test_utils::{TestDatabase, TestDbConfig};
use sea_orm::Set;
use std::sync::Arc;

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_migrations_apply_cleanly() {
    let db = TestDatabase::create_unique().await.expect("Failed to create");
    let result = lumbr_db::migrate(db.connection()).await;
    assert!(result.is_ok(), "Migration failed: {:?}", result.err());
    db.drop_database().await.expect("Failed to drop");
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_log_tag_reconciliation_round_trip() {
    let db = TestDatabase::create_unique().await.expect("Failed to create");
    lumbr_db::migrate(db.connection()).await.expect("migrate");

    let conn = Arc::new(db.conn.clone());
    let user_repo = UserRepository::new(Arc::clone(&conn));
    let log_repo = LogRepository::new(Arc::clone(&conn));
    let tag_repo = TagRepository::new(Arc::clone(&conn));

    let user = user_repo
        .create(user::ActiveModel {
            id: Set("u1".to_string()),
            username: Set("alice".to_string()),
            name: Set(None),
            token: Set(None),
            avatar_url: Set(None),
            is_admin: Set(false),
            suspended: Set(false),
            suspend_reason: Set(None),
            suspend_date: Set(None),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        })
        .await
        .expect("create user");

    let log = log_repo
        .create(log::ActiveModel {
            id: Set("log1".to_string()),
            user_id: Set(user.id.clone()),
            title: Set("devlog".to_string()),
            description: Set(String::new()),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        })
        .await
        .expect("create log");

    // The tag catalog is seeded by migration; pick the first two entries.
    let catalog = tag_repo.find_all().await.expect("catalog");
    assert!(catalog.len() >= 2, "tag catalog should be seeded");
    let (a, b) = (catalog[0].id.clone(), catalog[1].id.clone());

    tag_repo
        .insert_log_tags(&log.id, &[a.clone(), b.clone()])
        .await
        .expect("insert");
    let mut current = tag_repo.find_log_tag_ids(&log.id).await.expect("read");
    current.sort();
    let mut expected = vec![a.clone(), b.clone()];
    expected.sort();
    assert_eq!(current, expected);

    // Removing an association that is already gone is a no-op.
    assert!(tag_repo.delete_log_tag(&log.id, &a).await.expect("delete"));
    assert!(!tag_repo.delete_log_tag(&log.id, &a).await.expect("redelete"));

    // Deleting the log cascades to the remaining association.
    log_repo.delete(&log.id).await.expect("delete log");
    let after = tag_repo.find_log_tag_ids(&log.id).await.expect("read");
    assert!(after.is_empty());

    db.drop_database().await.expect("Failed to drop");
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}

#[test]
fn test_database_url_format() {
    let config = TestDbConfig {
        host: "testhost".to_string(),
        port: 5432,
        username: "testuser".to_string(),
        password: "testpass".to_string(),
        database: "testdb".to_string(),
    };

    let url = config.database_url();
    assert!(url.starts_with("postgres://"));
    assert!(url.contains("testhost"));
    assert!(url.contains("5432"));
    assert!(url.contains("testuser"));
    assert!(url.contains("testdb"));
}

#[test]
fn test_postgres_url_format() {
    let config = TestDbConfig::default();
    let url = config.postgres_url();
    assert!(url.ends_with("/postgres"));
}
