//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance and are ignored by
//! default. Run with: `cargo test --test db_integration -- --ignored`
//!
//! Setup test database:
//!   docker-compose -f docker-compose.test.yml up -d test-db
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `muse_test`)
//!   `TEST_DB_PASSWORD` (default: `muse_test`)
//!   `TEST_DB_NAME` (default: `muse_test`)

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use muse_common::IdGenerator;
use muse_db::entities::{love, user};
use muse_db::repositories::{LoveRepository, UserRepository};
use muse_db::test_utils::TestDatabase;
use sea_orm::{Set, SqlxPostgresConnector};

/// Owned handle to the test database's connection pool.
///
/// `DatabaseConnection` is not `Clone` while sea-orm's `mock` feature is
/// enabled (it is, by the unit tests), so clone the underlying sqlx pool
/// instead — the same thing `DatabaseConnection::clone` does without `mock`.
fn shared_conn(db: &TestDatabase) -> Arc<sea_orm::DatabaseConnection> {
    Arc::new(SqlxPostgresConnector::from_sqlx_postgres_pool(
        db.connection().get_postgres_connection_pool().clone(),
    ))
}

fn user_row(uid: &str, name: &str) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(IdGenerator::new().generate()),
        uid: Set(uid.to_string()),
        name: Set(name.to_string()),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
}

fn love_row(
    user_uid: &str,
    picture_id: i64,
    is_active: bool,
    created_at: DateTime<Utc>,
) -> love::ActiveModel {
    love::ActiveModel {
        id: Set(IdGenerator::new().generate()),
        user_uid: Set(user_uid.to_string()),
        picture_id: Set(picture_id),
        is_active: Set(is_active),
        created_at: Set(created_at.into()),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_migrations_apply_cleanly() {
    let db = TestDatabase::create_unique()
        .await
        .expect("Failed to create database");

    let result = muse_db::migrate(db.connection()).await;
    assert!(result.is_ok(), "Migration failed: {:?}", result.err());

    db.drop_database().await.expect("Failed to drop database");
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_user_create_and_find_by_uid() {
    let db = TestDatabase::create_unique().await.unwrap();
    muse_db::migrate(db.connection()).await.unwrap();

    let conn = shared_conn(&db);
    let users = UserRepository::new(conn);

    users.create(user_row("uid1", "Alice")).await.unwrap();

    let found = users.find_by_uid("uid1").await.unwrap().unwrap();
    assert_eq!(found.name, "Alice");
    assert!(found.is_active);

    assert!(users.find_by_uid("ghost").await.unwrap().is_none());

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_love_unique_per_user_and_picture() {
    let db = TestDatabase::create_unique().await.unwrap();
    muse_db::migrate(db.connection()).await.unwrap();

    let conn = shared_conn(&db);
    let users = UserRepository::new(Arc::clone(&conn));
    let loves = LoveRepository::new(conn);

    users.create(user_row("uid1", "Alice")).await.unwrap();
    loves
        .create(love_row("uid1", 42, true, Utc::now()))
        .await
        .unwrap();

    // Second row for the same (user, picture) violates the unique index
    let duplicate = loves
        .create(love_row("uid1", 42, true, Utc::now()))
        .await;
    assert!(duplicate.is_err());

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_love_flip_keeps_single_row() {
    let db = TestDatabase::create_unique().await.unwrap();
    muse_db::migrate(db.connection()).await.unwrap();

    let conn = shared_conn(&db);
    let users = UserRepository::new(Arc::clone(&conn));
    let loves = LoveRepository::new(conn);

    users.create(user_row("uid1", "Alice")).await.unwrap();
    let created = loves
        .create(love_row("uid1", 42, true, Utc::now()))
        .await
        .unwrap();

    let mut flip: love::ActiveModel = created.into();
    flip.is_active = Set(false);
    flip.updated_at = Set(Some(Utc::now().into()));
    loves.update(flip).await.unwrap();

    let rows = loves.find_by_user("uid1").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].is_active);
    assert!(!loves.has_active_love("uid1", 42).await.unwrap());

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_active_picture_ids_most_recent_first() {
    let db = TestDatabase::create_unique().await.unwrap();
    muse_db::migrate(db.connection()).await.unwrap();

    let conn = shared_conn(&db);
    let users = UserRepository::new(Arc::clone(&conn));
    let loves = LoveRepository::new(conn);

    users.create(user_row("uid1", "Alice")).await.unwrap();

    let earlier = Utc::now() - Duration::minutes(2);
    loves
        .create(love_row("uid1", 1, true, earlier))
        .await
        .unwrap();
    loves
        .create(love_row("uid1", 2, true, Utc::now()))
        .await
        .unwrap();
    loves
        .create(love_row("uid1", 3, false, Utc::now()))
        .await
        .unwrap();

    let ids = loves.find_active_picture_ids("uid1").await.unwrap();
    assert_eq!(ids, vec![2, 1]);

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_cleanup_truncates_tables() {
    let db = TestDatabase::create_unique().await.unwrap();
    muse_db::migrate(db.connection()).await.unwrap();

    let conn = shared_conn(&db);
    let users = UserRepository::new(Arc::clone(&conn));

    users.create(user_row("uid1", "Alice")).await.unwrap();
    db.cleanup().await.unwrap();

    assert!(users.find_by_uid("uid1").await.unwrap().is_none());

    db.drop_database().await.unwrap();
}
