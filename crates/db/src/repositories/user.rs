//! User repository.

use std::sync::Arc;

use crate::entities::{User, user};
use muse_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// User repository for database operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<user::Model>> {
        User::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by external uid.
    pub async fn find_by_uid(&self, uid: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Uid.eq(uid))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by external uid, returning an error if not found.
    pub async fn get_by_uid(&self, uid: &str) -> AppResult<user::Model> {
        self.find_by_uid(uid)
            .await?
            .ok_or_else(|| AppError::UserNotFound(uid.to_string()))
    }

    /// Find users by external uids.
    pub async fn find_by_uids(&self, uids: &[String]) -> AppResult<Vec<user::Model>> {
        if uids.is_empty() {
            return Ok(vec![]);
        }

        User::find()
            .filter(user::Column::Uid.is_in(uids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new user.
    pub async fn create(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a user.
    pub async fn update(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};
    use std::sync::Arc;

    fn create_test_user(id: &str, uid: &str, name: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            uid: uid.to_string(),
            name: name.to_string(),
            email: Some(format!("{uid}@example.com")),
            profile_img: None,
            gender: None,
            age: None,
            is_active: true,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_uid_found() {
        let user = create_test_user("user1", "uid1", "Alice");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_by_uid("uid1").await.unwrap();

        assert!(result.is_some());
        let found = result.unwrap();
        assert_eq!(found.uid, "uid1");
        assert_eq!(found.name, "Alice");
    }

    #[tokio::test]
    async fn test_find_by_uid_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_by_uid("nonexistent").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_by_uid_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.get_by_uid("nonexistent").await;

        assert!(result.is_err());
        match result {
            Err(AppError::UserNotFound(uid)) => assert_eq!(uid, "nonexistent"),
            _ => panic!("Expected UserNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_by_uids() {
        let user1 = create_test_user("user1", "uid1", "Alice");
        let user2 = create_test_user("user2", "uid2", "Bob");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user1, user2]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo
            .find_by_uids(&["uid1".to_string(), "uid2".to_string()])
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_uids_empty_input() {
        // No query should be issued; an empty mock would panic if one were
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = UserRepository::new(db);
        let result = repo.find_by_uids(&[]).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_create_user() {
        let user = create_test_user("user1", "uid1", "Alice");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = UserRepository::new(db);

        let active = user::ActiveModel {
            id: Set("user1".to_string()),
            uid: Set("uid1".to_string()),
            name: Set("Alice".to_string()),
            ..Default::default()
        };

        let result = repo.create(active).await.unwrap();
        assert_eq!(result.uid, "uid1");
    }
}
