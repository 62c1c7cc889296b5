//! Love repository.

use std::sync::Arc;

use crate::entities::{Love, love};
use muse_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Love repository for database operations.
#[derive(Clone)]
pub struct LoveRepository {
    db: Arc<DatabaseConnection>,
}

impl LoveRepository {
    /// Create a new love repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a love by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<love::Model>> {
        Love::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the love between a user and a picture, active or not.
    ///
    /// There is at most one row per (user, picture); toggling flips its
    /// active flag rather than inserting a second row.
    pub async fn find_by_user_and_picture(
        &self,
        user_uid: &str,
        picture_id: i64,
    ) -> AppResult<Option<love::Model>> {
        Love::find()
            .filter(love::Column::UserUid.eq(user_uid))
            .filter(love::Column::PictureId.eq(picture_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether a user currently loves a picture.
    pub async fn has_active_love(&self, user_uid: &str, picture_id: i64) -> AppResult<bool> {
        Ok(self
            .find_by_user_and_picture(user_uid, picture_id)
            .await?
            .is_some_and(|l| l.is_active))
    }

    /// Get all loves owned by a user, active and inactive.
    pub async fn find_by_user(&self, user_uid: &str) -> AppResult<Vec<love::Model>> {
        Love::find()
            .filter(love::Column::UserUid.eq(user_uid))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all loves referencing a picture, active and inactive.
    pub async fn find_by_picture(&self, picture_id: i64) -> AppResult<Vec<love::Model>> {
        Love::find()
            .filter(love::Column::PictureId.eq(picture_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the picture IDs a user currently loves, most recent first.
    pub async fn find_active_picture_ids(&self, user_uid: &str) -> AppResult<Vec<i64>> {
        let loves = Love::find()
            .filter(love::Column::UserUid.eq(user_uid))
            .filter(love::Column::IsActive.eq(true))
            .order_by_desc(love::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(loves.into_iter().map(|l| l.picture_id).collect())
    }

    /// Create a new love.
    pub async fn create(&self, model: love::ActiveModel) -> AppResult<love::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a love.
    pub async fn update(&self, model: love::ActiveModel) -> AppResult<love::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
