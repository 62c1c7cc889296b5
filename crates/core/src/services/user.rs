//! User service.

use chrono::Utc;
use muse_common::{AppResult, IdGenerator};
use muse_db::{entities::user, repositories::UserRepository};
use sea_orm::Set;
use serde::Deserialize;
use std::collections::HashMap;
use validator::Validate;

/// Input for enrolling a user. The uid comes from the auth layer, not
/// the body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnrollUserInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(url)]
    pub profile_img: Option<String>,
}

/// Input for updating a user's profile.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(max = 32))]
    pub gender: Option<String>,

    #[validate(range(min = 1, max = 150))]
    pub age: Option<i32>,
}

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Enroll a user, reviving a previously deactivated account.
    ///
    /// Enrolling an already active account changes nothing. Reviving a
    /// deactivated one takes the fresh identity fields, clears gender
    /// and age, and restarts the account age.
    pub async fn enroll(&self, uid: &str, input: EnrollUserInput) -> AppResult<user::Model> {
        input.validate()?;

        match self.user_repo.find_by_uid(uid).await? {
            Some(existing) if existing.is_active => Ok(existing),
            Some(existing) => {
                let mut active: user::ActiveModel = existing.into();
                active.is_active = Set(true);
                active.name = Set(input.name);
                active.email = Set(input.email);
                active.profile_img = Set(input.profile_img);
                active.gender = Set(None);
                active.age = Set(None);
                active.created_at = Set(Utc::now().into());
                active.updated_at = Set(Some(Utc::now().into()));
                self.user_repo.update(active).await
            }
            None => {
                let model = user::ActiveModel {
                    id: Set(self.id_gen.generate()),
                    uid: Set(uid.to_string()),
                    name: Set(input.name),
                    email: Set(input.email),
                    profile_img: Set(input.profile_img),
                    is_active: Set(true),
                    created_at: Set(Utc::now().into()),
                    ..Default::default()
                };
                self.user_repo.create(model).await
            }
        }
    }

    /// Find a user by uid.
    pub async fn find_by_uid(&self, uid: &str) -> AppResult<Option<user::Model>> {
        let found = self.user_repo.find_by_uid(uid).await?;
        if found.is_none() {
            tracing::info!(uid = %uid, "No user for uid");
        }
        Ok(found)
    }

    /// Get a user by uid.
    pub async fn get_by_uid(&self, uid: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_uid(uid).await
    }

    /// Update a user's name, gender and age.
    ///
    /// Gender and age are overwritten as given; a missing value clears
    /// the stored one.
    pub async fn update_info(&self, uid: &str, input: UpdateUserInput) -> AppResult<user::Model> {
        input.validate()?;

        let existing = self.user_repo.get_by_uid(uid).await?;
        let mut active: user::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.gender = Set(input.gender);
        active.age = Set(input.age);
        active.updated_at = Set(Some(Utc::now().into()));
        self.user_repo.update(active).await
    }

    /// Update a user's profile image.
    pub async fn update_profile_img(&self, uid: &str, profile_img: &str) -> AppResult<user::Model> {
        let existing = self.user_repo.get_by_uid(uid).await?;
        let mut active: user::ActiveModel = existing.into();
        active.profile_img = Set(Some(profile_img.to_string()));
        active.updated_at = Set(Some(Utc::now().into()));
        self.user_repo.update(active).await
    }

    /// Display names for the given uids, in request order.
    ///
    /// Uids that do not resolve are omitted; duplicates resolve as often
    /// as they are asked for.
    pub async fn display_names(&self, uids: &[String]) -> AppResult<Vec<String>> {
        if uids.is_empty() {
            return Ok(Vec::new());
        }
        let users = self.user_repo.find_by_uids(uids).await?;
        let by_uid: HashMap<&str, &user::Model> =
            users.iter().map(|u| (u.uid.as_str(), u)).collect();
        Ok(uids
            .iter()
            .filter_map(|uid| by_uid.get(uid.as_str()).map(|u| u.name.clone()))
            .collect())
    }
}
