//! Love service.
//!
//! Orchestrates the love toggle across the love store, the picture
//! service counters, and the alarm service. Local rows are written
//! first; remote notifications are best-effort and never roll back
//! a committed toggle.

use crate::services::alarm_gateway::{AlarmCreate, AlarmGatewayService};
use crate::services::picture_gateway::{PictureGatewayService, PictureSummary};
use chrono::Utc;
use muse_common::{AppResult, IdGenerator};
use muse_db::{
    entities::{love, user},
    repositories::{LoveRepository, UserRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// Outcome of one best-effort remote notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SideEffect {
    /// The remote call succeeded.
    Applied,
    /// The remote call failed and was logged; local state is unaffected.
    Failed,
    /// The call was unnecessary on this path and not attempted.
    Skipped,
}

/// What a toggle did to the love row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    /// First love: a new row was inserted.
    Created,
    /// A withdrawn love was switched back on.
    Reactivated,
    /// An active love was switched off.
    Deactivated,
}

/// Result of a love toggle, including receipts for the remote calls.
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    pub love: love::Model,
    pub action: ToggleAction,
    pub counter: SideEffect,
    pub alarm: SideEffect,
}

/// Result of an account deactivation cascade.
#[derive(Debug, Clone)]
pub struct DeactivationOutcome {
    pub user: user::Model,
    /// Every picture the account had a love row for, in row order.
    pub picture_ids: Vec<i64>,
    pub pictures: SideEffect,
    pub alarms: SideEffect,
}

/// One entry of a bulk love-check request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoveCheckItem {
    /// The viewer whose love state is being asked about.
    pub uid: String,
    pub maker_uid: String,
    pub picture_id: i64,
}

/// One entry of a bulk love-check response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoveCheckResult {
    pub love_check: bool,
    pub maker_name: String,
}

/// Love service for business logic.
#[derive(Clone)]
pub struct LoveService {
    love_repo: LoveRepository,
    user_repo: UserRepository,
    pictures: PictureGatewayService,
    alarms: AlarmGatewayService,
    id_gen: IdGenerator,
}

impl LoveService {
    /// Create a new love service.
    #[must_use]
    pub fn new(
        love_repo: LoveRepository,
        user_repo: UserRepository,
        pictures: PictureGatewayService,
        alarms: AlarmGatewayService,
    ) -> Self {
        Self {
            love_repo,
            user_repo,
            pictures,
            alarms,
            id_gen: IdGenerator::new(),
        }
    }

    /// Toggle a love between a sender and a picture.
    ///
    /// A missing row creates an active love, an active row withdraws it,
    /// and an inactive row revives it. The row is committed before any
    /// remote call, so counter or alarm outages cannot lose a toggle.
    pub async fn toggle(
        &self,
        sender_uid: &str,
        maker_uid: &str,
        picture_id: i64,
    ) -> AppResult<ToggleOutcome> {
        // Both display names are resolved up front; an unknown account
        // on either side rejects the toggle before any state changes.
        let sender = self.user_repo.get_by_uid(sender_uid).await?;
        let receiver = self.user_repo.get_by_uid(maker_uid).await?;

        match self
            .love_repo
            .find_by_user_and_picture(sender_uid, picture_id)
            .await?
        {
            None => self.first_love(&sender, &receiver, picture_id).await,
            Some(existing) if existing.is_active => self.withdraw(existing, &sender, &receiver).await,
            Some(existing) => self.revive(existing, &sender, &receiver).await,
        }
    }

    /// Insert a new active love and notify both remote services.
    async fn first_love(
        &self,
        sender: &user::Model,
        receiver: &user::Model,
        picture_id: i64,
    ) -> AppResult<ToggleOutcome> {
        let model = love::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_uid: Set(sender.uid.clone()),
            picture_id: Set(picture_id),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let created = self.love_repo.create(model).await?;

        // The increment response doubles as the url lookup for the
        // alarm payload; on failure the alarm still goes out, with an
        // empty url.
        let (picture_url, counter) = match self.pictures.increment_count_fetch_url(picture_id).await
        {
            Ok(url) => (url, SideEffect::Applied),
            Err(e) => {
                tracing::warn!(error = %e, picture_id, "Failed to increment love count");
                (String::new(), SideEffect::Failed)
            }
        };

        let alarm = match self
            .alarms
            .create(AlarmCreate {
                sender_uid: sender.uid.clone(),
                receiver_uid: receiver.uid.clone(),
                picture_id,
                sender_name: sender.name.clone(),
                receiver_name: receiver.name.clone(),
                picture_url,
            })
            .await
        {
            Ok(()) => SideEffect::Applied,
            Err(e) => {
                tracing::warn!(error = %e, picture_id, "Failed to create love alarm");
                SideEffect::Failed
            }
        };

        Ok(ToggleOutcome {
            love: created,
            action: ToggleAction::Created,
            counter,
            alarm,
        })
    }

    /// Switch an active love off, then retire the alarm and the counter.
    async fn withdraw(
        &self,
        existing: love::Model,
        sender: &user::Model,
        receiver: &user::Model,
    ) -> AppResult<ToggleOutcome> {
        let picture_id = existing.picture_id;
        let updated = self.flip_love(existing, false).await?;

        let alarm = match self
            .alarms
            .deactivate(&sender.uid, &receiver.uid, picture_id)
            .await
        {
            Ok(()) => SideEffect::Applied,
            Err(e) => {
                tracing::warn!(error = %e, picture_id, "Failed to deactivate love alarm");
                SideEffect::Failed
            }
        };

        let counter = match self.pictures.decrement_count(picture_id).await {
            Ok(()) => SideEffect::Applied,
            Err(e) => {
                tracing::warn!(error = %e, picture_id, "Failed to decrement love count");
                SideEffect::Failed
            }
        };

        Ok(ToggleOutcome {
            love: updated,
            action: ToggleAction::Deactivated,
            counter,
            alarm,
        })
    }

    /// Switch a withdrawn love back on, then revive the alarm and the counter.
    async fn revive(
        &self,
        existing: love::Model,
        sender: &user::Model,
        receiver: &user::Model,
    ) -> AppResult<ToggleOutcome> {
        let picture_id = existing.picture_id;
        let updated = self.flip_love(existing, true).await?;

        let alarm = match self
            .alarms
            .activate(&sender.uid, &receiver.uid, picture_id)
            .await
        {
            Ok(()) => SideEffect::Applied,
            Err(e) => {
                tracing::warn!(error = %e, picture_id, "Failed to reactivate love alarm");
                SideEffect::Failed
            }
        };

        let counter = match self.pictures.increment_count(picture_id).await {
            Ok(()) => SideEffect::Applied,
            Err(e) => {
                tracing::warn!(error = %e, picture_id, "Failed to increment love count");
                SideEffect::Failed
            }
        };

        Ok(ToggleOutcome {
            love: updated,
            action: ToggleAction::Reactivated,
            counter,
            alarm,
        })
    }

    async fn flip_love(&self, existing: love::Model, is_active: bool) -> AppResult<love::Model> {
        let mut active: love::ActiveModel = existing.into();
        active.is_active = Set(is_active);
        active.updated_at = Set(Some(Utc::now().into()));
        self.love_repo.update(active).await
    }

    /// Deactivate an account and cascade to its loves, pictures and alarms.
    ///
    /// Returns `None` when the uid is unknown; nothing is touched then.
    /// Every love row is switched off, whatever its prior state, and the
    /// full picture list is handed to the picture service so it can
    /// retract the counted loves alongside the account's own pictures.
    pub async fn deactivate_user(&self, uid: &str) -> AppResult<Option<DeactivationOutcome>> {
        let Some(found) = self.user_repo.find_by_uid(uid).await? else {
            tracing::info!(uid = %uid, "No user to deactivate for uid");
            return Ok(None);
        };

        let mut active: user::ActiveModel = found.into();
        active.is_active = Set(false);
        active.updated_at = Set(Some(Utc::now().into()));
        let user = self.user_repo.update(active).await?;

        let loves = self.love_repo.find_by_user(uid).await?;
        let mut picture_ids = Vec::with_capacity(loves.len());
        for existing in loves {
            picture_ids.push(existing.picture_id);
            self.flip_love(existing, false).await?;
        }

        let pictures = if picture_ids.is_empty() {
            SideEffect::Skipped
        } else {
            match self
                .pictures
                .deactivate_user_pictures(uid, picture_ids.clone())
                .await
            {
                Ok(()) => SideEffect::Applied,
                Err(e) => {
                    tracing::warn!(error = %e, uid = %uid, "Failed to retract loves from pictures");
                    SideEffect::Failed
                }
            }
        };

        // Alarms are removed even for an account with no loves; it may
        // still appear as a receiver.
        let alarms = match self.alarms.remove_all_for_user(uid).await {
            Ok(()) => SideEffect::Applied,
            Err(e) => {
                tracing::warn!(error = %e, uid = %uid, "Failed to remove alarms for user");
                SideEffect::Failed
            }
        };

        Ok(Some(DeactivationOutcome {
            user,
            picture_ids,
            pictures,
            alarms,
        }))
    }

    /// Switch off every love on a removed picture.
    ///
    /// The picture service calls this after taking a picture down, so no
    /// counter or alarm calls go back out. Returns the number of rows
    /// switched off.
    pub async fn deactivate_picture(&self, picture_id: i64) -> AppResult<usize> {
        let loves = self.love_repo.find_by_picture(picture_id).await?;
        let count = loves.len();
        for existing in loves {
            self.flip_love(existing, false).await?;
        }
        Ok(count)
    }

    /// Answer a bulk love-check request.
    ///
    /// Results follow the request order. Entries whose maker does not
    /// resolve are dropped rather than errored, so the response can be
    /// shorter than the request.
    pub async fn love_checks_with_makers(
        &self,
        items: Vec<LoveCheckItem>,
    ) -> AppResult<Vec<LoveCheckResult>> {
        let mut results = Vec::with_capacity(items.len());
        for item in items {
            let Some(maker) = self.user_repo.find_by_uid(&item.maker_uid).await? else {
                continue;
            };
            let love_check = self
                .love_repo
                .has_active_love(&item.uid, item.picture_id)
                .await?;
            results.push(LoveCheckResult {
                love_check,
                maker_name: maker.name,
            });
        }
        Ok(results)
    }

    /// Full picture records for the caller's own loved pictures, newest love first.
    pub async fn my_loved_pictures(&self, uid: &str) -> AppResult<Vec<PictureSummary>> {
        let picture_ids = self.love_repo.find_active_picture_ids(uid).await?;
        if picture_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.pictures.fetch_loved_pictures(picture_ids).await
    }

    /// Public picture records for another user's loved pictures.
    ///
    /// When a signed-in viewer is given, each record's love flag is
    /// re-annotated with the viewer's own state; the picture service
    /// does not know who is asking.
    pub async fn user_loved_pictures(
        &self,
        target_uid: &str,
        viewer_uid: Option<&str>,
    ) -> AppResult<Vec<PictureSummary>> {
        let picture_ids = self.love_repo.find_active_picture_ids(target_uid).await?;
        if picture_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut pictures = self.pictures.fetch_public_loved_pictures(picture_ids).await?;

        if let Some(viewer) = viewer_uid {
            for picture in &mut pictures {
                if self
                    .love_repo
                    .has_active_love(viewer, picture.picture_id)
                    .await?
                {
                    picture.love_check = true;
                }
            }
        }

        Ok(pictures)
    }
}
