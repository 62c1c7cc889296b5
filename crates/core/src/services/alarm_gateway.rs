//! Alarm service gateway.
//!
//! Provides an abstraction for notifying the alarm service about love
//! events. The actual HTTP implementation is provided by the gateway crate.

use async_trait::async_trait;
use muse_common::AppResult;
use serde::Serialize;
use std::sync::Arc;

/// Payload for the alarm created on a first love.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmCreate {
    pub sender_uid: String,
    pub receiver_uid: String,
    pub picture_id: i64,
    pub sender_name: String,
    pub receiver_name: String,
    /// May be empty when the picture service could not be reached.
    pub picture_url: String,
}

/// Trait for alarm service calls.
#[async_trait]
pub trait AlarmGateway: Send + Sync {
    /// Create an alarm for a first love.
    async fn create(&self, alarm: AlarmCreate) -> AppResult<()>;

    /// Revive the alarm for a picture that was loved again.
    ///
    /// # Arguments
    /// * `sender_uid` - The uid of the account that loved the picture
    /// * `receiver_uid` - The uid of the picture's maker
    /// * `picture_id` - The picture the alarm belongs to
    async fn activate(
        &self,
        sender_uid: &str,
        receiver_uid: &str,
        picture_id: i64,
    ) -> AppResult<()>;

    /// Retire the alarm for a picture that was unloved.
    async fn deactivate(
        &self,
        sender_uid: &str,
        receiver_uid: &str,
        picture_id: i64,
    ) -> AppResult<()>;

    /// Remove every alarm a departing account appears in.
    async fn remove_all_for_user(&self, uid: &str) -> AppResult<()>;
}

/// A no-op implementation of AlarmGateway for testing or when alarms are disabled.
#[derive(Clone, Default)]
pub struct NoOpAlarmGateway;

#[async_trait]
impl AlarmGateway for NoOpAlarmGateway {
    async fn create(&self, _alarm: AlarmCreate) -> AppResult<()> {
        Ok(())
    }

    async fn activate(
        &self,
        _sender_uid: &str,
        _receiver_uid: &str,
        _picture_id: i64,
    ) -> AppResult<()> {
        Ok(())
    }

    async fn deactivate(
        &self,
        _sender_uid: &str,
        _receiver_uid: &str,
        _picture_id: i64,
    ) -> AppResult<()> {
        Ok(())
    }

    async fn remove_all_for_user(&self, _uid: &str) -> AppResult<()> {
        Ok(())
    }
}

/// Wrapper for boxed AlarmGateway trait object.
pub type AlarmGatewayService = Arc<dyn AlarmGateway>;
