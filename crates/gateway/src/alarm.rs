//! HTTP client for the alarm service.
//!
//! Implements the [`AlarmGateway`] trait. Alarms are keyed remotely by
//! the (sender, receiver, picture) triple, so the activate and
//! deactivate routes carry that triple instead of an alarm id.

use crate::client::{GatewayError, build_client, ensure_success, normalize_base_url};
use async_trait::async_trait;
use muse_common::{AppResult, config::GatewayConfig};
use muse_core::{AlarmCreate, AlarmGateway};
use reqwest::Client;
use serde::Serialize;

/// Request body identifying one alarm by its love triple.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AlarmKeyRequest<'a> {
    sender_uid: &'a str,
    receiver_uid: &'a str,
    picture_id: i64,
}

/// HTTP implementation of the alarm service gateway.
#[derive(Clone)]
pub struct HttpAlarmGateway {
    client: Client,
    base_url: String,
}

impl HttpAlarmGateway {
    /// Create a new alarm gateway from the configured base url.
    pub fn new(config: &GatewayConfig) -> AppResult<Self> {
        let base_url = normalize_base_url(&config.alarm_base_url)?;
        Ok(Self {
            client: build_client(config)?,
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl AlarmGateway for HttpAlarmGateway {
    async fn create(&self, alarm: AlarmCreate) -> AppResult<()> {
        let endpoint = self.endpoint("/alarm/create");
        let response = self
            .client
            .post(&endpoint)
            .json(&alarm)
            .send()
            .await
            .map_err(GatewayError::Http)?;
        ensure_success(&endpoint, response).await?;
        tracing::debug!(
            sender_uid = %alarm.sender_uid,
            receiver_uid = %alarm.receiver_uid,
            picture_id = alarm.picture_id,
            "Created love alarm"
        );
        Ok(())
    }

    async fn activate(
        &self,
        sender_uid: &str,
        receiver_uid: &str,
        picture_id: i64,
    ) -> AppResult<()> {
        let endpoint = self.endpoint("/alarm/marked");
        let response = self
            .client
            .put(&endpoint)
            .json(&AlarmKeyRequest {
                sender_uid,
                receiver_uid,
                picture_id,
            })
            .send()
            .await
            .map_err(GatewayError::Http)?;
        ensure_success(&endpoint, response).await?;
        Ok(())
    }

    async fn deactivate(
        &self,
        sender_uid: &str,
        receiver_uid: &str,
        picture_id: i64,
    ) -> AppResult<()> {
        let endpoint = self.endpoint("/alarm/isalive");
        let response = self
            .client
            .put(&endpoint)
            .json(&AlarmKeyRequest {
                sender_uid,
                receiver_uid,
                picture_id,
            })
            .send()
            .await
            .map_err(GatewayError::Http)?;
        ensure_success(&endpoint, response).await?;
        Ok(())
    }

    async fn remove_all_for_user(&self, uid: &str) -> AppResult<()> {
        let endpoint = self.endpoint(&format!("/alarm/remove/{uid}"));
        let response = self
            .client
            .put(&endpoint)
            .send()
            .await
            .map_err(GatewayError::Http)?;
        ensure_success(&endpoint, response).await?;
        tracing::debug!(uid = %uid, "Removed alarms for deactivated user");
        Ok(())
    }
}
