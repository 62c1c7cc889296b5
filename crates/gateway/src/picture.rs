//! HTTP client for the picture service.
//!
//! Implements the [`PictureGateway`] trait against the picture service's
//! REST routes. Counter updates address one picture; the listing and
//! retraction routes take the full picture id batch in the body.

use crate::client::{GatewayError, build_client, ensure_success, normalize_base_url};
use async_trait::async_trait;
use muse_common::{AppResult, config::GatewayConfig};
use muse_core::{PictureGateway, PictureSummary};
use reqwest::Client;
use serde::Serialize;

/// Request body for retracting a deactivated user's loves.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RetractLovesRequest<'a> {
    uid: &'a str,
    picture_ids: &'a [i64],
}

/// HTTP implementation of the picture service gateway.
#[derive(Clone)]
pub struct HttpPictureGateway {
    client: Client,
    base_url: String,
}

impl HttpPictureGateway {
    /// Create a new picture gateway from the configured base url.
    pub fn new(config: &GatewayConfig) -> AppResult<Self> {
        let base_url = normalize_base_url(&config.picture_base_url)?;
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
impl PictureGateway for HttpPictureGateway {
    async fn increment_count_fetch_url(&self, picture_id: i64) -> AppResult<String> {
        let endpoint = self.endpoint(&format!("/picture/create/count/{picture_id}"));
        let response = self
            .client
            .post(&endpoint)
            .send()
            .await
            .map_err(GatewayError::Http)?;
        let response = ensure_success(&endpoint, response).await?;

        // The increment response body is the picture's url as plain text
        let url = response.text().await.map_err(GatewayError::Http)?;
        tracing::debug!(picture_id, "Incremented love count");
        Ok(url)
    }

    async fn increment_count(&self, picture_id: i64) -> AppResult<()> {
        let endpoint = self.endpoint(&format!("/picture/create/count/{picture_id}"));
        let response = self
            .client
            .post(&endpoint)
            .send()
            .await
            .map_err(GatewayError::Http)?;
        ensure_success(&endpoint, response).await?;
        tracing::debug!(picture_id, "Incremented love count");
        Ok(())
    }

    async fn decrement_count(&self, picture_id: i64) -> AppResult<()> {
        let endpoint = self.endpoint(&format!("/picture/delete/count/{picture_id}"));
        let response = self
            .client
            .post(&endpoint)
            .send()
            .await
            .map_err(GatewayError::Http)?;
        ensure_success(&endpoint, response).await?;
        tracing::debug!(picture_id, "Decremented love count");
        Ok(())
    }

    async fn deactivate_user_pictures(&self, uid: &str, picture_ids: Vec<i64>) -> AppResult<()> {
        let endpoint = self.endpoint("/picture/delete/user");
        let response = self
            .client
            .post(&endpoint)
            .json(&RetractLovesRequest {
                uid,
                picture_ids: &picture_ids,
            })
            .send()
            .await
            .map_err(GatewayError::Http)?;
        ensure_success(&endpoint, response).await?;
        tracing::debug!(uid = %uid, count = picture_ids.len(), "Retracted loves for deactivated user");
        Ok(())
    }

    async fn fetch_loved_pictures(&self, picture_ids: Vec<i64>) -> AppResult<Vec<PictureSummary>> {
        let endpoint = self.endpoint("/picture/like_all_list");
        let response = self
            .client
            .post(&endpoint)
            .json(&picture_ids)
            .send()
            .await
            .map_err(GatewayError::Http)?;
        let response = ensure_success(&endpoint, response).await?;
        let pictures = response.json().await.map_err(GatewayError::Http)?;
        Ok(pictures)
    }

    async fn fetch_public_loved_pictures(
        &self,
        picture_ids: Vec<i64>,
    ) -> AppResult<Vec<PictureSummary>> {
        let endpoint = self.endpoint("/picture/like_public_list");
        let response = self
            .client
            .post(&endpoint)
            .json(&picture_ids)
            .send()
            .await
            .map_err(GatewayError::Http)?;
        let response = ensure_success(&endpoint, response).await?;
        let pictures = response.json().await.map_err(GatewayError::Http)?;
        Ok(pictures)
    }
}
