//! Picture service gateway.
//!
//! Provides an abstraction for the outbound calls that keep the picture
//! service's love counters in step with the love rows stored here.
//! The actual HTTP implementation is provided by the gateway crate.

use async_trait::async_trait;
use muse_common::AppResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A picture record as returned by the picture service's batch listing routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PictureSummary {
    pub picture_id: i64,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub maker_uid: Option<String>,
    #[serde(default)]
    pub love_count: i64,
    /// Whether the requesting viewer loves this picture. The picture
    /// service does not know the viewer, so this starts false and is
    /// re-annotated here.
    #[serde(default)]
    pub love_check: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Trait for picture service calls.
///
/// This allows the core services to keep remote counters and listings
/// in sync without directly depending on the HTTP client implementation.
#[async_trait]
pub trait PictureGateway: Send + Sync {
    /// Increment a picture's love counter and return the picture's URL.
    ///
    /// The first-like path uses the same call for both: the increment
    /// response carries the url the alarm payload needs.
    async fn increment_count_fetch_url(&self, picture_id: i64) -> AppResult<String>;

    /// Increment a picture's love counter.
    async fn increment_count(&self, picture_id: i64) -> AppResult<()>;

    /// Decrement a picture's love counter.
    async fn decrement_count(&self, picture_id: i64) -> AppResult<()>;

    /// Deactivate a departing user's pictures and retract their counted loves.
    ///
    /// # Arguments
    /// * `uid` - The uid of the deactivated account
    /// * `picture_ids` - Every picture the account ever loved
    async fn deactivate_user_pictures(&self, uid: &str, picture_ids: Vec<i64>) -> AppResult<()>;

    /// Fetch full picture records for the caller's own loved pictures.
    async fn fetch_loved_pictures(&self, picture_ids: Vec<i64>) -> AppResult<Vec<PictureSummary>>;

    /// Fetch public picture records for another user's loved pictures.
    async fn fetch_public_loved_pictures(
        &self,
        picture_ids: Vec<i64>,
    ) -> AppResult<Vec<PictureSummary>>;
}

/// A no-op implementation of PictureGateway for testing or when the
/// picture service is unreachable by design.
#[derive(Clone, Default)]
pub struct NoOpPictureGateway;

#[async_trait]
impl PictureGateway for NoOpPictureGateway {
    async fn increment_count_fetch_url(&self, _picture_id: i64) -> AppResult<String> {
        Ok(String::new())
    }

    async fn increment_count(&self, _picture_id: i64) -> AppResult<()> {
        Ok(())
    }

    async fn decrement_count(&self, _picture_id: i64) -> AppResult<()> {
        Ok(())
    }

    async fn deactivate_user_pictures(&self, _uid: &str, _picture_ids: Vec<i64>) -> AppResult<()> {
        Ok(())
    }

    async fn fetch_loved_pictures(&self, _picture_ids: Vec<i64>) -> AppResult<Vec<PictureSummary>> {
        Ok(Vec::new())
    }

    async fn fetch_public_loved_pictures(
        &self,
        _picture_ids: Vec<i64>,
    ) -> AppResult<Vec<PictureSummary>> {
        Ok(Vec::new())
    }
}

/// Wrapper for boxed PictureGateway trait object.
pub type PictureGatewayService = Arc<dyn PictureGateway>;
