//! Loves endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use muse_common::AppResult;
use muse_core::{LoveCheckItem, LoveCheckResult, PictureSummary, SideEffect, ToggleAction};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUid, MaybeAuthUid},
    middleware::AppState,
    response::ApiResponse,
};

/// Toggle love request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLoveRequest {
    pub maker_uid: String,
    pub picture_id: i64,
}

/// Toggle love response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLoveResponse {
    /// Whether the caller loves the picture after the toggle.
    pub love_check: bool,
    pub action: ToggleAction,
    pub counter: SideEffect,
    pub alarm: SideEffect,
}

/// Toggle the caller's love on a picture.
async fn toggle(
    AuthUid(uid): AuthUid,
    State(state): State<AppState>,
    Json(req): Json<ToggleLoveRequest>,
) -> AppResult<ApiResponse<ToggleLoveResponse>> {
    let outcome = state
        .love_service
        .toggle(&uid, &req.maker_uid, req.picture_id)
        .await?;
    Ok(ApiResponse::ok(ToggleLoveResponse {
        love_check: outcome.love.is_active,
        action: outcome.action,
        counter: outcome.counter,
        alarm: outcome.alarm,
    }))
}

/// Bulk love checks with maker names.
///
/// Entries whose maker does not resolve are dropped from the response.
async fn checks(
    State(state): State<AppState>,
    Json(items): Json<Vec<LoveCheckItem>>,
) -> AppResult<ApiResponse<Vec<LoveCheckResult>>> {
    let results = state.love_service.love_checks_with_makers(items).await?;
    Ok(ApiResponse::ok(results))
}

/// The caller's loved pictures, newest love first.
async fn my_pictures(
    AuthUid(uid): AuthUid,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<PictureSummary>>> {
    let pictures = state.love_service.my_loved_pictures(&uid).await?;
    Ok(ApiResponse::ok(pictures))
}

/// Another user's loved pictures, annotated for a signed-in viewer.
async fn user_pictures(
    MaybeAuthUid(viewer): MaybeAuthUid,
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> AppResult<ApiResponse<Vec<PictureSummary>>> {
    let pictures = state
        .love_service
        .user_loved_pictures(&uid, viewer.as_deref())
        .await?;
    Ok(ApiResponse::ok(pictures))
}

/// Picture removal callback response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivatePictureResponse {
    pub deactivated: usize,
}

/// Switch off every love on a removed picture.
///
/// Called by the picture service after it takes a picture down.
async fn deactivate_picture(
    State(state): State<AppState>,
    Path(picture_id): Path<i64>,
) -> AppResult<ApiResponse<DeactivatePictureResponse>> {
    let deactivated = state.love_service.deactivate_picture(picture_id).await?;
    Ok(ApiResponse::ok(DeactivatePictureResponse { deactivated }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/toggle", post(toggle))
        .route("/checks", post(checks))
        .route("/me/pictures", get(my_pictures))
        .route("/users/{uid}/pictures", get(user_pictures))
        .route("/pictures/{picture_id}/deactivate", post(deactivate_picture))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_request_accepts_camel_case() {
        let req: ToggleLoveRequest =
            serde_json::from_str(r#"{"makerUid":"maker1","pictureId":42}"#).unwrap();

        assert_eq!(req.maker_uid, "maker1");
        assert_eq!(req.picture_id, 42);
    }

    #[test]
    fn test_toggle_response_serialization() {
        let response = ToggleLoveResponse {
            love_check: true,
            action: ToggleAction::Created,
            counter: SideEffect::Applied,
            alarm: SideEffect::Failed,
        };

        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"loveCheck\":true"));
        assert!(json.contains("\"action\":\"created\""));
        assert!(json.contains("\"counter\":\"applied\""));
        assert!(json.contains("\"alarm\":\"failed\""));
    }

    #[test]
    fn test_love_check_items_accept_array_body() {
        let items: Vec<LoveCheckItem> = serde_json::from_str(
            r#"[{"uid":"viewer","makerUid":"maker1","pictureId":7}]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].maker_uid, "maker1");
    }
}
