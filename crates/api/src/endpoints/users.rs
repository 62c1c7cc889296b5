//! Users endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use muse_common::{AppError, AppResult};
use muse_core::{EnrollUserInput, SideEffect, UpdateUserInput};
use muse_db::entities::user;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUid, middleware::AppState, response::ApiResponse};

/// User response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub uid: String,
    pub name: String,
    pub email: Option<String>,
    pub profile_img: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub is_active: bool,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            uid: user.uid,
            name: user.name,
            email: user.email,
            profile_img: user.profile_img,
            gender: user.gender,
            age: user.age,
            is_active: user.is_active,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Enroll the calling user, reviving a deactivated account if one exists.
async fn enroll(
    AuthUid(uid): AuthUid,
    State(state): State<AppState>,
    Json(input): Json<EnrollUserInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.enroll(&uid, input).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Get the calling user.
async fn me(
    AuthUid(uid): AuthUid,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.get_by_uid(&uid).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Update the calling user's name, gender and age.
async fn update(
    AuthUid(uid): AuthUid,
    State(state): State<AppState>,
    Json(input): Json<UpdateUserInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.update_info(&uid, input).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Update profile image request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileImgRequest {
    pub profile_img: String,
}

/// Update the calling user's profile image.
async fn update_img(
    AuthUid(uid): AuthUid,
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileImgRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state
        .user_service
        .update_profile_img(&uid, &req.profile_img)
        .await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Deactivation summary response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivationResponse {
    pub uid: String,
    pub loves_deactivated: usize,
    pub pictures: SideEffect,
    pub alarms: SideEffect,
}

/// Deactivate the calling user's account and cascade to their loves.
async fn deactivate(
    AuthUid(uid): AuthUid,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<DeactivationResponse>> {
    let outcome = state
        .love_service
        .deactivate_user(&uid)
        .await?
        .ok_or(AppError::UserNotFound(uid))?;
    Ok(ApiResponse::ok(DeactivationResponse {
        uid: outcome.user.uid,
        loves_deactivated: outcome.picture_ids.len(),
        pictures: outcome.pictures,
        alarms: outcome.alarms,
    }))
}

/// Display name response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameResponse {
    pub name: String,
}

/// Display name for a single uid.
async fn name(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> AppResult<ApiResponse<NameResponse>> {
    let user = state.user_service.get_by_uid(&uid).await?;
    Ok(ApiResponse::ok(NameResponse { name: user.name }))
}

/// Display names request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayNamesRequest {
    pub uids: Vec<String>,
}

/// Display names for a batch of uids; unknown uids are omitted.
async fn names(
    State(state): State<AppState>,
    Json(req): Json<DisplayNamesRequest>,
) -> AppResult<ApiResponse<Vec<String>>> {
    let names = state.user_service.display_names(&req.uids).await?;
    Ok(ApiResponse::ok(names))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/enroll", post(enroll))
        .route("/me", get(me).put(update).delete(deactivate))
        .route("/me/img", put(update_img))
        .route("/{uid}/name", get(name))
        .route("/names", post(names))
}
