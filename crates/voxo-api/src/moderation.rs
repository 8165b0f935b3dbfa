use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use voxo_types::api::{AddModeratorRequest, BanRequest, BanStatus, ChannelQuery, Claims};
use voxo_types::models::{Ban, Moderator};

use crate::auth::{AppState, blocking};
use crate::error::ApiError;

/// GET /moderators — the caller's channel roster, newest first.
pub async fn list_moderators(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Moderator>>, ApiError> {
    let moderators = blocking(move || {
        let actor = state.resolve_actor(&claims)?;
        state.authority().list_moderators(&actor)
    })
    .await?;

    Ok(Json(moderators))
}

/// POST /moderators
pub async fn add_moderator(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<AddModeratorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let moderator = blocking(move || {
        let actor = state.resolve_actor(&claims)?;
        state.authority().add_moderator(&actor, &req.target_user_id)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(moderator)))
}

/// DELETE /moderators/{target_user_id}
pub async fn remove_moderator(
    State(state): State<AppState>,
    Path(target_user_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Moderator>, ApiError> {
    let moderator = blocking(move || {
        let actor = state.resolve_actor(&claims)?;
        state.authority().remove_moderator(&actor, &target_user_id)
    })
    .await?;

    Ok(Json(moderator))
}

/// GET /bans — bans on the caller's channel, newest first, expired included.
pub async fn list_banned_users(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Ban>>, ApiError> {
    let bans = blocking(move || {
        let actor = state.resolve_actor(&claims)?;
        state.authority().list_banned_users(&actor)
    })
    .await?;

    Ok(Json(bans))
}

/// POST /bans
pub async fn ban_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<BanRequest>,
) -> Result<Json<Ban>, ApiError> {
    let ban = blocking(move || {
        let actor = state.resolve_actor(&claims)?;
        state.authority().ban_user(
            &actor,
            &req.target_user_id,
            req.duration_in_minutes,
            req.streamer_id.as_deref(),
        )
    })
    .await?;

    Ok(Json(ban))
}

/// DELETE /bans/{target_user_id}?streamer_id=
pub async fn unban_user(
    State(state): State<AppState>,
    Path(target_user_id): Path<String>,
    Query(query): Query<ChannelQuery>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Ban>, ApiError> {
    let ban = blocking(move || {
        let actor = state.resolve_actor(&claims)?;
        state
            .authority()
            .unban_user(&actor, &target_user_id, query.streamer_id.as_deref())
    })
    .await?;

    Ok(Json(ban))
}

/// GET /channels/{channel_id}/bans/{user_id}
pub async fn ban_status(
    State(state): State<AppState>,
    Path((channel_id, user_id)): Path<(String, String)>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<BanStatus>, ApiError> {
    let status = blocking(move || {
        let actor = state.resolve_actor(&claims)?;
        state.authority().ban_status(&actor, &user_id, &channel_id)
    })
    .await?;

    Ok(Json(status))
}
