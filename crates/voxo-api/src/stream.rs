use axum::{Extension, Json, extract::State};
use tracing::info;
use uuid::Uuid;

use voxo_types::api::{Claims, SetLiveRequest, StreamKeyResponse};
use voxo_types::models::Stream;

use crate::auth::{AppState, blocking};
use crate::convert;
use crate::error::{ApiError, InvalidOperation};

/// `live_` followed by 32 hex digits.
pub fn new_stream_key() -> String {
    format!("live_{}", Uuid::new_v4().simple())
}

/// GET /stream — the caller's own stream configuration.
pub async fn get_stream(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Stream>, ApiError> {
    let stream = blocking(move || {
        let actor = state.resolve_actor(&claims)?;
        state
            .db
            .get_stream(&actor.id)?
            .ok_or(ApiError::InvalidOperation(InvalidOperation::StreamNotFound))
    })
    .await?;

    Ok(Json(convert::stream(stream)))
}

/// POST /stream/key — replace the caller's stream key.
pub async fn generate_stream_key(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<StreamKeyResponse>, ApiError> {
    let stream_key = blocking(move || {
        let actor = state.resolve_actor(&claims)?;
        let stream_key = new_stream_key();
        if !state.db.set_stream_key(&actor.id, &stream_key)? {
            return Err(InvalidOperation::StreamNotFound.into());
        }
        info!(user_id = %actor.id, "Stream key regenerated");
        Ok(stream_key)
    })
    .await?;

    Ok(Json(StreamKeyResponse { stream_key }))
}

/// PUT /stream/live
pub async fn set_live(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SetLiveRequest>,
) -> Result<Json<Stream>, ApiError> {
    let stream = blocking(move || {
        let actor = state.resolve_actor(&claims)?;
        if !state.db.set_stream_live(&actor.id, req.is_live)? {
            return Err(InvalidOperation::StreamNotFound.into());
        }
        info!(user_id = %actor.id, is_live = req.is_live, "Stream status changed");

        state.invalidations.revalidate_path("/");
        state.invalidations.revalidate_path("/studio");
        state.invalidations.revalidate_channel(&actor.username);

        state
            .db
            .get_stream(&actor.id)?
            .ok_or(ApiError::InvalidOperation(InvalidOperation::StreamNotFound))
    })
    .await?;

    Ok(Json(convert::stream(stream)))
}
