use axum::{
    Extension, Json,
    extract::{Path, State},
};
use tracing::debug;

use voxo_db::models::Vote;
use voxo_types::api::{Claims, LikeState};

use crate::auth::{AppState, blocking};
use crate::error::ApiError;

/// POST /videos/{video_id}/like
pub async fn like(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<LikeState>, ApiError> {
    toggle(state, claims, video_id, Vote::Like).await
}

/// POST /videos/{video_id}/dislike
pub async fn dislike(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<LikeState>, ApiError> {
    toggle(state, claims, video_id, Vote::Dislike).await
}

async fn toggle(state: AppState, claims: Claims, video_id: String, vote: Vote) -> Result<Json<LikeState>, ApiError> {
    let standing = blocking(move || {
        let actor = state.resolve_actor(&claims)?;
        let standing = state.db.toggle_vote(&actor.id, &video_id, vote)?;
        debug!(user_id = %actor.id, video_id = %video_id, vote = ?standing, "Vote toggled");
        state.invalidations.revalidate_watch(&video_id);
        Ok(standing)
    })
    .await?;

    Ok(Json(like_state(standing)))
}

pub fn like_state(standing: Option<Vote>) -> LikeState {
    LikeState {
        is_liked: standing == Some(Vote::Like),
        is_disliked: standing == Some(Vote::Dislike),
    }
}
