use axum::{Extension, Json, extract::State};

use voxo_types::api::{Claims, SanctionRequest, SanctionResponse};

use crate::auth::{AppState, blocking};
use crate::error::ApiError;

/// POST /staff/sanctions — force a streamer offline.
pub async fn sanction_streamer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SanctionRequest>,
) -> Result<Json<SanctionResponse>, ApiError> {
    let response = blocking(move || {
        let actor = state.resolve_actor(&claims)?;
        state.authority().sanction_streamer(&actor, &req.target_user_id)
    })
    .await?;

    Ok(Json(response))
}
