use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::auth::{self, AppState};
use crate::middleware::require_auth;
use crate::{interactions, moderation, staff, stream};

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/users/{username}", get(auth::get_user));

    let protected_routes = Router::new()
        .route("/me", get(auth::get_self))
        .route("/me/stats", get(auth::get_self_stats))
        .route("/moderators", get(moderation::list_moderators).post(moderation::add_moderator))
        .route("/moderators/{target_user_id}", delete(moderation::remove_moderator))
        .route("/bans", get(moderation::list_banned_users).post(moderation::ban_user))
        .route("/bans/{target_user_id}", delete(moderation::unban_user))
        .route("/channels/{channel_id}/bans/{user_id}", get(moderation::ban_status))
        .route("/staff/sanctions", post(staff::sanction_streamer))
        .route("/stream", get(stream::get_stream))
        .route("/stream/key", post(stream::generate_stream_key))
        .route("/stream/live", put(stream::set_live))
        .route("/videos/{video_id}/like", post(interactions::like))
        .route("/videos/{video_id}/dislike", post(interactions::dislike))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
