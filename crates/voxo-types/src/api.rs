use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// -- Identity --

/// Claims carried by the identity provider's token. Only `sub` is
/// guaranteed; profile fields are optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub exp: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelfStats {
    pub diamonds: i64,
    pub moderator_count: i64,
    pub banned_count: i64,
}

// -- Moderation --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddModeratorRequest {
    pub target_user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BanRequest {
    pub target_user_id: String,
    /// Minutes from now. Absent, zero or negative means permanent.
    #[serde(default)]
    pub duration_in_minutes: Option<f64>,
    /// Channel to ban from; defaults to the caller's own channel.
    #[serde(default)]
    pub streamer_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChannelQuery {
    pub streamer_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BanStatus {
    pub user_id: String,
    pub streamer_id: String,
    pub banned: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SanctionRequest {
    pub target_user_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SanctionResponse {
    pub success: bool,
}

// -- Stream --

#[derive(Debug, Serialize, Deserialize)]
pub struct StreamKeyResponse {
    pub stream_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetLiveRequest {
    pub is_live: bool,
}

// -- Interactions --

/// The caller's vote on a video after a like or dislike toggle.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeState {
    pub is_liked: bool,
    pub is_disliked: bool,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: String,
    pub message: String,
}
