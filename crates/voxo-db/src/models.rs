//! Database row types. These map directly to SQLite rows and are kept
//! distinct from the voxo-types API models.

use voxo_types::models::Role;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub clerk_id: String,
    pub username: String,
    pub image_url: Option<String>,
    pub role: Role,
    pub diamonds: i64,
    pub created_at: String,
}

/// Input for lazily creating a user on first contact.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub clerk_id: &'a str,
    pub username: &'a str,
    pub image_url: Option<&'a str>,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct StreamRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub stream_key: Option<String>,
    pub is_live: bool,
    pub created_at: String,
}

/// Moderator grant joined with the granted user.
#[derive(Debug, Clone)]
pub struct ModeratorRow {
    pub id: String,
    pub user_id: String,
    pub streamer_id: String,
    pub created_at: String,
    pub user: UserRow,
}

/// Ban joined with the banned user.
#[derive(Debug, Clone)]
pub struct BanRow {
    pub id: String,
    pub user_id: String,
    pub streamer_id: String,
    pub expires_at: Option<String>,
    pub created_at: String,
    pub user: UserRow,
}

/// A user's standing vote on a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Like,
    Dislike,
}

impl Vote {
    pub(crate) fn is_dislike(self) -> bool {
        self == Vote::Dislike
    }
}
