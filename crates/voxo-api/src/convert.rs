//! Row to API model conversions.

use chrono::{DateTime, Utc};
use tracing::warn;

use voxo_db::models::{BanRow, ModeratorRow, StreamRow, UserRow};
use voxo_types::models::{Ban, Moderator, Stream, User};

/// Parse a stored timestamp. Rows written by older tooling may carry
/// SQLite's `YYYY-MM-DD HH:MM:SS` form instead of RFC 3339.
pub fn parse_timestamp(raw: &str, owner: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}' on '{}': {}", raw, owner, e);
            DateTime::default()
        })
}

/// A ban is in force if it is permanent or expires after `now`.
pub fn is_active(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    expires_at.is_none_or(|at| at > now)
}

pub fn user(row: UserRow) -> User {
    User {
        created_at: parse_timestamp(&row.created_at, &row.id),
        id: row.id,
        username: row.username,
        image_url: row.image_url,
        role: row.role,
        diamonds: row.diamonds,
    }
}

pub fn moderator(row: ModeratorRow) -> Moderator {
    Moderator {
        created_at: parse_timestamp(&row.created_at, &row.id),
        id: row.id,
        user_id: row.user_id,
        streamer_id: row.streamer_id,
        user: user(row.user),
    }
}

pub fn ban(row: BanRow, now: DateTime<Utc>) -> Ban {
    let expires_at = row.expires_at.as_deref().map(|raw| parse_timestamp(raw, &row.id));

    Ban {
        created_at: parse_timestamp(&row.created_at, &row.id),
        active: is_active(expires_at, now),
        expires_at,
        id: row.id,
        user_id: row.user_id,
        streamer_id: row.streamer_id,
        user: user(row.user),
    }
}

pub fn stream(row: StreamRow) -> Stream {
    Stream {
        created_at: parse_timestamp(&row.created_at, &row.id),
        id: row.id,
        user_id: row.user_id,
        name: row.name,
        stream_key: row.stream_key,
        is_live: row.is_live,
    }
}
