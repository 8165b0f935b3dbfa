use crate::models::{BanRow, ModeratorRow, NewUser, StreamRow, UserRow, Vote};
use crate::{Database, timestamp};
use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};
use tracing::{info, warn};
use uuid::Uuid;
use voxo_types::models::Role;

const USER_COLUMNS: &str = "id, clerk_id, username, image_url, role, diamonds, created_at";

const MODERATOR_SELECT: &str = "SELECT m.id, m.user_id, m.streamer_id, m.created_at,
        u.id, u.clerk_id, u.username, u.image_url, u.role, u.diamonds, u.created_at
     FROM moderators m
     JOIN users u ON m.user_id = u.id";

const BAN_SELECT: &str = "SELECT b.id, b.user_id, b.streamer_id, b.expires_at, b.created_at,
        u.id, u.clerk_id, u.username, u.image_url, u.role, u.diamonds, u.created_at
     FROM bans b
     JOIN users u ON b.user_id = u.id";

impl Database {
    // -- Users --

    /// Insert the user if no row exists for its provider id, then return the
    /// stored row. A stream row is created alongside a new user. If the
    /// username is already held by another account, the new user gets the
    /// first free `<username>_<n>` for n >= 2.
    pub fn ensure_user(&self, new: &NewUser<'_>) -> Result<UserRow> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            if let Some(user) = query_user(&tx, "clerk_id", new.clerk_id)? {
                return Ok(user);
            }

            let user_id = Uuid::new_v4().to_string();
            let username = free_username(&tx, new.username)?;
            let now = timestamp(Utc::now());

            tx.execute(
                "INSERT INTO users (id, clerk_id, username, image_url, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![user_id, new.clerk_id, username, new.image_url, new.role.as_str(), now],
            )?;
            tx.execute(
                "INSERT INTO streams (id, user_id, name, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![Uuid::new_v4().to_string(), user_id, format!("{}'s stream", username), now],
            )?;
            info!(user_id = %user_id, username = %username, "Created user on first contact");

            let user = query_user(&tx, "clerk_id", new.clerk_id)?
                .ok_or_else(|| anyhow!("User missing after insert: {}", new.clerk_id))?;
            tx.commit()?;
            Ok(user)
        })
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }

    pub fn get_user_by_clerk_id(&self, clerk_id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "clerk_id", clerk_id))
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "username", username))
    }

    // -- Streams --

    pub fn get_stream(&self, user_id: &str) -> Result<Option<StreamRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, user_id, name, stream_key, is_live, created_at
                     FROM streams WHERE user_id = ?1",
                    [user_id],
                    |row| {
                        Ok(StreamRow {
                            id: row.get(0)?,
                            user_id: row.get(1)?,
                            name: row.get(2)?,
                            stream_key: row.get(3)?,
                            is_live: row.get(4)?,
                            created_at: row.get(5)?,
                        })
                    },
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Returns false when the user has no stream row.
    pub fn set_stream_live(&self, user_id: &str, is_live: bool) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE streams SET is_live = ?1 WHERE user_id = ?2",
                params![is_live, user_id],
            )?;
            Ok(changed > 0)
        })
    }

    /// Returns false when the user has no stream row.
    pub fn set_stream_key(&self, user_id: &str, stream_key: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE streams SET stream_key = ?1 WHERE user_id = ?2",
                params![stream_key, user_id],
            )?;
            Ok(changed > 0)
        })
    }

    // -- Moderators --

    pub fn is_moderator(&self, user_id: &str, streamer_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM moderators WHERE user_id = ?1 AND streamer_id = ?2)",
                [user_id, streamer_id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    /// Grant moderation rights. Returns `None` if the grant already exists;
    /// the check and the insert are one statement.
    pub fn insert_moderator(&self, user_id: &str, streamer_id: &str) -> Result<Option<ModeratorRow>> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let id = Uuid::new_v4().to_string();

            let inserted = tx.execute(
                "INSERT INTO moderators (id, user_id, streamer_id, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(user_id, streamer_id) DO NOTHING",
                params![id, user_id, streamer_id, timestamp(Utc::now())],
            )?;
            if inserted == 0 {
                return Ok(None);
            }

            let row = query_moderator(&tx, user_id, streamer_id)?;
            tx.commit()?;
            Ok(row)
        })
    }

    /// Revoke a grant. Returns the removed grant, or `None` if there was none.
    pub fn delete_moderator(&self, user_id: &str, streamer_id: &str) -> Result<Option<ModeratorRow>> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let Some(row) = query_moderator(&tx, user_id, streamer_id)? else {
                return Ok(None);
            };
            tx.execute("DELETE FROM moderators WHERE id = ?1", [&row.id])?;
            tx.commit()?;
            Ok(Some(row))
        })
    }

    /// Moderators of a channel, newest first.
    pub fn list_moderators(&self, streamer_id: &str) -> Result<Vec<ModeratorRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "{MODERATOR_SELECT} WHERE m.streamer_id = ?1 ORDER BY m.created_at DESC, m.rowid DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([streamer_id], moderator_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn count_moderators(&self, streamer_id: &str) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM moderators WHERE streamer_id = ?1",
                [streamer_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }

    // -- Bans --

    /// Create the ban for `(user_id, streamer_id)` or overwrite the expiry of
    /// the existing one. Last write wins.
    pub fn upsert_ban(
        &self,
        user_id: &str,
        streamer_id: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<BanRow> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            tx.execute(
                "INSERT INTO bans (id, user_id, streamer_id, expires_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(user_id, streamer_id) DO UPDATE SET expires_at = excluded.expires_at",
                params![
                    Uuid::new_v4().to_string(),
                    user_id,
                    streamer_id,
                    expires_at.map(timestamp),
                    timestamp(Utc::now())
                ],
            )?;

            let row = query_ban(&tx, user_id, streamer_id)?
                .ok_or_else(|| anyhow!("Ban missing after upsert: {} on {}", user_id, streamer_id))?;
            tx.commit()?;
            Ok(row)
        })
    }

    /// Remove a ban. Returns the removed record, or `None` if there was none.
    pub fn delete_ban(&self, user_id: &str, streamer_id: &str) -> Result<Option<BanRow>> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let Some(row) = query_ban(&tx, user_id, streamer_id)? else {
                return Ok(None);
            };
            tx.execute("DELETE FROM bans WHERE id = ?1", [&row.id])?;
            tx.commit()?;
            Ok(Some(row))
        })
    }

    pub fn get_ban(&self, user_id: &str, streamer_id: &str) -> Result<Option<BanRow>> {
        self.with_conn(|conn| query_ban(conn, user_id, streamer_id))
    }

    /// Bans on a channel, newest first. Expired rows are included.
    pub fn list_bans(&self, streamer_id: &str) -> Result<Vec<BanRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "{BAN_SELECT} WHERE b.streamer_id = ?1 ORDER BY b.created_at DESC, b.rowid DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([streamer_id], ban_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Bans on a channel that are permanent or not yet expired at `now`.
    pub fn count_active_bans(&self, streamer_id: &str, now: DateTime<Utc>) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM bans
                 WHERE streamer_id = ?1 AND (expires_at IS NULL OR expires_at > ?2)",
                params![streamer_id, timestamp(now)],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }

    // -- Likes --

    /// Cast `vote` on a video. Repeating the standing vote withdraws it and
    /// the opposite vote replaces it. Returns the vote left in place.
    pub fn toggle_vote(&self, user_id: &str, video_id: &str, vote: Vote) -> Result<Option<Vote>> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let existing: Option<(String, bool)> = tx
                .query_row(
                    "SELECT id, is_dislike FROM likes WHERE user_id = ?1 AND video_id = ?2",
                    [user_id, video_id],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            let standing = match existing {
                Some((id, is_dislike)) if is_dislike == vote.is_dislike() => {
                    tx.execute("DELETE FROM likes WHERE id = ?1", [&id])?;
                    None
                }
                Some((id, _)) => {
                    tx.execute(
                        "UPDATE likes SET is_dislike = ?1 WHERE id = ?2",
                        params![vote.is_dislike(), id],
                    )?;
                    Some(vote)
                }
                None => {
                    tx.execute(
                        "INSERT INTO likes (id, user_id, video_id, is_dislike, created_at)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                        params![
                            Uuid::new_v4().to_string(),
                            user_id,
                            video_id,
                            vote.is_dislike(),
                            timestamp(Utc::now())
                        ],
                    )?;
                    Some(vote)
                }
            };

            tx.commit()?;
            Ok(standing)
        })
    }

    /// `(likes, dislikes)` on a video.
    pub fn count_votes(&self, video_id: &str) -> Result<(i64, i64)> {
        self.with_conn(|conn| {
            let counts = conn.query_row(
                "SELECT COALESCE(SUM(is_dislike = 0), 0), COALESCE(SUM(is_dislike = 1), 0)
                 FROM likes WHERE video_id = ?1",
                [video_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;
            Ok(counts)
        })
    }
}

fn user_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<UserRow> {
    let id: String = row.get(offset)?;
    let role: String = row.get(offset + 4)?;

    Ok(UserRow {
        role: role.parse().unwrap_or_else(|e| {
            warn!("Corrupt role on user '{}': {}", id, e);
            Role::User
        }),
        id,
        clerk_id: row.get(offset + 1)?,
        username: row.get(offset + 2)?,
        image_url: row.get(offset + 3)?,
        diamonds: row.get(offset + 5)?,
        created_at: row.get(offset + 6)?,
    })
}

fn moderator_from_row(row: &Row<'_>) -> rusqlite::Result<ModeratorRow> {
    Ok(ModeratorRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        streamer_id: row.get(2)?,
        created_at: row.get(3)?,
        user: user_from_row(row, 4)?,
    })
}

fn ban_from_row(row: &Row<'_>) -> rusqlite::Result<BanRow> {
    Ok(BanRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        streamer_id: row.get(2)?,
        expires_at: row.get(3)?,
        created_at: row.get(4)?,
        user: user_from_row(row, 5)?,
    })
}

fn free_username(conn: &Connection, wanted: &str) -> Result<String> {
    let taken = |name: &str| -> Result<bool> {
        let exists = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1)",
            [name],
            |row| row.get(0),
        )?;
        Ok(exists)
    };

    if !taken(wanted)? {
        return Ok(wanted.to_string());
    }
    let mut suffix = 2u32;
    loop {
        let candidate = format!("{wanted}_{suffix}");
        if !taken(&candidate)? {
            return Ok(candidate);
        }
        suffix += 1;
    }
}

/// `column` is always a literal from this module.
fn query_user(conn: &Connection, column: &'static str, value: &str) -> Result<Option<UserRow>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = ?1");
    let row = conn.query_row(&sql, [value], |row| user_from_row(row, 0)).optional()?;
    Ok(row)
}

fn query_moderator(conn: &Connection, user_id: &str, streamer_id: &str) -> Result<Option<ModeratorRow>> {
    let sql = format!("{MODERATOR_SELECT} WHERE m.user_id = ?1 AND m.streamer_id = ?2");
    let row = conn.query_row(&sql, [user_id, streamer_id], moderator_from_row).optional()?;
    Ok(row)
}

fn query_ban(conn: &Connection, user_id: &str, streamer_id: &str) -> Result<Option<BanRow>> {
    let sql = format!("{BAN_SELECT} WHERE b.user_id = ?1 AND b.streamer_id = ?2");
    let row = conn.query_row(&sql, [user_id, streamer_id], ban_from_row).optional()?;
    Ok(row)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
