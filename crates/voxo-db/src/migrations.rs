use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          TEXT PRIMARY KEY,
                clerk_id    TEXT NOT NULL UNIQUE,
                username    TEXT NOT NULL UNIQUE,
                image_url   TEXT,
                role        TEXT NOT NULL DEFAULT 'USER',
                diamonds    INTEGER NOT NULL DEFAULT 0,
                created_at  TEXT NOT NULL
            );

            CREATE TABLE streams (
                id          TEXT PRIMARY KEY,
                user_id     TEXT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
                name        TEXT NOT NULL,
                stream_key  TEXT,
                is_live     INTEGER NOT NULL DEFAULT 0,
                created_at  TEXT NOT NULL
            );

            CREATE TABLE moderators (
                id          TEXT PRIMARY KEY,
                user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                streamer_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at  TEXT NOT NULL,
                UNIQUE(user_id, streamer_id)
            );

            CREATE INDEX idx_moderators_streamer
                ON moderators(streamer_id, created_at);

            CREATE TABLE bans (
                id          TEXT PRIMARY KEY,
                user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                streamer_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                expires_at  TEXT,
                created_at  TEXT NOT NULL,
                UNIQUE(user_id, streamer_id)
            );

            CREATE INDEX idx_bans_streamer
                ON bans(streamer_id, created_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    if version < 2 {
        info!("Running migration v2 (likes)");
        conn.execute_batch(
            "
            CREATE TABLE likes (
                id          TEXT PRIMARY KEY,
                user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                video_id    TEXT NOT NULL,
                is_dislike  INTEGER NOT NULL DEFAULT 0,
                created_at  TEXT NOT NULL,
                UNIQUE(user_id, video_id)
            );

            CREATE INDEX idx_likes_video ON likes(video_id);

            INSERT INTO schema_version (version) VALUES (2);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
