use tokio::sync::broadcast;
use tracing::debug;

/// A public page whose cached render is stale after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalidation {
    pub path: String,
}

/// Fans invalidation events out to whatever renders pages. Publishing with
/// no subscribers is a no-op.
#[derive(Clone)]
pub struct Invalidations {
    tx: broadcast::Sender<Invalidation>,
}

impl Invalidations {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Invalidation> {
        self.tx.subscribe()
    }

    pub fn revalidate_path(&self, path: impl Into<String>) {
        let path = path.into();
        debug!(path = %path, "Revalidating");
        let _ = self.tx.send(Invalidation { path });
    }

    /// Public page of a channel.
    pub fn revalidate_channel(&self, username: &str) {
        self.revalidate_path(channel_path(username));
    }

    /// Watch page of a video.
    pub fn revalidate_watch(&self, video_id: &str) {
        self.revalidate_path(watch_path(video_id));
    }
}

impl Default for Invalidations {
    fn default() -> Self {
        Self::new()
    }
}

pub fn channel_path(username: &str) -> String {
    format!("/u/{}", username)
}

pub fn watch_path(video_id: &str) -> String {
    format!("/watch/{}", video_id)
}
