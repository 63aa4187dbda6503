//! Snapshot Feed
//!
//! Models a live query subscription: the producer publishes the full current
//! result set each time it changes, and each listener sees the latest one.
//! A newer snapshot replaces an older undelivered one. Reducers are applied
//! by the caller to each snapshot; they know nothing about the feed.

use tokio::sync::watch;
use tracing::debug;

// == Feed ==
/// Producer side of a live query.
#[derive(Debug)]
pub struct SnapshotFeed<T> {
    tx: watch::Sender<Vec<T>>,
}

impl<T: Clone> SnapshotFeed<T> {
    /// Creates a feed whose current result set is empty.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { tx }
    }

    /// Replaces the current result set and notifies listeners.
    pub fn publish(&self, snapshot: Vec<T>) {
        debug!(rows = snapshot.len(), "publishing snapshot");
        self.tx.send_replace(snapshot);
    }

    /// Starts a new listener. The current result set is delivered first.
    pub fn subscribe(&self) -> SnapshotListener<T> {
        let mut rx = self.tx.subscribe();
        rx.mark_changed();
        SnapshotListener { rx }
    }

    /// Number of active listeners.
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone> Default for SnapshotFeed<T> {
    fn default() -> Self {
        Self::new()
    }
}

// == Listener ==
/// Consumer side of a live query. Dropping it unsubscribes.
#[derive(Debug)]
pub struct SnapshotListener<T> {
    rx: watch::Receiver<Vec<T>>,
}

impl<T: Clone> SnapshotListener<T> {
    /// Waits for the next snapshot. Returns `None` once the feed is gone.
    pub async fn next(&mut self) -> Option<Vec<T>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Stops delivery.
    pub fn unsubscribe(self) {}
}
