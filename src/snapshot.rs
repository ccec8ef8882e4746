//! Publication of the latest rendered network.
//!
//! The refresh task owns the [`SnapshotPublisher`]; request handlers hold
//! cloned [`SnapshotReader`]s. A snapshot is swapped in as one `Arc`, so a
//! reader sees either the old nodes and edges or the new ones, never a mix.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tokio::sync::watch;

use crate::visjs::Network;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub network: Network,
    /// Starts at 1 and increases with every publish.
    pub generation: u64,
    pub fetched_at_unix: u64,
}

pub struct SnapshotPublisher {
    tx: watch::Sender<Option<Arc<Snapshot>>>,
    generation: u64,
}

#[derive(Clone)]
pub struct SnapshotReader {
    rx: watch::Receiver<Option<Arc<Snapshot>>>,
}

pub fn channel() -> (SnapshotPublisher, SnapshotReader) {
    let (tx, rx) = watch::channel(None);
    (SnapshotPublisher { tx, generation: 0 }, SnapshotReader { rx })
}

impl SnapshotPublisher {
    /// Replaces the published snapshot and returns its generation.
    pub fn publish(&mut self, network: Network) -> u64 {
        self.generation += 1;
        let fetched_at_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let snapshot = Snapshot {
            network,
            generation: self.generation,
            fetched_at_unix,
        };
        self.tx.send_replace(Some(Arc::new(snapshot)));
        self.generation
    }

    pub fn subscribe(&self) -> SnapshotReader {
        SnapshotReader {
            rx: self.tx.subscribe(),
        }
    }
}

impl SnapshotReader {
    /// The last published snapshot, if any refresh has succeeded yet.
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.rx.borrow().clone()
    }

    /// Waits for the next publish. Returns `false` once the publisher is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
