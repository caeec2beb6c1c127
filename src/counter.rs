use flume::{Receiver, Sender, TrySendError};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::{model::ViewCount, store::Store};

/// Queues view increments for a background worker so rendering never waits on a write.
#[derive(Clone, derive_more::Debug)]
pub struct ViewCounter {
    #[debug(skip)]
    queue: Sender<String>,
}

impl ViewCounter {
    /// Start the worker. It runs until every `ViewCounter` clone is dropped and the queue
    /// is drained.
    pub fn spawn(store: Arc<dyn Store>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (queue, rx) = flume::bounded::<String>(capacity.max(1));
        let worker = tokio::spawn(process(store, rx));

        (Self { queue }, worker)
    }

    /// Record one view of `slug`. Never blocks; the view is dropped when the queue is full.
    pub fn record(&self, slug: &str) {
        match self.queue.try_send(slug.to_string()) {
            Ok(()) => {}
            Err(TrySendError::Full(slug)) => {
                warn!("view queue full, dropping increment for {slug}");
            }
            Err(TrySendError::Disconnected(slug)) => {
                warn!("view worker is not running, dropping increment for {slug}");
            }
        }
    }

    /// Views for `slug`, or zero when the store cannot be read.
    pub async fn count(store: &dyn Store, slug: &str) -> ViewCount {
        match store.views_count().await {
            Ok(records) => ViewCount::for_slug(&records, slug),
            Err(e) => {
                warn!("could not read view counts, showing none for {slug}: {e}");
                ViewCount::default()
            }
        }
    }
}

async fn process(store: Arc<dyn Store>, rx: Receiver<String>) {
    while let Ok(slug) = rx.recv_async().await {
        match store.increment_views(&slug).await {
            Ok(()) => tracing::debug!("counted view for {slug}"),
            Err(e) => warn!("failed to count view for {slug}: {e}"),
        }
    }

    tracing::debug!("view worker stopped");
}
