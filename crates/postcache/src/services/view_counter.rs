//! Fire-and-forget view counting.
//!
//! Post reads enqueue the post id on a bounded channel. A single background task
//! drains it and calls `increment_view_count` on the repository it was given,
//! which in production is the cache decorator so that invalidation always runs.
//! When the queue is full or the worker is gone the increment is dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

use postcache_core::storage::PostRepository;

/// Handle for enqueueing view increments. Cheap to clone.
#[derive(Clone)]
pub struct ViewCountRecorder {
    tx: mpsc::Sender<i64>,
}

/// The background task draining a [`ViewCountRecorder`] queue.
///
/// It stops once every recorder clone has been dropped and the queue is empty.
pub struct ViewCountWorker {
    handle: JoinHandle<()>,
}

impl ViewCountRecorder {
    /// Spawns the worker on the current runtime.
    pub fn spawn(repo: Arc<dyn PostRepository>, capacity: usize) -> (Self, ViewCountWorker) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(run(repo, rx));

        (Self { tx }, ViewCountWorker { handle })
    }

    /// A recorder with no worker. The receiver is handed to the caller.
    #[cfg(test)]
    pub fn detached(capacity: usize) -> (Self, mpsc::Receiver<i64>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Enqueues one view of `post_id`. Never waits.
    pub fn record(&self, post_id: i64) {
        match self.tx.try_send(post_id) {
            Ok(()) => {}
            Err(TrySendError::Full(post_id)) => {
                tracing::warn!(post_id = %post_id, "View count queue full, dropping increment");
            }
            Err(TrySendError::Closed(post_id)) => {
                tracing::warn!(post_id = %post_id, "View count worker stopped, dropping increment");
            }
        }
    }
}

impl ViewCountWorker {
    /// Waits up to `grace` for the worker to drain its queue, then aborts it.
    ///
    /// Only returns promptly once all recorders are dropped.
    pub async fn join(mut self, grace: Duration) {
        match tokio::time::timeout(grace, &mut self.handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "View count worker failed"),
            Err(_) => {
                tracing::warn!("View count worker did not finish in time, aborting");
                self.handle.abort();
            }
        }
    }
}

async fn run(repo: Arc<dyn PostRepository>, mut rx: mpsc::Receiver<i64>) {
    tracing::debug!("View count worker started");

    while let Some(post_id) = rx.recv().await {
        if let Err(e) = repo.increment_view_count(post_id).await {
            tracing::warn!(post_id = %post_id, error = %e, "Failed to increment view count");
        }
    }

    tracing::debug!("View count worker shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use crate::test_support::CountingRepository;

    const GRACE: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn test_worker_increments_recorded_views() {
        let repo = Arc::new(CountingRepository::with_demo_data());
        let before = repo.find_by_id_with_details(1).await.unwrap().post.view_count;

        let (recorder, worker) = ViewCountRecorder::spawn(repo.clone(), 16);
        recorder.record(1);
        recorder.record(1);
        drop(recorder);
        worker.join(GRACE).await;

        let after = repo.find_by_id_with_details(1).await.unwrap().post.view_count;
        assert_eq!(after, before + 2);
        assert_eq!(repo.writes.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_worker_survives_failed_increments() {
        let repo = Arc::new(CountingRepository::with_demo_data());
        let (recorder, worker) = ViewCountRecorder::spawn(repo.clone(), 16);

        // Unknown post, then a good one.
        recorder.record(999);
        recorder.record(2);
        drop(recorder);
        worker.join(GRACE).await;

        assert_eq!(repo.writes.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_full_queue_drops_increment() {
        let (recorder, mut rx) = ViewCountRecorder::detached(1);

        recorder.record(1);
        recorder.record(2);
        drop(recorder);

        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_closed_queue_does_not_panic() {
        let (recorder, rx) = ViewCountRecorder::detached(4);
        drop(rx);

        recorder.record(1);
    }

    #[tokio::test]
    async fn test_join_aborts_when_recorders_outlive_grace() {
        let repo = Arc::new(CountingRepository::with_demo_data());
        let (_recorder, worker) = ViewCountRecorder::spawn(repo, 4);

        worker.join(Duration::from_millis(10)).await;
    }
}
