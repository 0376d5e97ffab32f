//! Sequential, paced execution of a batch of downloads.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::host::DownloadHost;
use super::download_via;
use crate::model::{DownloadOutcome, DownloadRequest};

/// Waits between consecutive batch items.
pub trait Pacer: Clone + Send + Sync + 'static {
    fn pause(&self) -> impl Future<Output = ()> + Send;
}

/// Fixed pause on the tokio timer.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl Pacer for FixedDelay {
    fn pause(&self) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(self.0)
    }
}

/// Runs requests one at a time; a failed item is logged and the next one starts.
pub struct SequentialQueue<H, P> {
    host: Arc<H>,
    pacer: P,
}

impl<H: DownloadHost, P: Pacer> SequentialQueue<H, P> {
    pub fn new(host: Arc<H>, pacer: P) -> Self {
        Self { host, pacer }
    }

    pub async fn run(self, requests: Vec<DownloadRequest>) {
        let total = requests.len();
        let mut failed = 0usize;
        tracing::info!(total, "batch started");

        for (index, request) in requests.into_iter().enumerate() {
            if index > 0 {
                self.pacer.pause().await;
                tokio::task::yield_now().await;
            }
            tracing::debug!(item = index + 1, total, filename = %request.filename, "batch item");
            if let DownloadOutcome::Failed(_) = download_via(Arc::clone(&self.host), request).await {
                failed += 1;
            }
        }

        tracing::info!(total, failed, "batch finished");
    }
}

/// Handle to a spawned batch. Dropping it does not cancel the batch.
#[derive(Debug)]
pub struct BatchHandle(tokio::task::JoinHandle<()>);

impl BatchHandle {
    pub(crate) fn spawn<H: DownloadHost, P: Pacer>(
        queue: SequentialQueue<H, P>,
        requests: Vec<DownloadRequest>,
    ) -> Self {
        Self(tokio::spawn(queue.run(requests)))
    }

    /// Waits until every item has been attempted.
    pub async fn wait(self) {
        if let Err(e) = self.0.await {
            tracing::error!("batch task ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}
