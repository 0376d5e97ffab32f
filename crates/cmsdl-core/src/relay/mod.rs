//! Download relay: the privileged side that turns requests into downloads.
//!
//! Single requests are awaited and answered with an outcome. Batches are
//! acknowledged at once and then run one item at a time with a pause in
//! between; per-item outcomes are only logged.

mod host;
mod message;
pub mod native;
mod queue;

pub use host::{ConflictPolicy, CurlHost, DownloadHost, HostError, TEMP_SUFFIX};
pub use message::{RelayRequest, RelayResponse};
pub use queue::{BatchHandle, FixedDelay, Pacer, SequentialQueue};

use std::sync::Arc;
use std::time::Duration;

use crate::model::{DownloadOutcome, DownloadRequest};

/// Runs one download on the blocking pool and converts the result to an outcome.
pub(crate) async fn download_via<H: DownloadHost>(
    host: Arc<H>,
    request: DownloadRequest,
) -> DownloadOutcome {
    let DownloadRequest { url, filename } = request;
    tracing::info!(%url, %filename, "download requested");
    let name = filename.clone();
    let joined = tokio::task::spawn_blocking(move || {
        host.download(&url, &filename, ConflictPolicy::Uniquify)
    })
    .await;
    match joined {
        Ok(Ok(id)) => {
            tracing::info!(%id, filename = %name, "download started");
            DownloadOutcome::Started(id)
        }
        Ok(Err(e)) => {
            tracing::error!(filename = %name, "download failed: {}", e);
            DownloadOutcome::Failed(e.to_string())
        }
        Err(e) => {
            tracing::error!(filename = %name, "download task failed: {}", e);
            DownloadOutcome::Failed(format!("download task failed: {e}"))
        }
    }
}

pub struct Relay<H, P = FixedDelay> {
    host: Arc<H>,
    pacer: P,
}

impl<H: DownloadHost> Relay<H, FixedDelay> {
    /// Relay pausing `batch_delay` between batch items.
    pub fn new(host: H, batch_delay: Duration) -> Self {
        Self::with_pacer(Arc::new(host), FixedDelay(batch_delay))
    }
}

impl<H: DownloadHost, P: Pacer> Relay<H, P> {
    pub fn with_pacer(host: Arc<H>, pacer: P) -> Self {
        Self { host, pacer }
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    /// Downloads one file, keeping existing files by picking a fresh name.
    pub async fn download_one(&self, request: DownloadRequest) -> DownloadOutcome {
        download_via(Arc::clone(&self.host), request).await
    }

    /// Starts a batch in the background and returns immediately.
    pub fn download_batch(&self, requests: Vec<DownloadRequest>) -> BatchHandle {
        let queue = SequentialQueue::new(Arc::clone(&self.host), self.pacer.clone());
        BatchHandle::spawn(queue, requests)
    }

    /// Answers a message; batches are acknowledged before they run.
    pub async fn handle(&self, request: RelayRequest) -> RelayResponse {
        self.dispatch(request).await.0
    }

    /// Like [`Relay::handle`] but also returns the handle of a started batch.
    pub async fn dispatch(&self, request: RelayRequest) -> (RelayResponse, Option<BatchHandle>) {
        match request {
            RelayRequest::DownloadFile { url, filename } => {
                let outcome = self.download_one(DownloadRequest { url, filename }).await;
                (outcome.into(), None)
            }
            RelayRequest::BulkDownloadFiles { items } => {
                let count = items.len();
                tracing::info!(count, "bulk download requested");
                let handle = self.download_batch(items);
                let ack = RelayResponse::accepted(format!(
                    "Bulk download request received; processing {count} item(s)."
                ));
                (ack, Some(handle))
            }
        }
    }
}

#[cfg(test)]
mod tests;
