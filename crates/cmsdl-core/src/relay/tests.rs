use super::*;
use crate::model::DownloadId;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Records every call; fails for URLs listed in `failing`.
#[derive(Default)]
struct FakeHost {
    failing: Vec<String>,
    calls: Mutex<Vec<(String, String, ConflictPolicy)>>,
    next: AtomicU64,
}

impl FakeHost {
    fn failing(urls: &[&str]) -> Self {
        Self {
            failing: urls.iter().map(|u| u.to_string()).collect(),
            ..Self::default()
        }
    }

    fn urls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|c| c.0.clone()).collect()
    }
}

impl DownloadHost for FakeHost {
    fn download(
        &self,
        url: &str,
        filename: &str,
        conflict: ConflictPolicy,
    ) -> Result<DownloadId, HostError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), filename.to_string(), conflict));
        if self.failing.iter().any(|f| f == url) {
            return Err(HostError::Http(500));
        }
        Ok(DownloadId(self.next.fetch_add(1, Ordering::SeqCst) + 1))
    }
}

#[derive(Clone, Default)]
struct CountingPacer(Arc<AtomicUsize>);

impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn req(url: &str) -> DownloadRequest {
    DownloadRequest {
        url: url.to_string(),
        filename: format!("{}.pdf", url.rsplit('/').next().unwrap()),
    }
}

#[tokio::test]
async fn download_one_uses_uniquify_and_returns_id() {
    let host = Arc::new(FakeHost::default());
    let relay = Relay::with_pacer(Arc::clone(&host), CountingPacer::default());
    let outcome = relay.download_one(req("https://x/a")).await;
    assert_eq!(outcome, DownloadOutcome::Started(DownloadId(1)));
    let calls = host.calls.lock().unwrap();
    assert_eq!(calls[0].1, "a.pdf");
    assert_eq!(calls[0].2, ConflictPolicy::Uniquify);
}

#[tokio::test]
async fn download_one_reports_host_failure() {
    let host = Arc::new(FakeHost::failing(&["https://x/a"]));
    let relay = Relay::with_pacer(host, CountingPacer::default());
    let outcome = relay.download_one(req("https://x/a")).await;
    assert_eq!(outcome, DownloadOutcome::Failed("HTTP 500".to_string()));
}

#[tokio::test]
async fn batch_failure_does_not_stop_later_items() {
    let host = Arc::new(FakeHost::failing(&["https://x/b"]));
    let pacer = CountingPacer::default();
    let relay = Relay::with_pacer(Arc::clone(&host), pacer.clone());

    let handle = relay.download_batch(vec![req("https://x/a"), req("https://x/b"), req("https://x/c")]);
    handle.wait().await;

    assert_eq!(host.urls(), ["https://x/a", "https://x/b", "https://x/c"]);
    assert_eq!(pacer.0.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn batch_is_paced_by_fixed_delay() {
    let host = Arc::new(FakeHost::failing(&["https://x/b"]));
    let delay = Duration::from_millis(300);
    let relay = Relay::with_pacer(Arc::clone(&host), FixedDelay(delay));

    let started = tokio::time::Instant::now();
    relay
        .download_batch(vec![req("https://x/a"), req("https://x/b"), req("https://x/c")])
        .wait()
        .await;

    assert!(started.elapsed() >= delay * 2, "elapsed {:?}", started.elapsed());
    assert_eq!(host.urls().len(), 3);
}

#[tokio::test]
async fn empty_batch_finishes_without_pausing() {
    let pacer = CountingPacer::default();
    let relay = Relay::with_pacer(Arc::new(FakeHost::default()), pacer.clone());
    relay.download_batch(Vec::new()).wait().await;
    assert_eq!(pacer.0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn handle_single_message() {
    let relay = Relay::with_pacer(Arc::new(FakeHost::default()), CountingPacer::default());
    let response = relay
        .handle(RelayRequest::DownloadFile {
            url: "https://x/a".to_string(),
            filename: "a.pdf".to_string(),
        })
        .await;
    assert!(response.success);
    assert_eq!(response.download_id, Some(DownloadId(1)));
}

#[tokio::test]
async fn handle_bulk_message_acknowledges_immediately() {
    let host = Arc::new(FakeHost::default());
    let relay = Relay::with_pacer(Arc::clone(&host), CountingPacer::default());
    let (response, batch) = relay
        .dispatch(RelayRequest::BulkDownloadFiles {
            items: vec![req("https://x/a"), req("https://x/b")],
        })
        .await;
    assert!(response.success);
    assert!(response.message.unwrap().contains("2 item(s)"));
    batch.unwrap().wait().await;
    assert_eq!(host.urls().len(), 2);
}

#[tokio::test]
async fn native_serve_answers_each_frame_and_drains_batches() {
    let host = Arc::new(FakeHost::failing(&["https://x/bad"]));
    let relay = Relay::with_pacer(Arc::clone(&host), CountingPacer::default());

    let mut input = Vec::new();
    for json in [
        r#"{"action":"downloadFile","url":"https://x/bad","filename":"bad.pdf"}"#,
        r#"{"action":"bulkDownloadFiles","items":[{"url":"https://x/a","filename":"a.pdf"},{"url":"https://x/c","filename":"c.pdf"}]}"#,
        r#"not json"#,
    ] {
        input.extend_from_slice(&(json.len() as u32).to_le_bytes());
        input.extend_from_slice(json.as_bytes());
    }

    let mut output = Vec::new();
    native::serve(&relay, std::io::Cursor::new(input), &mut output)
        .await
        .unwrap();

    let mut responses = Vec::new();
    let mut rest = output.as_slice();
    while !rest.is_empty() {
        let len = u32::from_le_bytes(rest[..4].try_into().unwrap()) as usize;
        responses.push(serde_json::from_slice::<RelayResponse>(&rest[4..4 + len]).unwrap());
        rest = &rest[4 + len..];
    }

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0], RelayResponse::failed("HTTP 500"));
    assert!(responses[1].success);
    assert!(!responses[2].success);
    assert!(responses[2].error.as_deref().unwrap().starts_with("malformed message"));
    assert_eq!(host.urls(), ["https://x/bad", "https://x/a", "https://x/c"]);
}
