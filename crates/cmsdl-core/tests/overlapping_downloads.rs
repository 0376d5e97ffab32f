//! Integration test: downloads of the same filename that run at the same
//! time must land in separate files.

mod common;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cmsdl_core::model::DownloadRequest;
use cmsdl_core::relay::{ConflictPolicy, CurlHost, DownloadHost, Relay};
use common::file_server::{self, FileServerOptions};
use tempfile::tempdir;

fn slow_server() -> String {
    let mut routes = HashMap::new();
    routes.insert("/files/a".to_string(), b"AAAAAAAAAA".to_vec());
    routes.insert("/files/b".to_string(), b"BBBBBBBBBB".to_vec());
    file_server::start_with_options(
        routes,
        FileServerOptions {
            response_delay: Some(Duration::from_millis(500)),
            ..FileServerOptions::default()
        },
    )
}

fn files_in(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| {
            (
                e.file_name().to_string_lossy().into_owned(),
                std::fs::read(e.path()).unwrap(),
            )
        })
        .collect();
    files.sort();
    files
}

#[test]
fn concurrent_host_downloads_get_distinct_names() {
    let origin = slow_server();
    let download_dir = tempdir().unwrap();
    let host = Arc::new(CurlHost::new(download_dir.path(), HashMap::new()));

    let first = {
        let host = Arc::clone(&host);
        let url = format!("{origin}/files/a");
        thread::spawn(move || host.download(&url, "a.pdf", ConflictPolicy::Uniquify))
    };
    thread::sleep(Duration::from_millis(100));
    let second = {
        let host = Arc::clone(&host);
        let url = format!("{origin}/files/b");
        thread::spawn(move || host.download(&url, "a.pdf", ConflictPolicy::Uniquify))
    };

    assert!(first.join().unwrap().is_ok());
    assert!(second.join().unwrap().is_ok());
    assert_eq!(
        files_in(download_dir.path()),
        [
            ("a (1).pdf".to_string(), b"BBBBBBBBBB".to_vec()),
            ("a.pdf".to_string(), b"AAAAAAAAAA".to_vec()),
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn single_download_during_batch_keeps_both_files() {
    let origin = slow_server();
    let download_dir = tempdir().unwrap();
    let relay = Relay::new(
        CurlHost::new(download_dir.path(), HashMap::new()),
        Duration::from_millis(1),
    );

    let batch = relay.download_batch(vec![DownloadRequest {
        url: format!("{origin}/files/a"),
        filename: "Week_2024-09-14 - Lecture 1.pdf".to_string(),
    }]);
    tokio::time::sleep(Duration::from_millis(100)).await;

    let outcome = relay
        .download_one(DownloadRequest {
            url: format!("{origin}/files/b"),
            filename: "Week_2024-09-14 - Lecture 1.pdf".to_string(),
        })
        .await;
    assert!(outcome.is_success(), "{outcome:?}");
    batch.wait().await;

    assert_eq!(
        files_in(download_dir.path()),
        [
            (
                "Week_2024-09-14 - Lecture 1 (1).pdf".to_string(),
                b"BBBBBBBBBB".to_vec()
            ),
            (
                "Week_2024-09-14 - Lecture 1.pdf".to_string(),
                b"AAAAAAAAAA".to_vec()
            ),
        ]
    );
}
