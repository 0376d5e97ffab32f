//! `cmsdl download <page>` – download the files of a course page as one paced batch.

use anyhow::{bail, Result};
use cmsdl_core::config::CmsdlConfig;
use cmsdl_core::http::request_headers;
use cmsdl_core::model::DownloadRequest;
use cmsdl_core::relay::{CurlHost, Relay};
use cmsdl_core::scrape::{find_filter, ScrapeSession};
use std::path::Path;

use super::scrape_source;

/// Which part of the course to download. Both `None` means everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub week: Option<String>,
    pub kind: Option<String>,
}

/// Requests for the batchable items picked by `selection`, in page order.
pub fn select_requests(session: &ScrapeSession, selection: &Selection) -> Result<Vec<DownloadRequest>> {
    let filter = match selection.kind.as_deref() {
        Some(kind) => match find_filter(kind) {
            Some(f) => Some(f),
            None => bail!("unknown kind {:?}; expected tutorial, lecture or project", kind),
        },
        None => None,
    };

    if let Some(week) = selection.week.as_deref() {
        if session.week(week).is_none() {
            let known: Vec<&str> = session.weeks.iter().map(|w| w.identifier.as_str()).collect();
            bail!("no week {:?} on page (found: {})", week, known.join(", "));
        }
    }

    let requests = session
        .weeks
        .iter()
        .filter(|w| selection.week.as_deref().map_or(true, |id| w.identifier == id))
        .flat_map(|w| w.batchable())
        .filter(|item| filter.map_or(true, |f| f.matches(item)))
        .filter_map(|item| item.download_request())
        .collect();
    Ok(requests)
}

pub async fn run_download(
    cfg: &CmsdlConfig,
    page: &str,
    selection: &Selection,
    dry_run: bool,
    download_dir: &Path,
) -> Result<()> {
    let session = scrape_source(cfg, page).await?;
    let requests = select_requests(&session, selection)?;

    if requests.is_empty() {
        println!("Nothing to download.");
        return Ok(());
    }

    if dry_run {
        for r in &requests {
            println!("{}\t{}", r.filename, r.url);
        }
        return Ok(());
    }

    std::fs::create_dir_all(download_dir)?;
    let host = CurlHost::new(download_dir, request_headers(cfg));
    let relay = Relay::new(host, cfg.batch_delay());
    let count = requests.len();
    println!("Downloading {} file(s) into {}", count, download_dir.display());
    relay.download_batch(requests).wait().await;
    println!("Batch finished; per-file results are in the log.");
    Ok(())
}
