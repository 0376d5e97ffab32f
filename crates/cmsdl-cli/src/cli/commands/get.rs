//! `cmsdl get <url> <filename>` – download one file and report the outcome.

use anyhow::{bail, Result};
use cmsdl_core::config::CmsdlConfig;
use cmsdl_core::http::request_headers;
use cmsdl_core::model::{DownloadOutcome, DownloadRequest};
use cmsdl_core::relay::{CurlHost, Relay};
use std::path::Path;

pub async fn run_get(cfg: &CmsdlConfig, url: String, filename: String, download_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(download_dir)?;
    let host = CurlHost::new(download_dir, request_headers(cfg));
    let relay = Relay::new(host, cfg.batch_delay());
    match relay.download_one(DownloadRequest { url, filename }).await {
        DownloadOutcome::Started(id) => {
            println!("Download {} saved in {}", id, download_dir.display());
            Ok(())
        }
        DownloadOutcome::Failed(reason) => bail!("download failed: {}", reason),
    }
}
