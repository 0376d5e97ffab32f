//! `cmsdl relay` – native messaging host for the browser extension.

use anyhow::Result;
use cmsdl_core::config::CmsdlConfig;
use cmsdl_core::http::request_headers;
use cmsdl_core::relay::{native, CurlHost, Relay};
use std::path::Path;

pub async fn run_relay(cfg: &CmsdlConfig, download_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(download_dir)?;
    let host = CurlHost::new(download_dir, request_headers(cfg));
    let relay = Relay::new(host, cfg.batch_delay());
    tracing::info!(dir = %download_dir.display(), "relay listening on stdin");
    native::serve(&relay, tokio::io::stdin(), tokio::io::stdout()).await?;
    tracing::info!("relay input closed");
    Ok(())
}
