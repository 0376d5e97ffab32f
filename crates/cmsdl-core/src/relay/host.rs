//! The host download facility: trait seam plus a libcurl implementation.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::http::easy_get;
use crate::model::DownloadId;
use crate::url_model::candidate_names;

/// Temporary file suffix used before the atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Numbered variants tried before giving up on a free name.
const MAX_NAME_ATTEMPTS: usize = 1000;

/// What to do when the target filename already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Append ` (1)`, ` (2)`, ... before the extension.
    #[default]
    Uniquify,
    Overwrite,
}

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("invalid filename {0:?}")]
    InvalidFilename(String),
    #[error("network: {0}")]
    Network(#[from] curl::Error),
    #[error("HTTP {0}")]
    Http(u32),
    #[error("storage: {0}")]
    Io(#[from] std::io::Error),
}

/// Starts an OS-level download of `url` saved as `filename`.
///
/// Implementations block; the relay calls them from `spawn_blocking`.
pub trait DownloadHost: Send + Sync + 'static {
    fn download(
        &self,
        url: &str,
        filename: &str,
        conflict: ConflictPolicy,
    ) -> Result<DownloadId, HostError>;
}

/// Downloads with libcurl into a fixed directory.
pub struct CurlHost {
    download_dir: PathBuf,
    custom_headers: HashMap<String, String>,
    next_id: AtomicU64,
}

impl CurlHost {
    pub fn new(download_dir: impl Into<PathBuf>, custom_headers: HashMap<String, String>) -> Self {
        Self {
            download_dir: download_dir.into(),
            custom_headers,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Claims the target name by creating its `.part` file.
    ///
    /// Under `Uniquify` a name is taken when the final file or its `.part`
    /// exists, so downloads that overlap never share a temp file.
    fn reserve(&self, filename: &str, conflict: ConflictPolicy) -> Result<(PathBuf, File), HostError> {
        if conflict == ConflictPolicy::Overwrite {
            let final_path = self.download_dir.join(filename);
            let file = File::create(temp_path(&final_path))?;
            return Ok((final_path, file));
        }

        for name in candidate_names(filename).take(MAX_NAME_ATTEMPTS) {
            let final_path = self.download_dir.join(&name);
            if final_path.exists() {
                continue;
            }
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(temp_path(&final_path))
            {
                Ok(file) => return Ok((final_path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(HostError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free name for {filename:?}"),
        )))
    }
}

/// Filenames arrive over the message boundary; they must stay inside the download dir.
fn validate_filename(filename: &str) -> Result<(), HostError> {
    let bad = filename.trim().is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\', '\0']);
    if bad {
        Err(HostError::InvalidFilename(filename.to_string()))
    } else {
        Ok(())
    }
}

fn temp_path(final_path: &Path) -> PathBuf {
    let mut name = final_path.as_os_str().to_os_string();
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

impl DownloadHost for CurlHost {
    fn download(
        &self,
        url: &str,
        filename: &str,
        conflict: ConflictPolicy,
    ) -> Result<DownloadId, HostError> {
        validate_filename(filename)?;
        fs::create_dir_all(&self.download_dir)?;
        let (final_path, file) = self.reserve(filename, conflict)?;
        let part_path = temp_path(&final_path);

        if let Err(e) = fetch_to(url, &self.custom_headers, file) {
            let _ = fs::remove_file(&part_path);
            return Err(e);
        }
        fs::rename(&part_path, &final_path)?;

        let id = DownloadId(self.next_id.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(%id, path = %final_path.display(), "download stored");
        Ok(id)
    }
}

fn fetch_to(
    url: &str,
    custom_headers: &HashMap<String, String>,
    mut file: File,
) -> Result<(), HostError> {
    let mut write_error: Option<std::io::Error> = None;

    let mut easy = easy_get(url, custom_headers, Duration::from_secs(3600))?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };
    if let Some(e) = write_error {
        return Err(HostError::Io(e));
    }
    performed?;

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(HostError::Http(code));
    }
    file.sync_all()?;
    Ok(())
}
