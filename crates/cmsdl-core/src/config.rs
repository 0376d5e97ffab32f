use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Origin used to absolutize relative links when the config does not override it.
pub const DEFAULT_ORIGIN: &str = "https://cms.guc.edu.eg";

/// What to do with items classified as streaming video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamingPolicy {
    /// Drop streaming items from the scrape entirely.
    Skip,
    /// Keep streaming items with no URL; they never get a download trigger.
    Exclude,
    /// Keep streaming items with a URL and give each its own video trigger.
    /// They are still left out of every batch.
    #[default]
    Dedicated,
}

/// CSS selectors describing the course page layout (optional `[selectors]` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One block per course week.
    pub week: String,
    /// Header inside a week block holding the `Week: <date>` text.
    pub week_header: String,
    /// Content items inside a week block.
    pub item: String,
    /// Title region inside an item.
    pub title: String,
    /// Emphasized lead segment inside the title region.
    pub title_lead: String,
    /// File download control inside an item.
    pub download_link: String,
    /// Video playback control inside an item.
    pub watch_video: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            week: "div.card.mb-5.weeksdata".to_string(),
            week_header: "div.card-header h2.text-big".to_string(),
            item: "div.p-3 > div:last-of-type > div.card.mb-4".to_string(),
            title: r#"div[id^="content"]"#.to_string(),
            title_lead: "strong".to_string(),
            download_link: r#"a.btn.btn-primary.contentbtn[id="download"]"#.to_string(),
            watch_video: r#"input.btn.btn-primary.vodbutton.contentbtn[value="Watch Video"]"#
                .to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/cmsdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsdlConfig {
    /// Scheme and host prepended to relative links.
    pub origin: String,
    /// Handling of streaming items; see [`StreamingPolicy`].
    #[serde(default)]
    pub streaming_policy: StreamingPolicy,
    /// Pause between consecutive downloads of a batch, in milliseconds.
    pub batch_delay_ms: u64,
    /// Where downloaded files land (None = current directory).
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Raw `Cookie` header value sent with page fetches and downloads.
    #[serde(default)]
    pub cookie: Option<String>,
    #[serde(default)]
    pub selectors: SelectorConfig,
}

impl Default for CmsdlConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            streaming_policy: StreamingPolicy::default(),
            batch_delay_ms: 300,
            download_dir: None,
            cookie: None,
            selectors: SelectorConfig::default(),
        }
    }
}

impl CmsdlConfig {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cmsdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CmsdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CmsdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: CmsdlConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
