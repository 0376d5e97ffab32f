//! Week/item scraper over a course page.
//!
//! Walks week blocks and their item cards, classifies each item, resolves its
//! URL and synthesizes its filename. Items missing required structure are
//! skipped and logged; nothing here is fatal for the rest of the page.

mod dom;
mod filter;
mod session;

pub use filter::{find_filter, BulkFilter, BULK_FILTERS};
pub use session::{ScrapeSession, SkipReason, SkippedItem};

use scraper::{ElementRef, Html, Selector};

use crate::classify::{self, Classification};
use crate::config::{CmsdlConfig, SelectorConfig, StreamingPolicy};
use crate::model::{ContentItem, ItemKey, WeekGroup};
use crate::url_model::{self, ExtensionInput};

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("invalid {name} selector {selector:?}: {reason}")]
    Selector {
        name: &'static str,
        selector: String,
        reason: String,
    },
}

/// Compiled page selectors.
#[derive(Debug, Clone)]
pub struct PageSelectors {
    week: Selector,
    week_header: Selector,
    item: Selector,
    title: Selector,
    title_lead: Selector,
    download_link: Selector,
    watch_video: Selector,
}

fn compile(name: &'static str, css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        name,
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

impl PageSelectors {
    pub fn compile(cfg: &SelectorConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            week: compile("week", &cfg.week)?,
            week_header: compile("week_header", &cfg.week_header)?,
            item: compile("item", &cfg.item)?,
            title: compile("title", &cfg.title)?,
            title_lead: compile("title_lead", &cfg.title_lead)?,
            download_link: compile("download_link", &cfg.download_link)?,
            watch_video: compile("watch_video", &cfg.watch_video)?,
        })
    }
}

/// Everything a scrape pass needs besides the page itself.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub origin: String,
    pub streaming_policy: StreamingPolicy,
    pub selectors: PageSelectors,
}

impl ScrapeOptions {
    pub fn new(
        origin: &str,
        streaming_policy: StreamingPolicy,
        selectors: &SelectorConfig,
    ) -> Result<Self, ScrapeError> {
        Ok(Self {
            origin: origin.trim_end_matches('/').to_string(),
            streaming_policy,
            selectors: PageSelectors::compile(selectors)?,
        })
    }

    pub fn from_config(cfg: &CmsdlConfig) -> Result<Self, ScrapeError> {
        Self::new(&cfg.origin, cfg.streaming_policy, &cfg.selectors)
    }
}

/// Label for a week: `Week_<date>` from its header, else `Week <position>`.
pub fn week_identifier(header_text: Option<&str>, position: usize) -> String {
    let date = header_text
        .map(|t| t.trim().replacen("Week:", "", 1))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    match date {
        Some(date) => format!("Week_{date}"),
        None => format!("Week {position}"),
    }
}

/// Parses `html` and scrapes every week block.
pub fn scrape_page(html: &str, opts: &ScrapeOptions) -> ScrapeSession {
    let document = Html::parse_document(html);
    scrape_document(&document, opts)
}

/// Scrapes an already parsed document.
pub fn scrape_document(document: &Html, opts: &ScrapeOptions) -> ScrapeSession {
    let mut session = ScrapeSession::default();

    for (week_index, block) in document.select(&opts.selectors.week).enumerate() {
        let header = block
            .select(&opts.selectors.week_header)
            .next()
            .map(dom::element_text);
        let identifier = week_identifier(header.as_deref(), week_index + 1);
        let mut items = Vec::new();

        for (item_index, card) in block.select(&opts.selectors.item).enumerate() {
            match extract_item(card, &identifier, week_index, item_index, opts) {
                Ok(item) => items.push(item),
                Err((title, reason)) => {
                    match reason {
                        SkipReason::StreamingPolicy => tracing::debug!(
                            week = %identifier,
                            position = item_index + 1,
                            "streaming item skipped by policy"
                        ),
                        _ => tracing::warn!(
                            week = %identifier,
                            position = item_index + 1,
                            title = title.as_deref().unwrap_or(""),
                            ?reason,
                            "skipping item"
                        ),
                    }
                    session.skipped.push(SkippedItem {
                        week: identifier.clone(),
                        position: item_index + 1,
                        title,
                        reason,
                    });
                }
            }
        }

        tracing::debug!(week = %identifier, items = items.len(), "scraped week");
        session.weeks.push(WeekGroup { identifier, items });
    }

    tracing::info!(
        weeks = session.weeks.len(),
        items = session.items().count(),
        skipped = session.skipped.len(),
        "scrape finished"
    );
    session
}

type Skip = (Option<String>, SkipReason);

fn extract_item(
    card: ElementRef<'_>,
    week: &str,
    week_index: usize,
    item_index: usize,
    opts: &ScrapeOptions,
) -> Result<ContentItem, Skip> {
    let sel = &opts.selectors;
    let title = card
        .select(&sel.title)
        .next()
        .ok_or((None, SkipReason::MissingTitle))?;
    let download = card.select(&sel.download_link).next();
    let watch = card.select(&sel.watch_video).next();

    let parts = dom::title_parts(title, &sel.title_lead);
    let original_title = parts.region_text.clone();
    let Classification {
        base_title,
        display_title,
        type_tag,
        is_streaming,
    } = classify::classify(&parts, dom::controls(watch, download));

    let href = download.and_then(|d| d.value().attr("href"));
    let raw_target = if is_streaming {
        href.or_else(|| watch.and_then(|w| w.value().attr("data-url")))
    } else {
        href
    };

    let source_url = match (is_streaming, opts.streaming_policy) {
        (true, StreamingPolicy::Skip) => {
            return Err((Some(original_title), SkipReason::StreamingPolicy))
        }
        (true, StreamingPolicy::Exclude) => None,
        _ => Some(
            url_model::resolve_url(&opts.origin, raw_target)
                .ok_or_else(|| (Some(original_title.clone()), SkipReason::MissingUrl))?,
        ),
    };

    let key = item_key(title.value().attr("id"), raw_target, week_index, item_index);

    let filename = url_model::derive_filename(
        week,
        &display_title,
        &ExtensionInput {
            source_url: source_url.as_deref(),
            type_tag: &type_tag,
            is_streaming,
        },
    );

    Ok(ContentItem {
        key,
        original_title,
        base_title,
        display_title,
        type_tag,
        is_streaming,
        source_url,
        filename,
    })
}

/// Title region `id` when present; otherwise the position, suffixed with the
/// link target so a card swapped for another at the same spot is a new item.
fn item_key(
    title_id: Option<&str>,
    raw_target: Option<&str>,
    week_index: usize,
    item_index: usize,
) -> ItemKey {
    if let Some(id) = title_id.map(str::trim).filter(|id| !id.is_empty()) {
        return ItemKey(id.to_string());
    }
    let position = format!("{}/{}", week_index + 1, item_index + 1);
    match raw_target.map(str::trim).filter(|t| !t.is_empty()) {
        Some(target) => ItemKey(format!("{position} {target}")),
        None => ItemKey(position),
    }
}
