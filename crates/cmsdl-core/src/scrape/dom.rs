//! Small helpers over `scraper` elements.

use scraper::{ElementRef, Selector};

use crate::classify::{Controls, TitleParts};

/// Concatenated descendant text, trimmed.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Whether a control is hidden by markup: the `hidden` attribute, an inline
/// `display: none` / `visibility: hidden` style, or Bootstrap's `d-none`.
pub fn is_hidden(element: ElementRef<'_>) -> bool {
    let el = element.value();
    if el.attr("hidden").is_some() || el.classes().any(|c| c == "d-none") {
        return true;
    }
    let style: String = el
        .attr("style")
        .unwrap_or("")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    style.contains("display:none") || style.contains("visibility:hidden")
}

/// Title text split into the emphasized lead and the text following it.
pub fn title_parts(title: ElementRef<'_>, lead_selector: &Selector) -> TitleParts {
    let region_text = element_text(title);
    let Some(lead) = title.select(lead_selector).next() else {
        return TitleParts {
            lead: None,
            region_text,
            trailing_text: None,
        };
    };

    // First non-empty text node after the lead; element siblings are skipped.
    let trailing_text = lead.next_siblings().find_map(|sibling| {
        sibling
            .value()
            .as_text()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    });

    TitleParts {
        lead: Some(element_text(lead)),
        region_text,
        trailing_text,
    }
}

/// Control visibility for an item, from its optional controls.
pub fn controls(watch: Option<ElementRef<'_>>, download: Option<ElementRef<'_>>) -> Controls {
    Controls {
        watch_visible: watch.is_some_and(|w| !is_hidden(w)),
        download_visible: download.is_some_and(|d| !is_hidden(d)),
    }
}
