//! `cmsdl scan <page>` – list weeks, items and the download triggers they offer.

use anyhow::Result;
use cmsdl_core::bindings::{Affordance, AffordanceRegistry};
use cmsdl_core::config::CmsdlConfig;

use super::scrape_source;

pub async fn run_scan(cfg: &CmsdlConfig, page: &str, json: bool) -> Result<()> {
    let session = scrape_source(cfg, page).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    if session.weeks.is_empty() {
        println!("No weeks found on page.");
        return Ok(());
    }

    for week in &session.weeks {
        println!("{}", week.identifier);
        println!("  {:<10} {:<8} {}", "TYPE", "KIND", "FILENAME");
        for item in &week.items {
            let kind = if item.is_streaming { "video" } else { "file" };
            let tag = if item.type_tag.is_empty() {
                "-"
            } else {
                item.type_tag.as_str()
            };
            println!("  {:<10} {:<8} {}", tag, kind, item.filename);
        }
    }

    if !session.skipped.is_empty() {
        println!();
        println!("Skipped {} item(s):", session.skipped.len());
        for s in &session.skipped {
            println!(
                "  {} #{}: {:?} ({})",
                s.week,
                s.position,
                s.reason,
                s.title.as_deref().unwrap_or("untitled")
            );
        }
    }

    let mut registry = AffordanceRegistry::new();
    let triggers = registry.bind(&session);
    let files = triggers
        .iter()
        .filter(|a| matches!(a, Affordance::Item(_)))
        .count();
    let videos = triggers
        .iter()
        .filter(|a| matches!(a, Affordance::Video(_)))
        .count();
    let weeks = triggers
        .iter()
        .filter(|a| matches!(a, Affordance::Week(_)))
        .count();
    let filters: Vec<&str> = triggers
        .iter()
        .filter_map(|a| match a {
            Affordance::Filter(keyword) => Some(*keyword),
            _ => None,
        })
        .collect();

    println!();
    println!(
        "{} file(s), {} video(s), {} week batch(es); course batch: {}",
        files,
        videos,
        weeks,
        if triggers.contains(&Affordance::Global) {
            "yes"
        } else {
            "no"
        }
    );
    if !filters.is_empty() {
        println!("--kind values: {}", filters.join(", "));
    }
    Ok(())
}
