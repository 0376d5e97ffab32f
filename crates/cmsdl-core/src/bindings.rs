//! Download triggers bound for a page, deduplicated across re-scrapes.
//!
//! Every scrape returns a fresh session, but triggers must be bound once per
//! underlying element. The registry remembers what was bound and hands out
//! only the new ones.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::ItemKey;
use crate::scrape::ScrapeSession;

/// A download trigger attached to the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Affordance {
    /// Single-file download for one item.
    Item(ItemKey),
    /// Single-item download for a streaming item (dedicated policy).
    Video(ItemKey),
    /// All files of one week.
    Week(String),
    /// All files of the course.
    Global,
    /// All files matching a bulk filter keyword.
    Filter(&'static str),
}

#[derive(Debug, Default)]
pub struct AffordanceRegistry {
    bound: HashSet<Affordance>,
}

impl AffordanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_bound(&self, affordance: &Affordance) -> bool {
        self.bound.contains(affordance)
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Binds every trigger `session` calls for and returns the ones not bound before.
    pub fn bind(&mut self, session: &ScrapeSession) -> Vec<Affordance> {
        let wanted = wanted_affordances(session);
        let fresh: Vec<Affordance> = wanted
            .into_iter()
            .filter(|a| self.bound.insert(a.clone()))
            .collect();
        tracing::debug!(new = fresh.len(), total = self.bound.len(), "bound affordances");
        fresh
    }
}

fn wanted_affordances(session: &ScrapeSession) -> Vec<Affordance> {
    let mut wanted = Vec::new();
    for week in &session.weeks {
        for item in &week.items {
            if item.is_batchable() {
                wanted.push(Affordance::Item(item.key.clone()));
            } else if item.is_streaming && item.source_url.is_some() {
                wanted.push(Affordance::Video(item.key.clone()));
            }
        }
        if week.batchable().next().is_some() {
            wanted.push(Affordance::Week(week.identifier.clone()));
        }
    }
    if session.items().any(|i| i.is_batchable()) {
        wanted.push(Affordance::Global);
        wanted.extend(
            session
                .available_filters()
                .into_iter()
                .map(|f| Affordance::Filter(f.keyword)),
        );
    }
    wanted
}
