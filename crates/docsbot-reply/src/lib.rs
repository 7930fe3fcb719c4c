//! docsbot-reply
//!
//! Turns a docs query into a chat reply: fetch the index, rank it, render the
//! best match with an excerpt and up to a handful of secondary links.

pub mod compose;
pub mod fallback;
pub mod invocation;

use anyhow::Result;
use tracing::debug;

use docsbot_core::config::DocsSettings;
use docsbot_core::traits::{IndexSource, Ranker};
use docsbot_core::types::Reply;

pub use compose::{compose_reply, render_hits, NO_RESULTS_MESSAGE};
pub use fallback::landing_reply;
pub use invocation::Invocation;

/// Stateless search pipeline. Each call fetches and indexes from scratch, so
/// concurrent calls share nothing but the read-only settings.
pub struct DocsSearch<S, R>
where
    S: IndexSource,
    R: Ranker,
{
    source: S,
    ranker: R,
    settings: DocsSettings,
}

impl<S, R> DocsSearch<S, R>
where
    S: IndexSource,
    R: Ranker,
{
    pub fn new(source: S, ranker: R, settings: DocsSettings) -> Self {
        Self { source, ranker, settings }
    }

    pub fn settings(&self) -> &DocsSettings {
        &self.settings
    }

    /// Fetch and parse failures propagate; an empty result set is `Reply::Text`.
    pub async fn search(&self, query: Option<&str>) -> Result<Reply> {
        let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
            return Ok(landing_reply(&self.settings));
        };
        let collection = self.source.fetch().await?;
        let hits = self.ranker.rank(&collection, query)?;
        debug!(query, hits = hits.len(), "ranked docs");
        Ok(compose_reply(&collection, &hits, &self.settings))
    }

    pub async fn handle(&self, invocation: &Invocation) -> Result<Reply> {
        self.search(invocation.query().as_deref()).await
    }
}
