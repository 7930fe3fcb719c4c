use std::future::Future;

use crate::types::{IndexCollection, RankedHit};

/// Where a search index comes from. Every call is a fresh retrieval.
pub trait IndexSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = anyhow::Result<IndexCollection>> + Send;
}

/// Field-weighted full-text ranking over a document set that lives for one call.
///
/// Implementations must return references in descending relevance and produce
/// the same order for the same collection and query.
pub trait Ranker: Send + Sync {
    fn rank(&self, collection: &IndexCollection, query: &str) -> anyhow::Result<Vec<RankedHit>>;
}
