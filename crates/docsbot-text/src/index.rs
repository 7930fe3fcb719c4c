use anyhow::Result;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::{Field, Schema, Value};
use tantivy::{doc, Index, IndexWriter, Score, TantivyDocument};
use tracing::debug;

use docsbot_core::error::Error;
use docsbot_core::traits::Ranker;
use docsbot_core::types::{IndexCollection, RankedHit};

use crate::tantivy_utils::{build_schema, register_tokenizer, LOCATION_FIELD, REF_FIELD, TEXT_FIELD, TITLE_FIELD};

/// Tantivy requires at least 15MB per indexing thread.
const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Relevance multipliers per searched field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBoosts {
    pub title: Score,
    pub location: Score,
    pub text: Score,
}

impl Default for FieldBoosts {
    fn default() -> Self {
        Self { title: 2.0, location: 1.0, text: 1.0 }
    }
}

/// Builds a throwaway in-RAM index per call, keyed by document `location`.
#[derive(Debug, Clone, Default)]
pub struct TantivyRanker {
    boosts: FieldBoosts,
}

struct DocFields {
    reference: Field,
    title: Field,
    location: Field,
    text: Field,
}

impl DocFields {
    fn resolve(schema: &Schema) -> Result<Self> {
        Ok(Self {
            reference: schema.get_field(REF_FIELD)?,
            title: schema.get_field(TITLE_FIELD)?,
            location: schema.get_field(LOCATION_FIELD)?,
            text: schema.get_field(TEXT_FIELD)?,
        })
    }
}

impl TantivyRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boosts(boosts: FieldBoosts) -> Self {
        Self { boosts }
    }

    fn build_index(&self, collection: &IndexCollection, fields: &DocFields, schema: Schema) -> Result<Index> {
        let index = Index::create_in_ram(schema);
        register_tokenizer(&index, &collection.config).map_err(|e| Error::Index(e.to_string()))?;
        // One thread and one commit keep a single segment in collection order.
        let mut index_writer: IndexWriter = index.writer_with_num_threads(1, WRITER_HEAP_BYTES)?;
        for d in &collection.docs {
            index_writer.add_document(doc!(
                fields.reference => d.location.clone(),
                fields.title => d.title.clone(),
                fields.location => d.location.clone(),
                fields.text => d.text.clone(),
            ))?;
        }
        index_writer.commit()?;
        Ok(index)
    }

    fn search(&self, collection: &IndexCollection, query: &str) -> Result<Vec<RankedHit>> {
        let schema = build_schema();
        let fields = DocFields::resolve(&schema)?;
        let index = self.build_index(collection, &fields, schema)?;

        let searcher = index.reader()?.searcher();
        let mut query_parser = QueryParser::for_index(&index, vec![fields.title, fields.location, fields.text]);
        query_parser.set_field_boost(fields.title, self.boosts.title);
        query_parser.set_field_boost(fields.location, self.boosts.location);
        query_parser.set_field_boost(fields.text, self.boosts.text);
        let (parsed, errors) = query_parser.parse_query_lenient(query);
        if !errors.is_empty() {
            debug!(?errors, query, "query parsed leniently");
        }

        let mut top_docs = searcher.search(&parsed, &TopDocs::with_limit(collection.docs.len()))?;
        top_docs.sort_by(|(a_score, a), (b_score, b)| {
            b_score
                .total_cmp(a_score)
                .then_with(|| (a.segment_ord, a.doc_id).cmp(&(b.segment_ord, b.doc_id)))
        });

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, addr) in top_docs {
            let doc: TantivyDocument = searcher.doc(addr)?;
            let reference = doc.get_first(fields.reference).and_then(|v| v.as_str()).unwrap_or("").to_string();
            hits.push(RankedHit { reference, score });
        }
        Ok(hits)
    }
}

impl Ranker for TantivyRanker {
    fn rank(&self, collection: &IndexCollection, query: &str) -> Result<Vec<RankedHit>> {
        if collection.docs.is_empty() || query.trim().is_empty() {
            return Ok(vec![]);
        }
        let hits = self.search(collection, query)?;
        debug!(docs = collection.docs.len(), hits = hits.len(), "ranked search index");
        Ok(hits)
    }
}
