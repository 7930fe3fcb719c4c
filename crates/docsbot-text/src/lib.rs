//! docsbot-text
//!
//! Tantivy-backed ranking of a fetched documentation index. Every `rank` call
//! builds a fresh in-RAM index, runs one query and drops it.

pub mod index;
pub mod tantivy_utils;
pub mod tokenizer;

pub use index::{FieldBoosts, TantivyRanker};
pub use tokenizer::SeparatorTokenizer;
