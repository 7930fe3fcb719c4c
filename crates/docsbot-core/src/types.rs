//! Domain types shared by the fetcher, the ranker and the reply composer.

use serde::{Deserialize, Serialize};

/// Reference key of a ranked hit; the `location` of a [`DocumentRecord`].
pub type DocRef = String;

/// One page (or page section) of the documentation search index.
///
/// - `location`: unique within one fetched collection; URL path suffix under the docs base URL
/// - `title`/`text`: may carry the restricted markup subset handled by [`crate::markup`]
///
/// Missing fields deserialize to the empty string so a single malformed entry
/// never rejects the whole index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentRecord {
    pub location: DocRef,
    pub title: String,
    pub text: String,
}

/// Tokenization settings published alongside the documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub lang: Vec<String>,
    pub separator: String,
    pub pipeline: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            lang: vec!["en".to_string()],
            separator: r"[\s\-]+".to_string(),
            pipeline: vec!["stopWordFilter".to_string()],
        }
    }
}

/// Everything returned by one fetch. Built per query and dropped after the reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexCollection {
    #[serde(default)]
    pub config: IndexConfig,
    pub docs: Vec<DocumentRecord>,
}

impl IndexCollection {
    /// First document whose `location` equals `reference`.
    pub fn find(&self, reference: &str) -> Option<&DocumentRecord> {
        self.docs.iter().find(|d| d.location == reference)
    }
}

/// A ranked reference. `score` is engine-specific, higher is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedHit {
    pub reference: DocRef,
    pub score: f32,
}

/// A [`DocumentRecord`] whose title and text went through markup normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub location: DocRef,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    /// An inline field whose value is a markdown `[Link](url)`.
    pub fn link(name: impl Into<String>, url: &str) -> Self {
        Self { name: name.into(), value: format!("[Link]({url})"), inline: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub url: String,
    pub description: String,
    pub fields: Vec<EmbedField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

/// What a search hands back to the caller: a plain message or one embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    Text(String),
    Embed(Embed),
}

impl Reply {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text(text) => Some(text),
            Reply::Embed(_) => None,
        }
    }

    pub fn as_embed(&self) -> Option<&Embed> {
        match self {
            Reply::Embed(embed) => Some(embed),
            Reply::Text(_) => None,
        }
    }
}
