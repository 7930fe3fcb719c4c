use tantivy::schema::{IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED, STRING};
use tantivy::tokenizer::{Language, LowerCaser, RemoveLongFilter, Stemmer, StopWordFilter, TextAnalyzer};
use tantivy::Index;
use tracing::{debug, warn};

use docsbot_core::types::IndexConfig;

use crate::tokenizer::SeparatorTokenizer;

pub const DOCS_TOKENIZER: &str = "docs";
pub const REF_FIELD: &str = "ref";
pub const TITLE_FIELD: &str = "title";
pub const LOCATION_FIELD: &str = "location";
pub const TEXT_FIELD: &str = "text";

const FALLBACK_SEPARATOR: &str = r"[\s\-]+";
const MAX_TOKEN_BYTES: usize = 40;

pub fn build_schema() -> Schema {
    let mut schema_builder = Schema::builder();
    schema_builder.add_text_field(REF_FIELD, STRING | STORED);
    let indexing = TextFieldIndexing::default()
        .set_tokenizer(DOCS_TOKENIZER)
        .set_index_option(IndexRecordOption::WithFreqsAndPositions);
    let text_options = TextOptions::default().set_indexing_options(indexing);
    schema_builder.add_text_field(TITLE_FIELD, text_options.clone());
    schema_builder.add_text_field(LOCATION_FIELD, text_options.clone());
    schema_builder.add_text_field(TEXT_FIELD, text_options);
    schema_builder.build()
}

/// Pipeline stages understood from the published index config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipeline {
    pub stop_words: bool,
    pub stemmer: bool,
}

impl Pipeline {
    pub fn from_stages(stages: &[String]) -> Self {
        let mut pipeline = Self { stop_words: false, stemmer: false };
        for stage in stages {
            match stage.as_str() {
                "stopWordFilter" => pipeline.stop_words = true,
                "stemmer" => pipeline.stemmer = true,
                // always applied by the tokenizer
                "trimmer" => {}
                other => debug!(stage = other, "ignoring unknown pipeline stage"),
            }
        }
        pipeline
    }
}

/// First language code tantivy has stop words and a stemmer for; English otherwise.
pub fn language_for(codes: &[String]) -> Language {
    codes
        .iter()
        .find_map(|code| language_from_code(code))
        .unwrap_or(Language::English)
}

fn language_from_code(code: &str) -> Option<Language> {
    let language = match code.to_ascii_lowercase().as_str() {
        "ar" => Language::Arabic,
        "da" => Language::Danish,
        "nl" => Language::Dutch,
        "en" => Language::English,
        "fi" => Language::Finnish,
        "fr" => Language::French,
        "de" => Language::German,
        "el" => Language::Greek,
        "hu" => Language::Hungarian,
        "it" => Language::Italian,
        "no" => Language::Norwegian,
        "pt" => Language::Portuguese,
        "ro" => Language::Romanian,
        "ru" => Language::Russian,
        "es" => Language::Spanish,
        "sv" => Language::Swedish,
        "ta" => Language::Tamil,
        "tr" => Language::Turkish,
        _ => return None,
    };
    Some(language)
}

pub fn build_analyzer(config: &IndexConfig) -> Result<TextAnalyzer, regex::Error> {
    let tokenizer = match SeparatorTokenizer::new(&config.separator) {
        Ok(tokenizer) => tokenizer,
        Err(err) => {
            warn!(separator = %config.separator, error = %err, "unusable separator, falling back to whitespace and hyphens");
            SeparatorTokenizer::new(FALLBACK_SEPARATOR)?
        }
    };
    let pipeline = Pipeline::from_stages(&config.pipeline);
    let language = language_for(&config.lang);

    let mut builder = TextAnalyzer::builder(tokenizer)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_BYTES))
        .filter(LowerCaser)
        .dynamic();
    if pipeline.stop_words {
        match StopWordFilter::new(language) {
            Some(filter) => builder = builder.filter_dynamic(filter),
            None => debug!(?language, "no stop word list for language"),
        }
    }
    if pipeline.stemmer {
        builder = builder.filter_dynamic(Stemmer::new(language));
    }
    Ok(builder.build())
}

pub fn register_tokenizer(index: &Index, config: &IndexConfig) -> Result<(), regex::Error> {
    index.tokenizers().register(DOCS_TOKENIZER, build_analyzer(config)?);
    Ok(())
}
