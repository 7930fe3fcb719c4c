use html_escape::decode_html_entities;
use tracing::debug;

use docsbot_core::config::DocsSettings;
use docsbot_core::excerpt::extract_excerpt;
use docsbot_core::markup::normalize_markup;
use docsbot_core::types::{Embed, EmbedField, EmbedFooter, IndexCollection, RankedHit, RenderedDocument, Reply};

pub const NO_RESULTS_MESSAGE: &str = "Could not find any matching documents. Try a simpler query.";
pub const DESCRIPTION_SUFFIX: &str = " ...";

/// Re-attach ranked references to their documents, normalize markup and drop
/// documents whose text ends up empty. A reference with no document renders
/// empty and is dropped with them.
pub fn render_hits(collection: &IndexCollection, hits: &[RankedHit]) -> Vec<RenderedDocument> {
    hits.iter()
        .map(|hit| match collection.find(&hit.reference) {
            Some(doc) => RenderedDocument {
                location: doc.location.clone(),
                title: normalize_markup(&doc.title),
                text: normalize_markup(&doc.text),
            },
            None => {
                debug!(reference = %hit.reference, "ranked reference missing from collection");
                RenderedDocument::default()
            }
        })
        .filter(|doc| !doc.text.is_empty())
        .collect()
}

/// Primary result with an entity-decoded excerpt, followed by link-only
/// secondary results. Plain text when nothing survives rendering.
pub fn compose_reply(collection: &IndexCollection, hits: &[RankedHit], settings: &DocsSettings) -> Reply {
    let mut rendered = render_hits(collection, hits).into_iter();
    let Some(primary) = rendered.next() else {
        return Reply::Text(NO_RESULTS_MESSAGE.to_string());
    };

    let excerpt = extract_excerpt(&primary.text, settings.excerpt_probe_chars);
    let description = format!("{}{}", decode_html_entities(&excerpt), DESCRIPTION_SUFFIX);

    let fields: Vec<EmbedField> = rendered
        .filter(|doc| !doc.text.is_empty())
        .take(settings.max_secondary)
        .map(|doc| EmbedField::link(doc.title, &settings.doc_url(&doc.location)))
        .collect();

    Reply::Embed(Embed {
        title: primary.title,
        url: settings.doc_url(&primary.location),
        description,
        fields,
        footer: Some(EmbedFooter { text: settings.footer_text.clone() }),
    })
}
