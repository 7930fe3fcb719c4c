use std::sync::atomic::{AtomicUsize, Ordering};

use docsbot_core::config::DocsSettings;
use docsbot_core::error::Error;
use docsbot_core::traits::IndexSource;
use docsbot_core::types::{DocumentRecord, IndexCollection, IndexConfig, RankedHit, Reply};
use docsbot_fetch::HttpIndexSource;
use docsbot_reply::{compose_reply, DocsSearch, Invocation, NO_RESULTS_MESSAGE};
use docsbot_text::TantivyRanker;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct FakeSource {
    collection: IndexCollection,
    calls: AtomicUsize,
}

impl FakeSource {
    fn new(docs: Vec<DocumentRecord>) -> Self {
        Self { collection: IndexCollection { config: IndexConfig::default(), docs }, calls: AtomicUsize::new(0) }
    }
}

impl IndexSource for &FakeSource {
    async fn fetch(&self) -> anyhow::Result<IndexCollection> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.collection.clone())
    }
}

struct FailingSource;

impl IndexSource for FailingSource {
    async fn fetch(&self) -> anyhow::Result<IndexCollection> {
        Err(Error::Fetch("connection refused".into()).into())
    }
}

fn record(location: &str, title: &str, text: &str) -> DocumentRecord {
    DocumentRecord { location: location.into(), title: title.into(), text: text.into() }
}

fn search(source: &FakeSource) -> DocsSearch<&FakeSource, TantivyRanker> {
    DocsSearch::new(source, TantivyRanker::new(), DocsSettings::default())
}

#[tokio::test]
async fn empty_query_returns_landing_embed_without_fetching() {
    let source = FakeSource::new(vec![record("faq", "FAQ", "<p>Answer text</p>")]);
    let docs = search(&source);

    for query in [None, Some(""), Some("   ")] {
        let reply = docs.search(query).await.expect("landing");
        let embed = reply.as_embed().expect("embed");
        assert_eq!(embed.title, "Fosscord Documentation");
        assert_eq!(embed.url, "https://docs.fosscord.com");
        assert_eq!(embed.fields.len(), 6);
        assert_eq!(embed.fields[0].name, "FAQ");
        assert_eq!(embed.fields[0].value, "[Link](https://docs.fosscord.com/faq)");
        assert!(embed.fields.iter().all(|f| f.inline));
        assert_eq!(reply, docs.search(None).await.expect("landing"));
    }
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn single_faq_document_becomes_primary() {
    let source = FakeSource::new(vec![record("faq", "FAQ", "<p>Answer text</p>")]);
    let reply = search(&source).search(Some("answer")).await.expect("search");

    let embed = reply.as_embed().expect("embed");
    assert_eq!(embed.title, "FAQ");
    assert_eq!(embed.url, "https://docs.fosscord.com/faq");
    assert_eq!(embed.description, "Answer text\n\n ...");
    assert!(embed.fields.is_empty());
    assert_eq!(embed.footer.as_ref().map(|f| f.text.as_str()), Some("https://docs.fosscord.com"));
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn no_match_is_plain_text() {
    let source = FakeSource::new(vec![record("faq", "FAQ", "<p>Answer text</p>")]);
    let reply = search(&source).search(Some("kubernetes")).await.expect("search");
    assert_eq!(reply.as_text(), Some(NO_RESULTS_MESSAGE));
}

#[tokio::test]
async fn matches_with_only_empty_text_are_plain_text() {
    let source = FakeSource::new(vec![record("setup/", "Setup", "")]);
    let reply = search(&source).search(Some("setup")).await.expect("search");
    assert!(reply.as_text().is_some());
}

#[tokio::test]
async fn secondary_links_are_capped_and_point_at_locations() {
    let docs = (0..10)
        .map(|i| record(&format!("server/page{i}"), &format!("Server page {i}"), "<p>server notes</p>"))
        .collect();
    let source = FakeSource::new(docs);
    let reply = search(&source).search(Some("server")).await.expect("search");

    let embed = reply.as_embed().expect("embed");
    assert_eq!(embed.fields.len(), 4);
    for field in &embed.fields {
        let location = field.name.replace("Server page ", "server/page");
        assert_eq!(field.value, format!("[Link](https://docs.fosscord.com/{location})"));
        assert!(field.inline);
    }
    assert!(!embed.fields.iter().any(|f| embed.url.ends_with(&f.name.replace("Server page ", "server/page"))));
}

#[tokio::test]
async fn empty_text_documents_never_become_links() {
    let source = FakeSource::new(vec![
        record("install", "Install", "<p>install the server</p>"),
        record("install/empty", "Install (empty)", ""),
        record("install/docker", "Install with docker", "<p>docker install</p>"),
    ]);
    let reply = search(&source).search(Some("install")).await.expect("search");

    let embed = reply.as_embed().expect("embed");
    let names: Vec<&str> = embed.fields.iter().map(|f| f.name.as_str()).collect();
    assert!(!names.contains(&"Install (empty)"));
    assert_eq!(names.len(), 1);
}

#[tokio::test]
async fn fetch_failures_propagate() {
    let docs = DocsSearch::new(FailingSource, TantivyRanker::new(), DocsSettings::default());
    let err = docs.search(Some("answer")).await.expect_err("fetch error");
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Fetch(_))));

    assert!(docs.search(None).await.is_ok());
}

#[tokio::test]
async fn plain_text_invocation_joins_words() {
    let source = FakeSource::new(vec![record("setup/server/reverseProxy", "Reverse Proxies", "<p>Use nginx as a reverse proxy.</p>")]);
    let docs = search(&source);
    let reply = docs
        .handle(&Invocation::Text { args: vec!["reverse".into(), "proxy".into()] })
        .await
        .expect("search");
    assert_eq!(reply.as_embed().map(|e| e.title.as_str()), Some("Reverse Proxies"));

    let landing = docs.handle(&Invocation::Interaction { query: None }).await.expect("landing");
    assert_eq!(landing.as_embed().map(|e| e.fields.len()), Some(6));
}

#[test]
fn description_is_decoded_and_title_is_not() {
    let collection = IndexCollection {
        config: IndexConfig::default(),
        docs: vec![record("api", "<code>Tom &amp; Jerry</code>", "<p>a &amp; b &lt;tag&gt;</p>")],
    };
    let hits = vec![RankedHit { reference: "api".into(), score: 1.0 }];
    let reply = compose_reply(&collection, &hits, &DocsSettings::default());

    let embed = reply.as_embed().expect("embed");
    assert_eq!(embed.title, "`Tom &amp; Jerry`");
    assert_eq!(embed.description, "a & b <tag>\n\n ...");
}

#[test]
fn description_keeps_code_fence_closed() {
    let text = format!("<p>{}</p><pre><code>{}</code></pre><p>{}</p>", "a".repeat(280), "x".repeat(40), "after ".repeat(30));
    let collection = IndexCollection { config: IndexConfig::default(), docs: vec![record("code", "Code", &text)] };
    let hits = vec![RankedHit { reference: "code".into(), score: 1.0 }];
    let reply = compose_reply(&collection, &hits, &DocsSettings::default());

    let description = &reply.as_embed().expect("embed").description;
    assert!(description.ends_with(&format!("{}``` ...", "x".repeat(40))));
    assert_eq!(description.matches("```").count(), 2);
}

#[test]
fn unknown_references_are_skipped() {
    let collection = IndexCollection {
        config: IndexConfig::default(),
        docs: vec![record("faq", "FAQ", "<p>Answer</p>")],
    };
    let hits = vec![
        RankedHit { reference: "ghost".into(), score: 2.0 },
        RankedHit { reference: "faq".into(), score: 1.0 },
    ];
    let reply = compose_reply(&collection, &hits, &DocsSettings::default());
    assert_eq!(reply.as_embed().map(|e| e.title.as_str()), Some("FAQ"));

    let only_ghost = vec![RankedHit { reference: "ghost".into(), score: 2.0 }];
    assert!(compose_reply(&collection, &only_ghost, &DocsSettings::default()).as_text().is_some());
}

#[test]
fn reply_serializes_as_message_payload() {
    let text = serde_json::to_value(Reply::Text(NO_RESULTS_MESSAGE.into())).expect("json");
    assert_eq!(text, serde_json::json!(NO_RESULTS_MESSAGE));

    let landing = serde_json::to_value(docsbot_reply::landing_reply(&DocsSettings::default())).expect("json");
    assert_eq!(landing["fields"].as_array().map(Vec::len), Some(6));
    assert!(landing.get("footer").is_none());
}

#[tokio::test]
async fn searches_live_index_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/search_index.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "config": {"lang": ["en"], "separator": "[\\s\\-]+", "pipeline": ["stopWordFilter"]},
            "docs": [
                {"location": "faq", "title": "FAQ", "text": "<p>Answer text</p>"},
                {"location": "contributing", "title": "Contributing", "text": "<p>Send a pull request.</p>"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = DocsSettings { base_url: server.uri(), ..DocsSettings::default() };
    let source = HttpIndexSource::from_settings(&settings).expect("client");
    let docs = DocsSearch::new(source, TantivyRanker::new(), settings.clone());

    let reply = docs.search(Some("answer")).await.expect("search");
    let embed = reply.as_embed().expect("embed");
    assert_eq!(embed.url, format!("{}/faq", server.uri()));
    assert!(embed.description.ends_with(" ..."));
}
