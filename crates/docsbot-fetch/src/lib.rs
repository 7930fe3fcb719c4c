//! HTTP retrieval of a prebuilt documentation search index.

use anyhow::Result;
use reqwest::Client;
use tracing::{debug, instrument};

use docsbot_core::config::DocsSettings;
use docsbot_core::error::Error;
use docsbot_core::traits::IndexSource;
use docsbot_core::types::IndexCollection;

/// User-Agent format: `docsbot/{version}`
pub fn user_agent() -> String {
    format!("docsbot/{}", env!("CARGO_PKG_VERSION"))
}

/// One unauthenticated GET per `fetch`, no retry, transport-default timeouts.
#[derive(Debug, Clone)]
pub struct HttpIndexSource {
    client: Client,
    url: String,
}

impl HttpIndexSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent()).build()?;
        Ok(Self::with_client(client, url))
    }

    pub fn from_settings(settings: &DocsSettings) -> Result<Self> {
        Self::new(settings.index_url())
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self { client, url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl IndexSource for HttpIndexSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<IndexCollection> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("{}: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("{} returned {}", self.url, status)).into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Fetch(format!("{}: {}", self.url, e)))?;
        let collection: IndexCollection =
            serde_json::from_slice(&body).map_err(|e| Error::Parse(format!("{}: {}", self.url, e)))?;

        debug!(docs = collection.docs.len(), bytes = body.len(), "fetched search index");
        Ok(collection)
    }
}
