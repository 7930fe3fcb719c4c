//! Layered configuration loader.
//!
//! Uses Figment to merge compiled defaults + `config.toml` + `config.<env>.toml`
//! + `DOCSBOT_*` env vars (`__` separates nested keys, e.g. `DOCSBOT_DOCS__BASE_URL`).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::Error;

pub const DEFAULT_BASE_URL: &str = "https://docs.fosscord.com";
pub const SEARCH_INDEX_PATH: &str = "/search/search_index.json";
pub const EXCERPT_PROBE_CHARS: usize = 300;
pub const MAX_SECONDARY_RESULTS: usize = 4;

/// Chat embeds reject more fields than this.
const MAX_EMBED_FIELDS: usize = 25;

/// Where the documentation lives and how replies are shaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsSettings {
    pub base_url: String,
    pub search_path: String,
    pub excerpt_probe_chars: usize,
    pub max_secondary: usize,
    pub footer_text: String,
}

impl Default for DocsSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_path: SEARCH_INDEX_PATH.to_string(),
            excerpt_probe_chars: EXCERPT_PROBE_CHARS,
            max_secondary: MAX_SECONDARY_RESULTS,
            footer_text: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl DocsSettings {
    /// Full URL of the prebuilt search index.
    pub fn index_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.search_path)
    }

    /// Public URL of a document, `<base-url>/<location>`.
    pub fn doc_url(&self, location: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), location)
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::InvalidConfig(format!(
                "docs.base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if !self.search_path.starts_with('/') {
            return Err(Error::InvalidConfig(format!(
                "docs.search_path must start with '/', got '{}'",
                self.search_path
            )));
        }
        if self.excerpt_probe_chars == 0 {
            return Err(Error::InvalidConfig("docs.excerpt_probe_chars must be positive".into()));
        }
        if self.max_secondary > MAX_EMBED_FIELDS {
            return Err(Error::InvalidConfig(format!(
                "docs.max_secondary must be at most {MAX_EMBED_FIELDS}, got {}",
                self.max_secondary
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { filter: "info".to_string() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub docs: DocsSettings,
    pub log: LogSettings,
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("DOCSBOT_").split("__"));

        let config = Self { figment };
        config.validate_for_env(&env_name)?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()).into())
    }

    fn validate_for_env(&self, env: &str) -> anyhow::Result<()> {
        let settings = self.settings()?;
        settings.docs.validate()?;
        match env {
            "prod" | "production" if !settings.docs.base_url.starts_with("https://") => {
                Err(Error::InvalidConfig("docs.base_url must use https in production".into()).into())
            }
            _ => Ok(()),
        }
    }
}
