use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Network failure or non-2xx status while retrieving the search index.
    #[error("Failed to fetch search index: {0}")]
    Fetch(String),

    /// The response body is not a search index.
    #[error("Failed to parse search index: {0}")]
    Parse(String),

    #[error("Search index failed: {0}")]
    Index(String),
}

pub type Result<T> = std::result::Result<T, Error>;
