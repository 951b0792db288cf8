//! Literature sources.
//!
//! A [`Source`] turns a [`SearchQuery`] into fully extracted
//! [`ArticleRecord`]s. [`PubMedSource`] talks to NCBI E-utilities;
//! [`MockSource`] returns canned records and is used to exercise the
//! reporting path without the network.

pub mod mock;
mod pubmed;

pub use mock::MockSource;
pub use pubmed::PubMedSource;

use crate::models::{ArticleRecord, SearchQuery};

/// Interface shared by all literature sources.
pub trait Source: std::fmt::Debug {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Search for articles matching the query.
    ///
    /// Recoverable upstream failures (non-success status, transport errors)
    /// yield `Ok` with an empty list. Errors are reserved for responses that
    /// cannot be interpreted at all.
    fn search(&self, query: &SearchQuery) -> Result<Vec<ArticleRecord>, SourceError>;
}

/// Errors that can occur when searching a source or reporting its results
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (XML, JSON)
    #[error("Parse error: {0}")]
    Parse(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

impl From<quick_xml::Error> for SourceError {
    fn from(err: quick_xml::Error) -> Self {
        SourceError::Parse(format!("XML: {}", err))
    }
}
