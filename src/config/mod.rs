//! Configuration management.
//!
//! Every setting has a default, so a configuration file is optional. When one
//! is supplied it is layered with `PUBMED_AFFILIATIONS_*` environment
//! overrides (sections separated by `__`, e.g.
//! `PUBMED_AFFILIATIONS_PUBMED__MAX_RESULTS=5`).
//!
//! ```toml
//! [pubmed]
//! esearch_url = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi"
//! efetch_url = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi"
//! max_results = 10
//!
//! [http]
//! user_agent = "pubmed-affiliations/0.1.0"
//! timeout_secs = 30
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::DEFAULT_MAX_RESULTS;

/// E-utilities search endpoint
pub const PUBMED_ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";

/// E-utilities fetch endpoint
pub const PUBMED_EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "PUBMED_AFFILIATIONS";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// PubMed endpoint settings
    #[serde(default)]
    pub pubmed: PubMedConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

/// PubMed E-utilities settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubMedConfig {
    #[serde(default = "default_esearch_url")]
    pub esearch_url: String,

    #[serde(default = "default_efetch_url")]
    pub efetch_url: String,

    /// Identifiers requested per search; values above 10 are clamped
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            esearch_url: default_esearch_url(),
            efetch_url: default_efetch_url(),
            max_results: default_max_results(),
        }
    }
}

fn default_esearch_url() -> String {
    PUBMED_ESEARCH_URL.to_string()
}

fn default_efetch_url() -> String {
    PUBMED_EFETCH_URL.to_string()
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout; unset leaves the client default in place
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Load configuration from a file, with environment overrides on top
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}
