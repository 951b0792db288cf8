//! # PubMed Affiliations
//!
//! Searches PubMed and reports, for each matching article, which authors look
//! like they work in industry and which look academic.
//!
//! ## Architecture
//!
//! The pipeline is strictly sequential:
//! build request → esearch → efetch → extract and classify → report.
//!
//! - [`models`]: Article records and search queries
//! - [`sources`]: The PubMed E-utilities client behind the [`Source`] trait
//! - [`utils`]: Affiliation classifier, HTTP client and report output
//! - [`config`]: Configuration management

pub mod config;
pub mod models;
pub mod sources;
pub mod utils;

use std::io::Write;
use std::path::Path;

// Re-export commonly used types
pub use models::{ArticleRecord, SearchQuery};
pub use sources::{PubMedSource, Source, SourceError};
pub use utils::ReportOutcome;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Search `source` and report the results.
///
/// Records are saved to `file` as CSV when a path is given, otherwise printed
/// to `out`. An empty result prints the "no results" message and writes no
/// file.
pub fn run<W: Write>(
    source: &dyn Source,
    query: &SearchQuery,
    file: Option<&Path>,
    out: &mut W,
) -> Result<ReportOutcome, SourceError> {
    tracing::debug!(source = source.id(), query = %query.query, "Running search");
    let records = source.search(query)?;
    utils::report(&records, file, out)
}
