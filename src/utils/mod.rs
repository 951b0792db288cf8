//! Utility modules supporting the search pipeline.
//!
//! - [`classify`]: Keyword heuristic deciding whether an author is non-academic
//! - [`HttpClient`]: Blocking HTTP client built from configuration
//! - [`report`]: Print records or save them as CSV
//!
//! # Classification
//!
//! ```rust
//! use pubmed_affiliations::models::AuthorClass;
//! use pubmed_affiliations::utils::classify;
//!
//! assert_eq!(classify("", "jane@pharma.com"), AuthorClass::NonAcademic);
//! assert_eq!(classify("Stanford University", "jane@biotech.com"), AuthorClass::Academic);
//! ```

mod affiliation;
mod http;
mod report;

pub use affiliation::{
    classify, is_non_academic, ACADEMIC_KEYWORDS, NON_ACADEMIC_EMAIL_DOMAINS,
    NON_ACADEMIC_KEYWORDS,
};
pub use http::HttpClient;
pub use report::{
    print_records, read_csv, report, save_to_csv, write_csv, ReportOutcome, NO_RESULTS_MESSAGE,
};
