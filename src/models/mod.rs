//! Core data models for PubMed searches and article records.

mod article;
mod search;

pub use article::{
    ArticleRecord, ArticleRecordBuilder, AuthorClass, AuthorEntry, AUTHOR_SEPARATOR,
    NOT_AVAILABLE, RECORD_HEADERS,
};
pub use search::{SearchQuery, DEFAULT_MAX_RESULTS};
