//! Mock source for testing purposes.

use std::sync::Mutex;

use crate::models::{ArticleRecord, ArticleRecordBuilder, AuthorClass, SearchQuery};
use crate::sources::{Source, SourceError};

/// A mock source that returns predefined records.
#[derive(Debug, Default)]
pub struct MockSource {
    records: Mutex<Vec<ArticleRecord>>,
    queries: Mutex<Vec<String>>,
}

impl MockSource {
    /// Create a new mock source with no records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source that returns the given records.
    pub fn with_records(records: Vec<ArticleRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Queries received so far, oldest first.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl Source for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<ArticleRecord>, SourceError> {
        self.queries.lock().unwrap().push(query.query.clone());
        Ok(self.records.lock().unwrap().clone())
    }
}

/// Helper function to create a record for testing.
pub fn make_record(pubmed_id: &str, title: &str, authors: &[(&str, AuthorClass)]) -> ArticleRecord {
    authors
        .iter()
        .fold(
            ArticleRecordBuilder::new()
                .pubmed_id(pubmed_id)
                .title(title)
                .publication_year("2024"),
            |builder, (name, class)| builder.author(*name, *class),
        )
        .build()
}
