//! Article record model produced by the PubMed extractor.

use serde::{Deserialize, Serialize};

/// Placeholder for any field that is not present in the source record
pub const NOT_AVAILABLE: &str = "N/A";

/// Separator used when flattening author name lists into a single field
pub const AUTHOR_SEPARATOR: &str = ", ";

/// Column names, in output order
pub const RECORD_HEADERS: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Academic Author(s)",
    "Corresponding Author Email",
];

/// Which bucket an author falls into after affiliation classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorClass {
    /// Affiliation or email points at industry
    NonAcademic,
    /// Academic affiliation, or nothing conclusive
    Academic,
}

impl AuthorClass {
    /// Returns true for [`AuthorClass::NonAcademic`]
    pub fn is_non_academic(self) -> bool {
        matches!(self, AuthorClass::NonAcademic)
    }
}

impl std::fmt::Display for AuthorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthorClass::NonAcademic => write!(f, "non-academic"),
            AuthorClass::Academic => write!(f, "academic"),
        }
    }
}

/// A single author as read from an article, before classification.
///
/// `None` means the element was absent from the record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorEntry {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub collective_name: Option<String>,
    pub affiliation: Option<String>,
    pub email: Option<String>,
}

impl AuthorEntry {
    /// Affiliation text, empty when absent
    pub fn affiliation(&self) -> &str {
        self.affiliation.as_deref().unwrap_or_default()
    }

    /// Email text, empty when absent
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    /// Classify this author from affiliation and email
    pub fn classify(&self) -> AuthorClass {
        crate::utils::classify(self.affiliation(), self.email())
    }

    /// Display name as "First Last", with missing parts replaced by the sentinel.
    ///
    /// Group authors that carry only a collective name are shown under that name.
    pub fn display_name(&self) -> String {
        if self.first_name.is_none() && self.last_name.is_none() {
            if let Some(collective) = &self.collective_name {
                return collective.clone();
            }
        }

        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(NOT_AVAILABLE),
            self.last_name.as_deref().unwrap_or(NOT_AVAILABLE)
        )
    }
}

/// One article in the report.
///
/// Serialized field names double as the CSV header and the keys of the
/// console output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// PubMed identifier
    #[serde(rename = "PubmedID")]
    pub pubmed_id: String,

    /// Article title
    #[serde(rename = "Title")]
    pub title: String,

    /// Four-digit publication year
    #[serde(rename = "Publication Date")]
    pub publication_year: String,

    /// Authors classified as non-academic (comma-separated)
    #[serde(rename = "Non-academic Author(s)")]
    pub non_academic_authors: String,

    /// Authors classified as academic or unknown (comma-separated)
    #[serde(rename = "Academic Author(s)")]
    pub academic_authors: String,

    /// Corresponding author email; never populated from PubMed XML
    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_email: String,
}

impl ArticleRecord {
    /// Record with every field set to the sentinel and no authors
    pub fn empty() -> Self {
        Self {
            pubmed_id: NOT_AVAILABLE.to_string(),
            title: NOT_AVAILABLE.to_string(),
            publication_year: NOT_AVAILABLE.to_string(),
            non_academic_authors: String::new(),
            academic_authors: String::new(),
            corresponding_email: NOT_AVAILABLE.to_string(),
        }
    }

    /// Field values in [`RECORD_HEADERS`] order
    pub fn fields(&self) -> [&str; 6] {
        [
            &self.pubmed_id,
            &self.title,
            &self.publication_year,
            &self.non_academic_authors,
            &self.academic_authors,
            &self.corresponding_email,
        ]
    }
}

/// Builder for [`ArticleRecord`].
///
/// Authors are added one at a time together with their classification and the
/// two name lists are flattened on [`ArticleRecordBuilder::build`].
#[derive(Debug, Default)]
pub struct ArticleRecordBuilder {
    pubmed_id: Option<String>,
    title: Option<String>,
    publication_year: Option<String>,
    non_academic: Vec<String>,
    academic: Vec<String>,
}

impl ArticleRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pubmed_id(mut self, id: impl Into<String>) -> Self {
        self.pubmed_id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn publication_year(mut self, year: impl Into<String>) -> Self {
        self.publication_year = Some(year.into());
        self
    }

    /// Add an author to the list matching its classification
    pub fn author(mut self, name: impl Into<String>, class: AuthorClass) -> Self {
        match class {
            AuthorClass::NonAcademic => self.non_academic.push(name.into()),
            AuthorClass::Academic => self.academic.push(name.into()),
        }
        self
    }

    pub fn build(self) -> ArticleRecord {
        ArticleRecord {
            pubmed_id: self
                .pubmed_id
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            title: self.title.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            publication_year: self
                .publication_year
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            non_academic_authors: self.non_academic.join(AUTHOR_SEPARATOR),
            academic_authors: self.academic.join(AUTHOR_SEPARATOR),
            corresponding_email: NOT_AVAILABLE.to_string(),
        }
    }
}
