//! PubMed research source implementation using E-utilities API.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::{Config, PubMedConfig};
use crate::models::{ArticleRecord, ArticleRecordBuilder, AuthorEntry, SearchQuery};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

/// PubMed research source
///
/// Uses NCBI E-utilities: esearch for identifiers, then a single batched
/// efetch for the article XML.
#[derive(Debug, Clone)]
pub struct PubMedSource {
    client: Arc<HttpClient>,
    config: PubMedConfig,
}

impl PubMedSource {
    /// Create a new PubMed source against the public NCBI endpoints
    pub fn new() -> Result<Self, SourceError> {
        Self::from_config(&Config::default())
    }

    /// Create a source from application configuration
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        Ok(Self {
            client: Arc::new(HttpClient::from_config(&config.http)?),
            config: config.pubmed.clone(),
        })
    }

    /// Create with a custom HTTP client (for testing)
    pub fn with_client(client: Arc<HttpClient>, config: PubMedConfig) -> Self {
        Self { client, config }
    }

    /// Build E-utilities search URL
    pub fn build_search_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}?db=pubmed&term={}&retmode=json&retmax={}",
            self.config.esearch_url,
            urlencoding::encode(&query.query),
            query.max_results
        )
    }

    /// Build E-utilities fetch URL for specific PubMed IDs
    pub fn build_fetch_url(&self, ids: &[String]) -> String {
        format!(
            "{}?db=pubmed&id={}&retmode=xml",
            self.config.efetch_url,
            ids.join(",")
        )
    }

    /// Extract `esearchresult.idlist` from an esearch JSON body.
    ///
    /// Anything that does not have that shape yields an empty list.
    pub fn parse_search_response(body: &str) -> Vec<String> {
        #[derive(Debug, Deserialize)]
        struct ESearchResponse {
            #[serde(default)]
            esearchresult: Option<ESearchResult>,
        }

        #[derive(Debug, Deserialize)]
        struct ESearchResult {
            #[serde(default)]
            idlist: Vec<String>,
        }

        match serde_json::from_str::<ESearchResponse>(body) {
            Ok(response) => response
                .esearchresult
                .map(|result| result.idlist)
                .unwrap_or_default(),
            Err(e) => {
                tracing::debug!("Unexpected PubMed search payload: {}", e);
                Vec::new()
            }
        }
    }

    /// Parse an efetch XML document into article records.
    ///
    /// Missing elements fall back to the sentinel; a document that is not
    /// well-formed is an error.
    pub fn parse_fetch_response(xml: &str) -> Result<Vec<ArticleRecord>, SourceError> {
        let mut reader = Reader::from_str(xml);
        let mut parser = FetchParser::default();
        let mut buf = Vec::new();

        loop {
            let event = reader.read_event_into(&mut buf).map_err(|e| {
                SourceError::Parse(format!(
                    "Failed to parse PubMed fetch XML at position {}: {}",
                    reader.buffer_position(),
                    e
                ))
            })?;

            match event {
                Event::Start(e) => parser.open(e.local_name().as_ref())?,
                Event::Empty(e) => {
                    parser.open(e.local_name().as_ref())?;
                    parser.close()?;
                }
                Event::End(_) => parser.close()?,
                Event::Text(e) => {
                    let text = e.unescape().map_err(|err| {
                        SourceError::Parse(format!(
                            "Invalid text in PubMed fetch XML at position {}: {}",
                            reader.buffer_position(),
                            err
                        ))
                    })?;
                    parser.text(&text)?;
                }
                Event::CData(e) => parser.text(&String::from_utf8_lossy(&e))?,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        parser.finish()
    }

    /// Run esearch and return at most `query.max_results` identifiers.
    ///
    /// Upstream failures are logged and produce an empty list.
    pub fn search_ids(&self, query: &SearchQuery) -> Vec<String> {
        let url = self.build_search_url(query);
        tracing::debug!("Fetching search results from: {}", url);

        let Some(body) = self.get_text(&url, "Search") else {
            return Vec::new();
        };

        let mut ids = Self::parse_search_response(&body);
        ids.truncate(query.max_results);
        ids
    }

    /// Run a batched efetch for `ids` and extract the records.
    ///
    /// Upstream failures are logged and produce an empty list; malformed XML
    /// is returned as [`SourceError::Parse`].
    pub fn fetch_records(&self, ids: &[String]) -> Result<Vec<ArticleRecord>, SourceError> {
        let url = self.build_fetch_url(ids);
        tracing::debug!("Fetching paper details from: {}", url);

        match self.get_text(&url, "Fetch") {
            Some(xml) => Self::parse_fetch_response(&xml),
            None => Ok(Vec::new()),
        }
    }

    /// GET `url` and return the body, or `None` on any transport or status failure
    fn get_text(&self, url: &str, stage: &str) -> Option<String> {
        let response = match self.client.get(url).send() {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("{} request to PubMed failed: {}", stage, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(
                "{} API failed with status code: {}",
                stage,
                status.as_u16()
            );
            return None;
        }

        match response.text() {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!("Failed to read PubMed {} response: {}", stage, e);
                None
            }
        }
    }
}

impl Source for PubMedSource {
    fn id(&self) -> &str {
        "pubmed"
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<ArticleRecord>, SourceError> {
        let ids = self.search_ids(query);

        if ids.is_empty() {
            tracing::debug!("No PMIDs found.");
            return Ok(Vec::new());
        }

        tracing::debug!(count = ids.len(), "PubMed search returned PMIDs");
        let records = self.fetch_records(&ids)?;
        tracing::debug!(count = records.len(), query = %query.query, "PubMed search complete");

        Ok(records)
    }
}

/// Element whose text content is being collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Pmid,
    Title,
    Year,
    ForeName,
    LastName,
    CollectiveName,
    Affiliation,
    Email,
}

#[derive(Debug)]
struct Capture {
    field: Field,
    depth: usize,
    text: String,
}

#[derive(Debug, Default)]
struct PendingArticle {
    pmid: Option<String>,
    title: Option<String>,
    year: Option<String>,
    authors: Vec<AuthorEntry>,
}

impl PendingArticle {
    fn into_record(self) -> ArticleRecord {
        let mut builder = ArticleRecordBuilder::new();
        if let Some(pmid) = self.pmid {
            builder = builder.pubmed_id(pmid);
        }
        if let Some(title) = self.title {
            builder = builder.title(title);
        }
        if let Some(year) = self.year {
            builder = builder.publication_year(year);
        }

        self.authors
            .iter()
            .fold(builder, |builder, author| {
                builder.author(author.display_name(), author.classify())
            })
            .build()
    }
}

/// Streaming state for one efetch document.
///
/// Article fields take the first matching descendant of `PubmedArticle`;
/// author fields take the first match inside each `Author`.
#[derive(Debug, Default)]
struct FetchParser {
    stack: Vec<Vec<u8>>,
    seen_root: bool,
    article: Option<PendingArticle>,
    author: Option<AuthorEntry>,
    capture: Option<Capture>,
    records: Vec<ArticleRecord>,
}

impl FetchParser {
    fn parent(&self) -> Option<&[u8]> {
        self.stack.last().map(Vec::as_slice)
    }

    fn open(&mut self, name: &[u8]) -> Result<(), SourceError> {
        if self.stack.is_empty() {
            if self.seen_root {
                return Err(SourceError::Parse(
                    "PubMed fetch XML has more than one root element".to_string(),
                ));
            }
            self.seen_root = true;
        }

        match name {
            b"PubmedArticle" if self.article.is_none() => {
                self.article = Some(PendingArticle::default());
            }
            b"Author" if self.article.is_some() && self.author.is_none() => {
                self.author = Some(AuthorEntry::default());
            }
            _ if self.capture.is_none() => {
                if let Some(field) = self.capture_target(name) {
                    self.capture = Some(Capture {
                        field,
                        depth: self.stack.len(),
                        text: String::new(),
                    });
                }
            }
            _ => {}
        }

        self.stack.push(name.to_vec());
        Ok(())
    }

    fn capture_target(&self, name: &[u8]) -> Option<Field> {
        let article = self.article.as_ref()?;
        let parent = self.parent();

        if let Some(author) = &self.author {
            let field = match (name, parent) {
                (b"ForeName", Some(b"Author")) if author.first_name.is_none() => Field::ForeName,
                (b"LastName", Some(b"Author")) if author.last_name.is_none() => Field::LastName,
                (b"CollectiveName", Some(b"Author")) if author.collective_name.is_none() => {
                    Field::CollectiveName
                }
                (b"Affiliation", Some(b"AffiliationInfo")) if author.affiliation.is_none() => {
                    Field::Affiliation
                }
                (b"Email", _) if author.email.is_none() => Field::Email,
                _ => return None,
            };
            return Some(field);
        }

        match (name, parent) {
            (b"PMID", _) if article.pmid.is_none() => Some(Field::Pmid),
            (b"ArticleTitle", _) if article.title.is_none() => Some(Field::Title),
            (b"Year", Some(b"PubDate")) if article.year.is_none() => Some(Field::Year),
            _ => None,
        }
    }

    fn close(&mut self) -> Result<(), SourceError> {
        let name = self.stack.pop().ok_or_else(|| {
            SourceError::Parse("PubMed fetch XML has an unmatched end tag".to_string())
        })?;

        if matches!(&self.capture, Some(c) if c.depth == self.stack.len()) {
            if let Some(capture) = self.capture.take() {
                self.commit(capture);
            }
        }

        match name.as_slice() {
            b"Author" => {
                if let (Some(author), Some(article)) = (self.author.take(), self.article.as_mut()) {
                    article.authors.push(author);
                }
            }
            b"PubmedArticle" => {
                if let Some(article) = self.article.take() {
                    self.records.push(article.into_record());
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), SourceError> {
        if self.stack.is_empty() {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(SourceError::Parse(
                "PubMed fetch XML has text outside the root element".to_string(),
            ));
        }

        if let Some(capture) = self.capture.as_mut() {
            capture.text.push_str(text);
        }
        Ok(())
    }

    fn commit(&mut self, capture: Capture) {
        let value = capture.text.trim().to_string();

        match capture.field {
            Field::Pmid | Field::Title | Field::Year => {
                if let Some(article) = self.article.as_mut() {
                    let slot = match capture.field {
                        Field::Pmid => &mut article.pmid,
                        Field::Title => &mut article.title,
                        _ => &mut article.year,
                    };
                    *slot = Some(value);
                }
            }
            _ => {
                if let Some(author) = self.author.as_mut() {
                    let slot = match capture.field {
                        Field::ForeName => &mut author.first_name,
                        Field::LastName => &mut author.last_name,
                        Field::CollectiveName => &mut author.collective_name,
                        Field::Affiliation => &mut author.affiliation,
                        _ => &mut author.email,
                    };
                    *slot = Some(value);
                }
            }
        }
    }

    fn finish(self) -> Result<Vec<ArticleRecord>, SourceError> {
        if !self.seen_root {
            return Err(SourceError::Parse(
                "PubMed fetch XML contains no root element".to_string(),
            ));
        }
        if let Some(open) = self.stack.last() {
            return Err(SourceError::Parse(format!(
                "PubMed fetch XML ended inside <{}>",
                String::from_utf8_lossy(open)
            )));
        }
        Ok(self.records)
    }
}
