//! Integration tests for the PubMed search pipeline.
//!
//! A mockito server stands in for the E-utilities endpoints.

use mockito::{Matcher, Server, ServerGuard};
use pubmed_affiliations::config::{Config, HttpConfig, PubMedConfig};
use pubmed_affiliations::models::{SearchQuery, NOT_AVAILABLE};
use pubmed_affiliations::sources::{PubMedSource, Source, SourceError};
use pubmed_affiliations::utils::{read_csv, HttpClient, NO_RESULTS_MESSAGE};
use pubmed_affiliations::{run, ReportOutcome};
use std::sync::Arc;

const FETCH_XML: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation Status="PubMed-not-MEDLINE" Owner="NLM">
      <PMID Version="1">123</PMID>
      <Article PubModel="Electronic">
        <Journal>
          <JournalIssue CitedMedium="Internet">
            <PubDate><Year>2022</Year></PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>mRNA vaccine stability at room temperature.</ArticleTitle>
        <AuthorList CompleteYN="Y">
          <Author ValidYN="Y">
            <LastName>Okafor</LastName>
            <ForeName>Chidi</ForeName>
            <AffiliationInfo><Affiliation>Moderna Biotech, Cambridge, MA, USA.</Affiliation></AffiliationInfo>
          </Author>
          <Author ValidYN="Y">
            <LastName>Novak</LastName>
            <ForeName>Petra</ForeName>
            <AffiliationInfo><Affiliation>Charles University, Prague, Czech Republic.</Affiliation></AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">456</PMID>
      <Article PubModel="Print">
        <ArticleTitle>Lipid nanoparticles, a review.</ArticleTitle>
        <AuthorList CompleteYN="Y">
          <Author ValidYN="Y">
            <LastName>Haddad</LastName>
            <ForeName>Rami</ForeName>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

fn source_for(server: &ServerGuard) -> PubMedSource {
    let config = Config {
        pubmed: PubMedConfig {
            esearch_url: format!("{}/esearch.fcgi", server.url()),
            efetch_url: format!("{}/efetch.fcgi", server.url()),
            ..PubMedConfig::default()
        },
        http: HttpConfig {
            timeout_secs: Some(10),
            ..HttpConfig::default()
        },
    };
    PubMedSource::from_config(&config).unwrap()
}

fn mock_search(server: &mut ServerGuard, term: &str, status: usize, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("db".into(), "pubmed".into()),
            Matcher::UrlEncoded("term".into(), term.into()),
            Matcher::UrlEncoded("retmode".into(), "json".into()),
            Matcher::UrlEncoded("retmax".into(), "10".into()),
        ]))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create()
}

#[test]
fn test_search_and_fetch_end_to_end() {
    let mut server = Server::new();
    let search = mock_search(
        &mut server,
        "mrna vaccine & stability",
        200,
        r#"{"header":{"type":"esearch"},"esearchresult":{"count":"2","idlist":["123","456"]}}"#,
    );
    let fetch = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("db".into(), "pubmed".into()),
            Matcher::UrlEncoded("id".into(), "123,456".into()),
            Matcher::UrlEncoded("retmode".into(), "xml".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body(FETCH_XML)
        .create();

    let source = source_for(&server);
    let records = source
        .search(&SearchQuery::new("mrna vaccine & stability"))
        .unwrap();

    search.assert();
    fetch.assert();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].pubmed_id, "123");
    assert_eq!(records[0].publication_year, "2022");
    assert_eq!(records[0].non_academic_authors, "Chidi Okafor");
    assert_eq!(records[0].academic_authors, "Petra Novak");

    assert_eq!(records[1].pubmed_id, "456");
    assert_eq!(records[1].publication_year, NOT_AVAILABLE);
    assert_eq!(records[1].non_academic_authors, "");
    assert_eq!(records[1].academic_authors, "Rami Haddad");
}

#[test]
fn test_empty_idlist_skips_fetch() {
    let mut server = Server::new();
    let search = mock_search(
        &mut server,
        "zzzz no hits",
        200,
        r#"{"esearchresult":{"count":"0","idlist":[]}}"#,
    );
    let fetch = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::Any)
        .expect(0)
        .create();

    let records = source_for(&server)
        .search(&SearchQuery::new("zzzz no hits"))
        .unwrap();

    assert!(records.is_empty());
    search.assert();
    fetch.assert();
}

#[test]
fn test_search_failure_status_yields_no_records() {
    let mut server = Server::new();
    let search = mock_search(&mut server, "cancer", 503, "Service Unavailable");
    let fetch = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::Any)
        .expect(0)
        .create();

    let records = source_for(&server)
        .search(&SearchQuery::new("cancer"))
        .unwrap();

    assert!(records.is_empty());
    search.assert();
    fetch.assert();
}

#[test]
fn test_fetch_failure_status_yields_no_records() {
    let mut server = Server::new();
    let _search = mock_search(
        &mut server,
        "cancer",
        200,
        r#"{"esearchresult":{"idlist":["1"]}}"#,
    );
    let fetch = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();

    let records = source_for(&server)
        .search(&SearchQuery::new("cancer"))
        .unwrap();

    assert!(records.is_empty());
    fetch.assert();
}

#[test]
fn test_search_ids_truncated_to_max_results() {
    let mut server = Server::new();
    let _search = server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::UrlEncoded("retmax".into(), "2".into()))
        .with_status(200)
        .with_body(r#"{"esearchresult":{"idlist":["1","2","3"]}}"#)
        .create();

    let ids = source_for(&server).search_ids(&SearchQuery::new("x").max_results(2));
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn test_malformed_fetch_xml_is_an_error() {
    let mut server = Server::new();
    let _search = mock_search(
        &mut server,
        "cancer",
        200,
        r#"{"esearchresult":{"idlist":["1"]}}"#,
    );
    let _fetch = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<PubmedArticleSet><PubmedArticle></PubmedArticleSet>")
        .create();

    let result = source_for(&server).search(&SearchQuery::new("cancer"));
    assert!(matches!(result, Err(SourceError::Parse(_))));
}

#[test]
fn test_unreachable_server_yields_no_records() {
    // Nothing listens on port 1.
    let config = PubMedConfig {
        esearch_url: "http://127.0.0.1:1/esearch.fcgi".to_string(),
        efetch_url: "http://127.0.0.1:1/efetch.fcgi".to_string(),
        ..PubMedConfig::default()
    };
    let client = Arc::new(HttpClient::new().unwrap());
    let offline = PubMedSource::with_client(client, config);

    assert!(offline.search(&SearchQuery::new("cancer")).unwrap().is_empty());
}

#[test]
fn test_run_writes_csv_report() {
    let mut server = Server::new();
    let _search = mock_search(
        &mut server,
        "mrna",
        200,
        r#"{"esearchresult":{"idlist":["123","456"]}}"#,
    );
    let _fetch = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(FETCH_XML)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("papers.csv");
    let mut out = Vec::new();

    let outcome = run(
        &source_for(&server),
        &SearchQuery::new("mrna"),
        Some(path.as_path()),
        &mut out,
    )
    .unwrap();

    assert_eq!(outcome, ReportOutcome::Saved(path.clone()));
    let saved = read_csv(&path).unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[1].title, "Lipid nanoparticles, a review.");
    assert_eq!(saved[0].corresponding_email, NOT_AVAILABLE);
}

#[test]
fn test_run_no_results_writes_no_file() {
    let mut server = Server::new();
    let _search = mock_search(&mut server, "nothing", 200, r#"{"esearchresult":{"idlist":[]}}"#);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("papers.csv");
    let mut out = Vec::new();

    let outcome = run(
        &source_for(&server),
        &SearchQuery::new("nothing"),
        Some(path.as_path()),
        &mut out,
    )
    .unwrap();

    assert_eq!(outcome, ReportOutcome::NoResults);
    assert_eq!(String::from_utf8(out).unwrap().trim_end(), NO_RESULTS_MESSAGE);
    assert!(!path.exists());
}
