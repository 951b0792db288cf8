//! Author affiliation heuristics.
//!
//! Decides whether an author looks like they work in industry, based on
//! keywords in the affiliation text and, failing that, the email domain.
//! Matching is case-insensitive. The first rule that matches wins:
//!
//! 1. Affiliation mentions an industry keyword: non-academic
//! 2. Affiliation mentions an academic keyword: academic
//! 3. Email domain ends with a known company domain: non-academic
//! 4. Anything else: academic
//!
//! This is a heuristic; nothing verifies the result.

use crate::models::AuthorClass;

/// Affiliation keywords that indicate an industry employer
pub const NON_ACADEMIC_KEYWORDS: &[&str] = &[
    "pharma",
    "biotech",
    "company",
    "corporation",
    "industry",
    "startup",
];

/// Affiliation keywords that indicate a university or research body
pub const ACADEMIC_KEYWORDS: &[&str] = &["university", "research", "institute", "lab", "college"];

/// Email domain suffixes that indicate an industry employer
pub const NON_ACADEMIC_EMAIL_DOMAINS: &[&str] = &["company.com", "pharma.com", "startup.com"];

/// Classify an author from their affiliation and email.
///
/// # Examples
///
/// ```
/// use pubmed_affiliations::models::AuthorClass;
/// use pubmed_affiliations::utils::classify;
///
/// assert_eq!(classify("Acme Pharma Ltd", ""), AuthorClass::NonAcademic);
/// assert_eq!(classify("Harvard University", ""), AuthorClass::Academic);
/// ```
pub fn classify(affiliation: &str, email: &str) -> AuthorClass {
    let affiliation = affiliation.to_lowercase();

    if contains_any(&affiliation, NON_ACADEMIC_KEYWORDS) {
        return AuthorClass::NonAcademic;
    }
    if contains_any(&affiliation, ACADEMIC_KEYWORDS) {
        return AuthorClass::Academic;
    }

    if let Some((_, domain)) = email.rsplit_once('@') {
        let domain = domain.to_lowercase();
        if NON_ACADEMIC_EMAIL_DOMAINS
            .iter()
            .any(|suffix| domain.ends_with(suffix))
        {
            return AuthorClass::NonAcademic;
        }
    }

    AuthorClass::Academic
}

/// Shorthand for `classify(..).is_non_academic()`
pub fn is_non_academic(affiliation: &str, email: &str) -> bool {
    classify(affiliation, email).is_non_academic()
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}
