//! PubMed abstract fetching
//!
//! Pulls the plain-text abstract for a paper from the NCBI efetch endpoint,
//! keyed by the PMID in a pasted PubMed URL. No API key required (but
//! polite usage recommended). There is no local fallback for remote text,
//! so failures surface as `Error::SourceFetch`.

use regex::Regex;
use reqwest::Client;
use std::time::Duration;

use crate::error::Error;

const EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// Extract the PMID from a PubMed URL: the trailing path segment of digits.
///
/// Handles:
/// - `https://pubmed.ncbi.nlm.nih.gov/16175659/` → `16175659`
/// - `https://pubmed.ncbi.nlm.nih.gov/16175659` → `16175659`
pub fn extract_pmid(url: &str) -> Option<String> {
    let pmid_pattern = Regex::new(r"/(\d+)/?$").unwrap();

    pmid_pattern
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Fetch a paper abstract as plain text for the given PubMed URL.
pub async fn fetch_abstract(url: &str) -> Result<String, Error> {
    let pmid = extract_pmid(url)
        .ok_or_else(|| Error::SourceFetch("Could not extract PubMed ID from URL".to_string()))?;

    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("medreader/0.3.0")
        .build()
        .map_err(|e| Error::SourceFetch(format!("Failed to create HTTP client: {}", e)))?;

    let response = client
        .get(EFETCH_URL)
        .query(&[
            ("db", "pubmed"),
            ("id", pmid.as_str()),
            ("rettype", "abstract"),
            ("retmode", "text"),
        ])
        .send()
        .await
        .map_err(|e| Error::SourceFetch(format!("Failed to fetch from PubMed: {}", e)))?;

    if !response.status().is_success() {
        return Err(Error::SourceFetch("Failed to fetch from PubMed".to_string()));
    }

    response
        .text()
        .await
        .map_err(|e| Error::SourceFetch(format!("Failed to read PubMed response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_pmid() {
        assert_eq!(
            extract_pmid("https://pubmed.ncbi.nlm.nih.gov/16175659/"),
            Some("16175659".to_string())
        );
        assert_eq!(
            extract_pmid("https://pubmed.ncbi.nlm.nih.gov/16175659"),
            Some("16175659".to_string())
        );
    }

    #[test]
    fn test_extract_pmid_no_match() {
        assert_eq!(extract_pmid("https://pubmed.ncbi.nlm.nih.gov/"), None);
        assert_eq!(extract_pmid("https://pubmed.ncbi.nlm.nih.gov/abc123x/"), None);
        assert_eq!(extract_pmid("not a url"), None);
    }

    #[test]
    fn test_extract_pmid_only_trailing_segment() {
        // Digits mid-path do not count; only the last segment does
        assert_eq!(
            extract_pmid("https://example.org/123/article"),
            None
        );
    }

    #[tokio::test]
    async fn test_fetch_abstract_without_pmid_is_source_fetch_error() {
        let result = fetch_abstract("https://pubmed.ncbi.nlm.nih.gov/").await;
        match result {
            Err(Error::SourceFetch(msg)) => {
                assert_eq!(msg, "Could not extract PubMed ID from URL");
            }
            other => panic!("expected SourceFetch, got {:?}", other.map(|_| ())),
        }
    }
}
