// BookVault - Personal Book Catalog
// Copyright (C) 2025 BookVault contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! HTTP client for the Open Library books API
//!
//! One endpoint: `GET /api/books?bibkeys=ISBN:{isbn}&format=json&jscmd=data`,
//! which answers with a JSON object keyed by bibkey. A missing key means the
//! collaborator has no record for that ISBN — "not found", not a transport
//! fault.
//!
//! Lookups are single-shot: the core performs no automatic retries; whether
//! to retry (or fall back to manual entry) is the caller's policy.

use crate::api::metadata::BookMetadata;
use crate::error::LookupError;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Public Open Library endpoint
pub const OPEN_LIBRARY_BASE_URL: &str = "https://openlibrary.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT_VALUE: &str = concat!("bookvault/", env!("CARGO_PKG_VERSION"));

/// Thin typed wrapper around `reqwest::Client` for ISBN metadata lookups
#[derive(Debug, Clone)]
pub struct OpenLibraryClient {
    http: Client,
    base_url: String,
}

impl OpenLibraryClient {
    /// Client against the public Open Library endpoint
    pub fn new() -> Result<Self, LookupError> {
        Self::with_base_url(OPEN_LIBRARY_BASE_URL)
    }

    /// Client against a custom endpoint (tests, self-hosted mirrors)
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT_VALUE)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the bibliographic record for a validated ISBN
    ///
    /// # Errors
    /// - `NotFound`: the collaborator answered but has no record
    /// - `Transport`: network failure or an HTTP error status
    /// - `UnexpectedResponse`: the payload could not be decoded
    pub async fn book_by_isbn(&self, isbn: &str) -> Result<BookMetadata, LookupError> {
        let bibkey = format!("ISBN:{isbn}");
        debug!(%bibkey, "looking up ISBN metadata");

        let response = self
            .http
            .get(format!("{}/api/books", self.base_url))
            .query(&[
                ("bibkeys", bibkey.as_str()),
                ("format", "json"),
                ("jscmd", "data"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::transport_status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_books_response(&body, &bibkey, isbn)
    }
}

/// Decode the bibkey-keyed response object and pick out our record
fn parse_books_response(
    body: &str,
    bibkey: &str,
    isbn: &str,
) -> Result<BookMetadata, LookupError> {
    let mut records: HashMap<String, BookMetadata> =
        serde_json::from_str(body).map_err(|e| LookupError::UnexpectedResponse(e.to_string()))?;

    // The response carries at most the keys we asked for
    records
        .remove(bibkey)
        .or_else(|| records.into_values().next())
        .ok_or_else(|| LookupError::NotFound(isbn.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_and_normalizes_base_url() {
        let client = OpenLibraryClient::with_base_url("http://localhost:9999/").expect("client");
        assert_eq!(client.base_url, "http://localhost:9999");
        OpenLibraryClient::new().expect("default client");
    }

    #[test]
    fn empty_response_object_is_not_found() {
        let err = parse_books_response("{}", "ISBN:9780451524935", "9780451524935")
            .expect_err("no record");
        match err {
            LookupError::NotFound(isbn) => assert_eq!(isbn, "9780451524935"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn malformed_payload_is_unexpected_response() {
        let err = parse_books_response("<html>rate limited</html>", "ISBN:1", "1")
            .expect_err("not json");
        assert!(matches!(err, LookupError::UnexpectedResponse(_)));
    }

    #[test]
    fn keyed_record_is_returned() {
        let body = r#"{"ISBN:9780451524935": {"title": "1984"}}"#;
        let metadata =
            parse_books_response(body, "ISBN:9780451524935", "9780451524935").expect("record");
        assert_eq!(metadata.title.as_deref(), Some("1984"));
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored (requires network access)
    async fn live_lookup_returns_metadata() {
        let client = OpenLibraryClient::new().expect("client");
        let metadata = client
            .book_by_isbn("9780451524935")
            .await
            .expect("live lookup");
        assert!(metadata.title.is_some());
    }
}
