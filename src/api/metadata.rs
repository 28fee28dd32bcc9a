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


//! Open Library response models and the draft mapping
//!
//! [`to_book_draft`] is total: whatever the collaborator omitted is filled
//! with placeholders, so a lookup result can always be turned into a draft
//! the store will accept.

use crate::storage::models::{BookStatus, NewBook};
use serde::{Deserialize, Serialize};

/// Bibliographic record as returned by the Open Library books API
///
/// Every field is optional; the API omits whatever it does not know.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookMetadata {
    pub title: Option<String>,
    pub authors: Option<Vec<AuthorRef>>,
    pub publishers: Option<Vec<PublisherRef>>,
    pub publish_date: Option<String>,
    pub number_of_pages: Option<i32>,
    pub subjects: Option<Vec<SubjectRef>>,
    pub cover: Option<CoverLinks>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRef {
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRef {
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverLinks {
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
}

/// Map a bibliographic record into a book draft for the given ISBN
///
/// Total — never fails:
/// - missing title → "Unknown Title"
/// - missing author → "Unknown Author"
/// - missing or unparseable publish year → 0
/// - missing subject → category "General"
/// - description joins the subject names with ", " (empty when none)
/// - status is always Available; the store assigns the id on insert
pub fn to_book_draft(metadata: &BookMetadata, isbn: &str) -> NewBook {
    let title = metadata
        .title
        .clone()
        .unwrap_or_else(|| "Unknown Title".to_string());
    let author = metadata
        .authors
        .as_ref()
        .and_then(|authors| authors.first())
        .map(|a| a.name.clone())
        .unwrap_or_else(|| "Unknown Author".to_string());
    let category = metadata
        .subjects
        .as_ref()
        .and_then(|subjects| subjects.first())
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "General".to_string());
    let description = metadata
        .subjects
        .as_ref()
        .map(|subjects| {
            subjects
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    NewBook {
        title,
        author,
        isbn: isbn.to_string(),
        year: publish_year(metadata.publish_date.as_deref()),
        category,
        status: BookStatus::Available,
        description,
    }
}

/// Publication year: the text before the first `-`, or 0 when absent or
/// not a number ("June 26, 1997" style dates fall back to 0 too)
fn publish_year(publish_date: Option<&str>) -> i32 {
    publish_date
        .and_then(|date| date.split('-').next())
        .and_then(|year| year.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(name: &str) -> SubjectRef {
        SubjectRef {
            name: name.to_string(),
            url: None,
        }
    }

    #[test]
    fn full_record_maps_every_field() {
        let metadata = BookMetadata {
            title: Some("Harry Potter and the Sorcerer's Stone".to_string()),
            authors: Some(vec![
                AuthorRef {
                    name: "J.K. Rowling".to_string(),
                    url: None,
                },
                AuthorRef {
                    name: "Someone Else".to_string(),
                    url: None,
                },
            ]),
            publish_date: Some("1997-06-26".to_string()),
            subjects: Some(vec![subject("Fantasy"), subject("Magic")]),
            ..Default::default()
        };

        let draft = to_book_draft(&metadata, "9780439708180");
        assert_eq!(draft.title, "Harry Potter and the Sorcerer's Stone");
        assert_eq!(draft.author, "J.K. Rowling", "first author wins");
        assert_eq!(draft.isbn, "9780439708180");
        assert_eq!(draft.year, 1997);
        assert_eq!(draft.category, "Fantasy", "first subject wins");
        assert_eq!(draft.description, "Fantasy, Magic");
        assert_eq!(draft.status, BookStatus::Available);
    }

    #[test]
    fn empty_record_maps_to_placeholders() {
        let draft = to_book_draft(&BookMetadata::default(), "080442957X");
        assert_eq!(draft.title, "Unknown Title");
        assert_eq!(draft.author, "Unknown Author");
        assert_eq!(draft.isbn, "080442957X");
        assert_eq!(draft.year, 0);
        assert_eq!(draft.category, "General");
        assert_eq!(draft.description, "");
        assert_eq!(draft.status, BookStatus::Available);
        assert!(draft.validate().is_ok(), "placeholder drafts are insertable");
    }

    #[test]
    fn publish_year_handles_plain_and_dashed_and_verbose_dates() {
        assert_eq!(publish_year(Some("1997-06-26")), 1997);
        assert_eq!(publish_year(Some("1954")), 1954);
        assert_eq!(publish_year(Some("June 26, 1997")), 0);
        assert_eq!(publish_year(Some("")), 0);
        assert_eq!(publish_year(None), 0);
    }

    #[test]
    fn response_payload_deserializes() {
        let payload = r#"{
            "title": "The Lord of the Rings",
            "authors": [{"name": "J.R.R. Tolkien", "url": "https://openlibrary.org/authors/OL26320A"}],
            "publishers": [{"name": "Houghton Mifflin"}],
            "publish_date": "1954",
            "number_of_pages": 1178,
            "subjects": [{"name": "Fantasy fiction", "url": "https://openlibrary.org/subjects/fantasy_fiction"}],
            "cover": {"small": "s.jpg", "medium": "m.jpg", "large": "l.jpg"}
        }"#;

        let metadata: BookMetadata = serde_json::from_str(payload).expect("deserialize");
        assert_eq!(metadata.title.as_deref(), Some("The Lord of the Rings"));
        assert_eq!(metadata.number_of_pages, Some(1178));

        let draft = to_book_draft(&metadata, "9780547928210");
        assert_eq!(draft.author, "J.R.R. Tolkien");
        assert_eq!(draft.year, 1954);
        assert_eq!(draft.category, "Fantasy fiction");
    }
}
