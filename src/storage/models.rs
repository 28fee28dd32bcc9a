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


//! Catalog entity models
//!
//! The single persisted entity is [`Book`]; [`NewBook`] is the draft shape
//! handed to insert before the store has assigned an id.
//!
//! # SQLite Adaptations
//! - `status` is stored as the enum variant's name string (`AVAILABLE` /
//!   `BORROWED`). Decoding is an exhaustive match that fails loudly with
//!   `CatalogError::DataCorruption` on anything else — no silent coercion.
//! - `isbn` and `description` are nullable columns surfaced as plain
//!   `String`s; NULL reads back as the empty string.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Loan status of a book, toggled manually by the user
///
/// Not linked to any loan entity; it is a plain field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookStatus {
    Available,
    Borrowed,
}

impl BookStatus {
    /// Name string used for persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "AVAILABLE",
            BookStatus::Borrowed => "BORROWED",
        }
    }

    /// Exhaustive mapping from the persisted name string
    ///
    /// Returns `None` for anything that is not a known variant name; the
    /// row-decoding layer turns that into a `DataCorruption` error.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AVAILABLE" => Some(BookStatus::Available),
            "BORROWED" => Some(BookStatus::Borrowed),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Book entity — one row of the `books` table
///
/// `id` is unique, assigned by the store on insert, and immutable once
/// assigned. Every other field is replaceable via update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Optional; empty string when unknown. Not checked for uniqueness.
    pub isbn: String,
    /// Publication year. The store does not range-check it.
    pub year: i32,
    /// Free-form; the advisory default list is a UI convenience, not a
    /// constraint.
    pub category: String,
    pub status: BookStatus,
    pub description: String,
}

impl Book {
    /// Check the required-field invariants before an update reaches SQL
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.title, &self.author, &self.category)
    }
}

/// Draft for a book not yet assigned a persisted id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub year: i32,
    pub category: String,
    pub status: BookStatus,
    pub description: String,
}

impl NewBook {
    /// Create a draft with the optional fields empty and status Available
    pub fn new(title: String, author: String, year: i32, category: String) -> Self {
        Self {
            title,
            author,
            isbn: String::new(),
            year,
            category,
            status: BookStatus::Available,
            description: String::new(),
        }
    }

    /// Check the required-field invariants before an insert reaches SQL
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.title, &self.author, &self.category)
    }
}

fn validate_fields(title: &str, author: &str, category: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(CatalogError::validation("title", "must not be empty"));
    }
    if author.trim().is_empty() {
        return Err(CatalogError::validation("author", "must not be empty"));
    }
    if category.trim().is_empty() {
        return Err(CatalogError::validation("category", "must not be empty"));
    }
    Ok(())
}

/// Tagged result of a single-row mutation
///
/// Targeting an id that does not exist is a normal signal, not an error,
/// so update/delete return this instead of a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Exactly one row was changed
    Applied,
    /// No row matched the target id; the store is unchanged
    NotFound,
}

impl WriteOutcome {
    pub(crate) fn from_rows_affected(rows: u64) -> Self {
        if rows == 0 {
            WriteOutcome::NotFound
        } else {
            WriteOutcome::Applied
        }
    }

    /// Count of records the operation actually changed (0 or 1)
    pub fn rows_affected(&self) -> u64 {
        match self {
            WriteOutcome::Applied => 1,
            WriteOutcome::NotFound => 0,
        }
    }
}

/// Raw row shape as read from SQLite, before status decoding
#[derive(Debug, FromRow)]
pub(crate) struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub year: i32,
    pub category: String,
    pub status: String,
    pub description: Option<String>,
}

impl BookRow {
    /// Decode into a `Book`, failing loudly on an unrecognized status
    pub(crate) fn into_book(self) -> Result<Book> {
        let status =
            BookStatus::from_name(&self.status).ok_or_else(|| CatalogError::DataCorruption {
                id: self.id,
                value: self.status.clone(),
            })?;
        Ok(Book {
            id: self.id,
            title: self.title,
            author: self.author,
            isbn: self.isbn.unwrap_or_default(),
            year: self.year,
            category: self.category,
            status,
            description: self.description.unwrap_or_default(),
        })
    }
}
