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


//! BookVault — local book-catalog storage and query core
//!
//! This crate is the data layer of a personal book-catalog application: a
//! durable SQLite store of `Book` records with repository operations
//! (create, read, update, delete, search, filter, category aggregation,
//! statistics), an ISBN metadata lookup adapter over the Open Library books
//! API, and a validator that pulls ISBNs out of scanned barcode text.
//!
//! It is a library consumed by a UI layer — no CLI surface, no environment
//! variables, no wire protocol. The composition root constructs one
//! [`storage::Database`] per catalog file and hands it to consumers; the
//! [`api::OpenLibraryClient`] and the [`isbn`] helpers are independent of
//! the store and only produce drafts for it.
//!
//! ```no_run
//! use bookvault::api::{to_book_draft, OpenLibraryClient};
//! use bookvault::isbn::is_valid_isbn;
//! use bookvault::storage::{queries, Database};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new(Database::get_default_path()).await?;
//!
//! let scanned = "ISBN-13 9780451524935";
//! let isbn = bookvault::isbn::extract_isbn(scanned);
//! if is_valid_isbn(&isbn) {
//!     let client = OpenLibraryClient::new()?;
//!     let metadata = client.book_by_isbn(&isbn).await?;
//!     let draft = to_book_draft(&metadata, &isbn);
//!     queries::insert_book(db.pool(), &draft).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod isbn;
pub mod storage;

// Re-export the everyday surface at the crate root
pub use error::{CatalogError, LookupError, Result};
pub use storage::{Book, BookStatus, Database, NewBook, WriteOutcome};
