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


//! Durable book storage over SQLite
//!
//! The store is the exclusive owner of persisted `Book` records: callers
//! hold transient snapshots only. Every mutating operation is immediately
//! durable — there is no write-behind caching layer.
//!
//! # Layout
//! - [`database`]: the `Database` handle (pool, lifecycle, migrations entry)
//! - [`migrations`]: schema DDL and version upgrades
//! - [`models`]: `Book`, `NewBook`, `BookStatus`, `WriteOutcome`
//! - [`queries`]: repository functions (CRUD, search, filters, aggregation)
//!
//! # Usage Example
//! ```no_run
//! use bookvault::storage::{queries, Database};
//! use bookvault::storage::models::NewBook;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("./catalog.db").await?;
//!
//! let draft = NewBook::new(
//!     "The Left Hand of Darkness".to_string(),
//!     "Ursula K. Le Guin".to_string(),
//!     1969,
//!     "Science Fiction".to_string(),
//! );
//! let id = queries::insert_book(db.pool(), &draft).await?;
//!
//! let book = queries::find_book_by_id(db.pool(), id).await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

// Re-export commonly used types
pub use database::Database;
pub use migrations::{MigrationOutcome, SCHEMA_VERSION};
pub use models::{Book, BookStatus, NewBook, WriteOutcome};
pub use queries::{CatalogStatistics, CategoryCount, ALL_CATEGORIES, DEFAULT_CATEGORIES};
