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


//! Repository functions for the book catalog
//!
//! All reads and writes to durable storage funnel through here. The query
//! side is stateless: every call re-reads from the store, so results are
//! never stale relative to the last completed mutation.
//!
//! # Ordering
//! Listings are ordered by `title` ascending under SQLite's default BINARY
//! collation — byte-wise and case-sensitive, so every uppercase letter sorts
//! before any lowercase one. Tests rely on exactly this ordering.
//!
//! # Search
//! `search_books` matches the query as a substring of title, author, or
//! ISBN via SQLite `LIKE`, which folds case for ASCII only. `%`, `_`, and
//! `\` in the query are escaped so they match literally.
//!
//! # Corrupt rows
//! A row whose status string is not a known variant name cannot be decoded.
//! Whole-table scans skip such rows and log a warning (decoding is per-row,
//! one bad record should not take down the listing); a directly addressed
//! read surfaces `CatalogError::DataCorruption`.

use crate::error::Result;
use crate::storage::models::{Book, BookRow, BookStatus, NewBook, WriteOutcome};
use sqlx::SqlitePool;
use tracing::{debug, warn};

/// Advisory default categories merged into [`list_categories`]
///
/// A UI convenience, not a constraint — `category` stays free-form.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Business",
    "Education",
    "Fiction",
    "History",
    "Nonfiction",
    "Religion",
    "Technology",
];

/// Sentinel category meaning "no category filter"
pub const ALL_CATEGORIES: &str = "All";

// ============================================================================
// CRUD
// ============================================================================

/// Insert a new book and return the assigned id
///
/// The draft is validated first; duplicate content is never an error (the
/// only uniqueness constraint is the id the store assigns here).
pub async fn insert_book(pool: &SqlitePool, book: &NewBook) -> Result<i64> {
    book.validate()?;

    let result = sqlx::query(
        r#"
        INSERT INTO books (title, author, isbn, year, category, status, description)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&book.title)
    .bind(&book.author)
    .bind(&book.isbn)
    .bind(book.year)
    .bind(&book.category)
    .bind(book.status.as_str())
    .bind(&book.description)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    debug!(id, title = %book.title, "inserted book");
    Ok(id)
}

/// Replace every field of the book matching `book.id` (except the id)
///
/// `WriteOutcome::NotFound` means no row carries that id; the store is
/// unchanged and this is not an error.
pub async fn update_book(pool: &SqlitePool, book: &Book) -> Result<WriteOutcome> {
    book.validate()?;

    let result = sqlx::query(
        r#"
        UPDATE books
        SET title = ?, author = ?, isbn = ?, year = ?, category = ?, status = ?, description = ?
        WHERE id = ?
        "#,
    )
    .bind(&book.title)
    .bind(&book.author)
    .bind(&book.isbn)
    .bind(book.year)
    .bind(&book.category)
    .bind(book.status.as_str())
    .bind(&book.description)
    .bind(book.id)
    .execute(pool)
    .await?;

    let outcome = WriteOutcome::from_rows_affected(result.rows_affected());
    debug!(id = book.id, rows = outcome.rows_affected(), "updated book");
    Ok(outcome)
}

/// Hard-delete the book with this id
///
/// No tombstone or soft-delete flag; `NotFound` when the id is absent.
pub async fn delete_book(pool: &SqlitePool, id: i64) -> Result<WriteOutcome> {
    let result = sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    let outcome = WriteOutcome::from_rows_affected(result.rows_affected());
    debug!(id, rows = outcome.rows_affected(), "deleted book");
    Ok(outcome)
}

/// Find a book by id; absence is `None`, not an error
///
/// A directly addressed row that cannot be decoded is a
/// `CatalogError::DataCorruption`.
pub async fn find_book_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Book>> {
    let row = sqlx::query_as::<_, BookRow>("SELECT * FROM books WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(BookRow::into_book).transpose()
}

/// List all books ordered by title ascending
pub async fn list_books(pool: &SqlitePool) -> Result<Vec<Book>> {
    let rows = sqlx::query_as::<_, BookRow>("SELECT * FROM books ORDER BY title ASC")
        .fetch_all(pool)
        .await?;

    Ok(decode_rows(rows))
}

// ============================================================================
// SEARCH AND FILTERS
// ============================================================================

/// Search for books whose title, author, or ISBN contains `query`
///
/// A blank query is equivalent to [`list_books`]. Substring matching only —
/// no tokenization, stemming, or ranking.
pub async fn search_books(pool: &SqlitePool, query: &str) -> Result<Vec<Book>> {
    if query.trim().is_empty() {
        return list_books(pool).await;
    }

    let pattern = like_pattern(query);
    let rows = sqlx::query_as::<_, BookRow>(
        r#"
        SELECT * FROM books
        WHERE title LIKE ?1 ESCAPE '\'
           OR author LIKE ?1 ESCAPE '\'
           OR isbn LIKE ?1 ESCAPE '\'
        ORDER BY title ASC
        "#,
    )
    .bind(&pattern)
    .fetch_all(pool)
    .await?;

    Ok(decode_rows(rows))
}

/// List books with this exact status; `None` returns all books
pub async fn find_books_by_status(
    pool: &SqlitePool,
    status: Option<BookStatus>,
) -> Result<Vec<Book>> {
    let Some(status) = status else {
        return list_books(pool).await;
    };

    let rows =
        sqlx::query_as::<_, BookRow>("SELECT * FROM books WHERE status = ? ORDER BY title ASC")
            .bind(status.as_str())
            .fetch_all(pool)
            .await?;

    Ok(decode_rows(rows))
}

/// List books with this exact category (case-sensitive)
///
/// `None` and the [`ALL_CATEGORIES`] sentinel both return all books.
pub async fn find_books_by_category(
    pool: &SqlitePool,
    category: Option<&str>,
) -> Result<Vec<Book>> {
    let category = match category {
        None => return list_books(pool).await,
        Some(ALL_CATEGORIES) => return list_books(pool).await,
        Some(c) => c,
    };

    let rows =
        sqlx::query_as::<_, BookRow>("SELECT * FROM books WHERE category = ? ORDER BY title ASC")
            .bind(category)
            .fetch_all(pool)
            .await?;

    Ok(decode_rows(rows))
}

/// Distinct categories observed in the data, unioned with the advisory
/// defaults, deduplicated, sorted ascending
///
/// Recomputed fresh on every call so a just-inserted book's category shows
/// up immediately. Never empty, even for an empty store.
pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<String>> {
    let mut categories: Vec<String> = sqlx::query_scalar("SELECT DISTINCT category FROM books")
        .fetch_all(pool)
        .await?;

    for default in DEFAULT_CATEGORIES {
        if !categories.iter().any(|c| c == default) {
            categories.push(default.to_string());
        }
    }
    categories.sort();
    categories.dedup();

    Ok(categories)
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Count of all stored books
pub async fn count_books(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Number of books in one category
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Aggregate counts over the whole catalog
///
/// Categories are counted verbatim as stored; folding display synonyms
/// together is a presentation concern and does not happen here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStatistics {
    pub total: i64,
    pub available: i64,
    pub borrowed: i64,
    /// Per-category counts, largest first, ties broken by name
    pub categories: Vec<CategoryCount>,
}

/// Compute catalog statistics in one pass over current data
pub async fn catalog_statistics(pool: &SqlitePool) -> Result<CatalogStatistics> {
    let total = count_books(pool).await?;

    let available: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE status = ?")
        .bind(BookStatus::Available.as_str())
        .fetch_one(pool)
        .await?;
    let borrowed: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE status = ?")
        .bind(BookStatus::Borrowed.as_str())
        .fetch_one(pool)
        .await?;

    let categories = sqlx::query_as::<_, CategoryCount>(
        r#"
        SELECT category, COUNT(*) AS count
        FROM books
        GROUP BY category
        ORDER BY count DESC, category ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(CatalogStatistics {
        total,
        available,
        borrowed,
        categories,
    })
}

// ============================================================================
// HELPERS
// ============================================================================

/// Decode scanned rows, skipping and logging the undecodable ones
fn decode_rows(rows: Vec<BookRow>) -> Vec<Book> {
    let mut books = Vec::with_capacity(rows.len());
    for row in rows {
        match row.into_book() {
            Ok(book) => books.push(book),
            Err(e) => warn!(error = %e, "skipping undecodable book row"),
        }
    }
    books
}

/// Wrap a query in `%…%`, escaping LIKE metacharacters so the query text
/// matches literally
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
