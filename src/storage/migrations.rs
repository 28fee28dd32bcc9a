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


//! Database schema and migrations
//!
//! The schema generation is tracked with SQLite's own `PRAGMA user_version`;
//! migrations are plain runtime SQL (no compile-time migration macros, which
//! would need a build-time database connection).
//!
//! # Migration Strategy
//! Forward-only steps from the stored version up to [`SCHEMA_VERSION`]:
//! - 1 → 2: no structural change
//! - 2 → 3: add the nullable `isbn` column (idempotent — a duplicate-column
//!   failure from a half-applied earlier run is tolerated)
//!
//! A version with no upgrade path (0 with an existing table, or newer than
//! the current target) falls back to dropping and recreating the table.
//! That discards all rows; it is deliberate and logged, never silent.
//!
//! All steps of one invocation run inside a single transaction, so a failed
//! migration leaves the previous schema in place.

use crate::error::Result;
use crate::storage::models::{BookStatus, NewBook};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info, warn};

/// Current on-disk table generation
///
/// Version 3 added the `isbn` column.
pub const SCHEMA_VERSION: i64 = 3;

/// How `run_migrations` brought the store up to date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// No `books` table existed; it was created fresh
    Created,
    /// Stepwise upgrade from an older supported version
    Migrated { from: i64 },
    /// Already at the current version
    UpToDate,
    /// Unsupported version gap; the table was dropped and recreated,
    /// discarding all rows
    Recreated { from: i64 },
}

impl MigrationOutcome {
    /// True when the table came into existence empty during this run
    /// (fresh creation or the destructive fallback)
    pub fn table_was_created(&self) -> bool {
        matches!(
            self,
            MigrationOutcome::Created | MigrationOutcome::Recreated { .. }
        )
    }
}

/// Bring the `books` table up to [`SCHEMA_VERSION`]
///
/// Reads `PRAGMA user_version`, applies the forward-only steps in order, and
/// stamps the new version. Runs in one transaction; on error nothing is
/// committed and the caller surfaces an initialization failure.
pub async fn run_migrations(pool: &SqlitePool) -> Result<MigrationOutcome> {
    let mut tx = pool.begin().await?;

    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(&mut *tx)
        .await?;
    let table_exists = books_table_exists(&mut tx).await?;

    let outcome = match version {
        SCHEMA_VERSION if table_exists => MigrationOutcome::UpToDate,
        0 if !table_exists => {
            info!(version = SCHEMA_VERSION, "creating books table");
            create_books_table(&mut tx).await?;
            MigrationOutcome::Created
        }
        1 | 2 => {
            if version == 1 {
                // 1 -> 2 changed no table structure
                info!("migrating books table from version 1 to 2");
            }
            info!("migrating books table from version 2 to 3, adding isbn column");
            add_isbn_column(&mut tx).await?;
            MigrationOutcome::Migrated { from: version }
        }
        _ => {
            warn!(
                from = version,
                "unsupported schema version, dropping and recreating books table; \
                 all existing rows are discarded"
            );
            sqlx::query("DROP TABLE IF EXISTS books")
                .execute(&mut *tx)
                .await?;
            create_books_table(&mut tx).await?;
            MigrationOutcome::Recreated { from: version }
        }
    };

    // PRAGMA does not support bound parameters
    sqlx::query(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(outcome)
}

async fn books_table_exists(tx: &mut Transaction<'_, Sqlite>) -> Result<bool> {
    let found: Option<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'books'")
            .fetch_optional(&mut **tx)
            .await?;
    Ok(found.is_some())
}

async fn create_books_table(tx: &mut Transaction<'_, Sqlite>) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            isbn TEXT,
            year INTEGER NOT NULL,
            category TEXT NOT NULL,
            status TEXT NOT NULL,
            description TEXT
        )
        "#,
    )
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Add the `isbn` column introduced in version 3
///
/// Tolerates the column already existing so a rerun against an
/// already-migrated store is a no-op.
async fn add_isbn_column(tx: &mut Transaction<'_, Sqlite>) -> Result<()> {
    match sqlx::query("ALTER TABLE books ADD COLUMN isbn TEXT")
        .execute(&mut **tx)
        .await
    {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(db_err)) if db_err.message().contains("duplicate column name") => {
            debug!("isbn column already present, skipping");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Seed the store with the fixed demonstration books
///
/// Called by [`crate::storage::Database`] when the table came into existence
/// during this process run; file-backed stores are therefore seeded at most
/// once over their lifetime.
pub(crate) async fn seed_sample_books(pool: &SqlitePool) -> Result<()> {
    for book in sample_books() {
        let id = crate::storage::queries::insert_book(pool, &book).await?;
        debug!(id, title = %book.title, "seeded sample book");
    }
    info!("seeded demonstration books");
    Ok(())
}

fn sample_books() -> Vec<NewBook> {
    vec![
        NewBook {
            title: "Harry Potter and the Philosopher's Stone".to_string(),
            author: "J.K. Rowling".to_string(),
            isbn: "9780439708180".to_string(),
            year: 1997,
            category: "Fantasy".to_string(),
            status: BookStatus::Available,
            description: "First book in the Harry Potter series".to_string(),
        },
        NewBook {
            title: "The Lord of the Rings".to_string(),
            author: "J.R.R. Tolkien".to_string(),
            isbn: "9780547928210".to_string(),
            year: 1954,
            category: "Fantasy".to_string(),
            status: BookStatus::Available,
            description: "Epic fantasy novel".to_string(),
        },
        NewBook {
            title: "To Kill a Mockingbird".to_string(),
            author: "Harper Lee".to_string(),
            isbn: "9780446310789".to_string(),
            year: 1960,
            category: "Fiction".to_string(),
            status: BookStatus::Borrowed,
            description: "Classic American novel".to_string(),
        },
        NewBook {
            title: "1984".to_string(),
            author: "George Orwell".to_string(),
            isbn: "9780451524935".to_string(),
            year: 1949,
            category: "Dystopian".to_string(),
            status: BookStatus::Available,
            description: "Dystopian social science fiction".to_string(),
        },
        NewBook {
            title: "Pride and Prejudice".to_string(),
            author: "Jane Austen".to_string(),
            isbn: "9780141439518".to_string(),
            year: 1813,
            category: "Romance".to_string(),
            status: BookStatus::Available,
            description: "Classic romance novel".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    async fn raw_pool() -> SqlitePool {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:").expect("connect options");
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await
            .expect("in-memory pool")
    }

    async fn user_version(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(pool)
            .await
            .expect("user_version")
    }

    async fn has_isbn_column(pool: &SqlitePool) -> bool {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info('books') WHERE name = 'isbn'")
                .fetch_one(pool)
                .await
                .expect("table_info");
        count == 1
    }

    #[tokio::test]
    async fn fresh_store_is_created_at_current_version() {
        let pool = raw_pool().await;

        let outcome = run_migrations(&pool).await.expect("migrate");
        assert_eq!(outcome, MigrationOutcome::Created);
        assert!(outcome.table_was_created());
        assert_eq!(user_version(&pool).await, SCHEMA_VERSION);
        assert!(has_isbn_column(&pool).await);

        // Second run is a no-op
        let outcome = run_migrations(&pool).await.expect("re-migrate");
        assert_eq!(outcome, MigrationOutcome::UpToDate);
        assert!(!outcome.table_was_created());
    }

    #[tokio::test]
    async fn version_2_store_gains_isbn_without_losing_rows() {
        let pool = raw_pool().await;

        // Hand-build a version-2 store: no isbn column yet
        sqlx::query(
            r#"
            CREATE TABLE books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                year INTEGER NOT NULL,
                category TEXT NOT NULL,
                status TEXT NOT NULL,
                description TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .expect("v2 schema");
        sqlx::query(
            "INSERT INTO books (title, author, year, category, status, description) \
             VALUES ('Emma', 'Jane Austen', 1815, 'Romance', 'AVAILABLE', NULL)",
        )
        .execute(&pool)
        .await
        .expect("v2 row");
        sqlx::query("PRAGMA user_version = 2")
            .execute(&pool)
            .await
            .expect("stamp v2");

        let outcome = run_migrations(&pool).await.expect("migrate");
        assert_eq!(outcome, MigrationOutcome::Migrated { from: 2 });
        assert_eq!(user_version(&pool).await, SCHEMA_VERSION);
        assert!(has_isbn_column(&pool).await);

        // Pre-existing row survives, isbn defaulted to NULL
        let (title, isbn): (String, Option<String>) =
            sqlx::query_as("SELECT title, isbn FROM books")
                .fetch_one(&pool)
                .await
                .expect("migrated row");
        assert_eq!(title, "Emma");
        assert_eq!(isbn, None);
    }

    #[tokio::test]
    async fn unsupported_version_triggers_destructive_recreate() {
        let pool = raw_pool().await;

        sqlx::query("CREATE TABLE books (id INTEGER PRIMARY KEY, junk TEXT)")
            .execute(&pool)
            .await
            .expect("junk schema");
        sqlx::query("INSERT INTO books (junk) VALUES ('old data')")
            .execute(&pool)
            .await
            .expect("junk row");
        sqlx::query("PRAGMA user_version = 99")
            .execute(&pool)
            .await
            .expect("stamp unknown version");

        let outcome = run_migrations(&pool).await.expect("migrate");
        assert_eq!(outcome, MigrationOutcome::Recreated { from: 99 });
        assert!(outcome.table_was_created());
        assert_eq!(user_version(&pool).await, SCHEMA_VERSION);
        assert!(has_isbn_column(&pool).await);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(count, 0, "recreate discards all rows");
    }

    #[tokio::test]
    async fn version_0_with_existing_table_is_recreated() {
        let pool = raw_pool().await;

        // A table at version 0 predates any known migration path
        sqlx::query("CREATE TABLE books (id INTEGER PRIMARY KEY, title TEXT)")
            .execute(&pool)
            .await
            .expect("pre-versioning schema");

        let outcome = run_migrations(&pool).await.expect("migrate");
        assert_eq!(outcome, MigrationOutcome::Recreated { from: 0 });
        assert!(has_isbn_column(&pool).await);
    }

    #[tokio::test]
    async fn seeding_inserts_the_fixed_sample_set() {
        let pool = raw_pool().await;
        run_migrations(&pool).await.expect("migrate");

        seed_sample_books(&pool).await.expect("seed");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(count as usize, sample_books().len());
    }
}
