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


//! Database connection and management
//!
//! [`Database`] is the store handle: the composition root constructs exactly
//! one per catalog file and passes it (or its pool) to consumers. There is no
//! hidden global instance.
//!
//! # Concurrency
//! WAL journal mode lets readers proceed while a write is in flight; each
//! mutating statement is atomic, so a reader never observes a partially
//! applied write. Competing writers inside the process serialize on the
//! database lock, waiting up to the 30 s busy timeout. All operations are
//! async and may block on I/O — keep them off interaction-sensitive threads.
//!
//! # SQLite Configuration
//! - WAL mode for read/write concurrency
//! - Foreign keys enabled
//! - Normal synchronous mode (balance safety/speed)
//! - 30 s busy timeout

use crate::error::{CatalogError, Result};
use crate::storage::migrations;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Database handle — owns the connection pool for one catalog file
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    path: Option<PathBuf>, // None for in-memory databases
}

impl Database {
    /// Open (or create) a catalog at `database_path` and migrate it
    ///
    /// A store whose `books` table is created by this call is seeded with
    /// the fixed demonstration books; reopening an existing store never
    /// reseeds.
    ///
    /// # Errors
    /// Returns error if:
    /// - Parent directory doesn't exist and can't be created
    /// - Database file can't be opened
    /// - Migration fails (surfaced as `CatalogError::Initialization`)
    pub async fn new<P: AsRef<Path>>(database_path: P) -> Result<Self> {
        let path = database_path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let connection_string = format!("sqlite://{}?mode=rwc", path.display());
        let connect_opts = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|e| CatalogError::initialization(e.to_string()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .foreign_keys(true)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(30))
            .disable_statement_logging();

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(connect_opts)
            .await?;

        let db = Self {
            pool,
            path: Some(path.to_path_buf()),
        };
        let outcome = db.migrate().await?;
        if outcome.table_was_created() {
            migrations::seed_sample_books(&db.pool)
                .await
                .map_err(|e| CatalogError::initialization(e.to_string()))?;
        }

        Ok(db)
    }

    /// Create an in-memory catalog for testing
    ///
    /// Ephemeral stores are never seeded with demonstration books — they
    /// start empty so tests exercise the empty-store edge cases.
    ///
    /// # Errors
    /// Returns error if database creation or migration fails
    pub async fn new_in_memory() -> Result<Self> {
        let connect_opts = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| CatalogError::initialization(e.to_string()))?
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .foreign_keys(true)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .disable_statement_logging();

        // One connection: each in-memory connection is its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_opts)
            .await?;

        let db = Self { pool, path: None };
        db.migrate().await?;

        Ok(db)
    }

    /// Run schema migrations
    ///
    /// Migration failure is fatal to opening the store; there is no
    /// partial-success state.
    async fn migrate(&self) -> Result<migrations::MigrationOutcome> {
        migrations::run_migrations(&self.pool)
            .await
            .map_err(|e| CatalogError::initialization(e.to_string()))
    }

    /// Get reference to the connection pool
    ///
    /// The repository functions in [`crate::storage::queries`] take this.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get database file path
    ///
    /// Returns `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close database and release all connections
    ///
    /// Waits for active connections to finish before closing.
    pub async fn close(self) {
        self.pool.close().await;
    }

    /// Check database integrity
    ///
    /// Runs SQLite's full integrity check and returns true if the file is
    /// okay. Scans the entire database.
    pub async fn integrity_check(&self) -> Result<bool> {
        let result: String = sqlx::query_scalar("PRAGMA integrity_check")
            .fetch_one(&self.pool)
            .await?;
        Ok(result == "ok")
    }

    /// Get default catalog path for the platform
    ///
    /// - macOS: ~/Library/Application Support/BookVault/catalog.db
    /// - Linux: ~/.local/share/BookVault/catalog.db
    /// - Windows: %APPDATA%/BookVault/catalog.db
    pub fn get_default_path() -> PathBuf {
        #[cfg(target_os = "macos")]
        {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("BookVault")
                .join("catalog.db")
        }

        #[cfg(target_os = "linux")]
        {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("BookVault")
                .join("catalog.db")
        }

        #[cfg(target_os = "windows")]
        {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("BookVault").join("catalog.db")
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            PathBuf::from("./catalog.db")
        }
    }
}
