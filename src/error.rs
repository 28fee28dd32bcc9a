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


//! Error types for BookVault
//!
//! Errors are split by concern: [`CatalogError`] covers everything on the
//! storage side (validation, I/O, migration, row decoding), while
//! [`LookupError`] covers the ISBN metadata collaborator. Lookup failures are
//! always recoverable by the caller — the usual fallback is manual entry —
//! so they never feed into `CatalogError`.
//!
//! A missed update/delete target is reported through
//! [`crate::storage::models::WriteOutcome::NotFound`], not through an error.

use thiserror::Error;

/// Result type alias using our CatalogError type
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Error type for the catalog storage layer
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Caller-supplied data violates a required-field invariant.
    /// Detected before any SQL runs; nothing is persisted.
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Underlying I/O fault during a store operation. The operation has no
    /// effect; the caller decides whether to retry.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// A persisted row cannot be decoded into a valid `Book` (unrecognized
    /// status value). Fatal for a directly addressed read; skipped and
    /// logged when scanning the whole table.
    #[error("corrupt record {id}: unrecognized status '{value}'")]
    DataCorruption { id: i64, value: String },

    /// Schema setup or migration failed; the store cannot be opened.
    #[error("store initialization failed: {0}")]
    Initialization(String),

    /// Filesystem error outside the database engine (creating the parent
    /// directory for the store file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Create a Validation error for a named field
    pub fn validation<S: Into<String>>(field: &'static str, message: S) -> Self {
        CatalogError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create an Initialization error
    pub fn initialization<S: Into<String>>(message: S) -> Self {
        CatalogError::Initialization(message.into())
    }

    /// Get user-friendly error message suitable for display
    ///
    /// Technical detail is omitted where it would not help the user act.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Validation { field, message } => {
                format!("Please check the {field} field: {message}")
            }
            CatalogError::DataCorruption { id, .. } => {
                format!("Book record {id} is damaged and could not be read.")
            }
            CatalogError::Initialization(_) => {
                "The book catalog could not be opened. The database file may be damaged."
                    .to_string()
            }
            CatalogError::Storage(_) | CatalogError::Io(_) => {
                "The book catalog could not be accessed. Please try again.".to_string()
            }
        }
    }
}

/// Error type for the ISBN metadata lookup adapter
///
/// Every variant is recoverable: the caller falls back to manual entry.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The collaborator responded but has no record for this ISBN
    #[error("no metadata found for ISBN {0}")]
    NotFound(String),

    /// Network failure or an HTTP error status
    #[error("metadata request failed: {message}")]
    Transport {
        message: String,
        /// HTTP status code if the request got far enough to have one
        status_code: Option<u16>,
    },

    /// The collaborator responded with a payload we could not decode
    #[error("unexpected metadata response: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Transport {
            status_code: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl LookupError {
    /// Create a Transport error from an HTTP status code
    pub fn transport_status(status: u16) -> Self {
        LookupError::Transport {
            message: format!("server responded with status {status}"),
            status_code: Some(status),
        }
    }
}
