// BookVault - Personal Book Catalog
// Copyright (C) 2025 BookVault contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! ISBN metadata lookup adapter
//!
//! Translates Open Library responses into [`crate::storage::models::NewBook`]
//! drafts. The adapter produces drafts only; persisting them is the store's
//! job, and every failure here is recoverable by falling back to manual
//! entry.

pub mod client;
pub mod metadata;

// Re-export commonly used types
pub use client::{OpenLibraryClient, OPEN_LIBRARY_BASE_URL};
pub use metadata::{to_book_draft, AuthorRef, BookMetadata, CoverLinks, PublisherRef, SubjectRef};
