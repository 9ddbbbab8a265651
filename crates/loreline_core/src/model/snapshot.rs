//! Persisted library snapshot.
//!
//! # Responsibility
//! - Define the full shelves+books unit written to and read from storage.
//! - Check cross-record invariants on data crossing the storage boundary.
//!
//! # Invariants
//! - All default shelves are present; shelf names are unique and non-blank.
//! - Every book references a shelf in `shelves`.
//! - Book ids are unique; `(title, author)` is unique case-insensitively.

use crate::model::book::{Book, BookId, ValidationError};
use crate::model::shelf::{default_shelves, DEFAULT_SHELVES};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Full persisted state: `{ "shelves": [...], "books": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    pub shelves: Vec<String>,
    pub books: Vec<Book>,
}

impl Default for LibrarySnapshot {
    /// First-run state: the three default shelves and no books.
    fn default() -> Self {
        Self {
            shelves: default_shelves(),
            books: Vec::new(),
        }
    }
}

/// Cross-record invariant violations found in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    MissingDefaultShelf(&'static str),
    BlankShelfName,
    DuplicateShelf(String),
    DuplicateBookId(BookId),
    DuplicateBook(BookId),
    UnknownShelf { book_id: BookId, shelf: String },
    InvalidBook {
        book_id: BookId,
        source: ValidationError,
    },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDefaultShelf(name) => write!(f, "default shelf `{name}` is missing"),
            Self::BlankShelfName => write!(f, "shelf name must not be blank"),
            Self::DuplicateShelf(name) => write!(f, "shelf `{name}` appears more than once"),
            Self::DuplicateBookId(id) => write!(f, "book id {id} appears more than once"),
            Self::DuplicateBook(id) => {
                write!(f, "book {id} duplicates the title/author of an earlier book")
            }
            Self::UnknownShelf { book_id, shelf } => {
                write!(f, "book {book_id} references unknown shelf `{shelf}`")
            }
            Self::InvalidBook { book_id, source } => write!(f, "book {book_id}: {source}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidBook { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl LibrarySnapshot {
    /// Validates every snapshot invariant, returning the first violation.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        for name in DEFAULT_SHELVES {
            if !self.shelves.iter().any(|shelf| shelf == name) {
                return Err(SnapshotError::MissingDefaultShelf(name));
            }
        }

        let mut shelf_names = HashSet::with_capacity(self.shelves.len());
        for shelf in &self.shelves {
            if shelf.trim().is_empty() {
                return Err(SnapshotError::BlankShelfName);
            }
            if !shelf_names.insert(shelf.as_str()) {
                return Err(SnapshotError::DuplicateShelf(shelf.clone()));
            }
        }

        let mut ids = HashSet::with_capacity(self.books.len());
        let mut works = HashSet::with_capacity(self.books.len());
        for book in &self.books {
            book.validate().map_err(|source| SnapshotError::InvalidBook {
                book_id: book.id,
                source,
            })?;
            if !ids.insert(book.id) {
                return Err(SnapshotError::DuplicateBookId(book.id));
            }
            if !works.insert((book.title.to_lowercase(), book.author.to_lowercase())) {
                return Err(SnapshotError::DuplicateBook(book.id));
            }
            if !shelf_names.contains(book.shelf.as_str()) {
                return Err(SnapshotError::UnknownShelf {
                    book_id: book.id,
                    shelf: book.shelf.clone(),
                });
            }
        }

        Ok(())
    }
}
