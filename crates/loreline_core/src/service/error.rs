//! Library store error kinds.

use crate::model::book::{BookId, ValidationError};
use crate::repo::snapshot_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type LibraryResult<T> = Result<T, LibraryError>;

/// Typed failure returned by every library store operation.
#[derive(Debug)]
pub enum LibraryError {
    /// Input shape or range is invalid.
    Validation(ValidationError),
    /// Shelf name is already taken, or blank after trimming.
    DuplicateShelf(String),
    /// A book with the same title and author (case-insensitive) exists.
    DuplicateBook { title: String, author: String },
    /// Attempt to delete one of the default shelves.
    ProtectedShelf(String),
    /// Reference to a shelf that does not exist.
    InvalidShelf(String),
    /// No book has this id.
    NotFound(BookId),
    /// Storage read or write failed; in-memory state was left unchanged.
    Persistence(RepoError),
}

impl LibraryError {
    /// Stable short code for log events and collaborator-side message lookup.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::DuplicateShelf(_) => "duplicate_shelf",
            Self::DuplicateBook { .. } => "duplicate_book",
            Self::ProtectedShelf(_) => "protected_shelf",
            Self::InvalidShelf(_) => "invalid_shelf",
            Self::NotFound(_) => "not_found",
            Self::Persistence(_) => "persistence",
        }
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateShelf(name) if name.is_empty() => {
                write!(f, "shelf name must not be blank")
            }
            Self::DuplicateShelf(name) => write!(f, "a shelf named `{name}` already exists"),
            Self::DuplicateBook { title, author } => {
                write!(f, "`{title}` by {author} is already in the library")
            }
            Self::ProtectedShelf(name) => write!(f, "default shelf `{name}` cannot be deleted"),
            Self::InvalidShelf(name) => write!(f, "unknown shelf: `{name}`"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::Persistence(err) => write!(f, "failed to persist library: {err}"),
        }
    }
}

impl Error for LibraryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for LibraryError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for LibraryError {
    fn from(value: RepoError) -> Self {
        Self::Persistence(value)
    }
}
