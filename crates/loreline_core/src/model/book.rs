//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical tracked-book record stored in library snapshots.
//! - Validate per-book field constraints.
//!
//! # Invariants
//! - `id` is stable and never reused for another book.
//! - `title` and `author` are non-empty after trimming.
//! - `pages > 0`, `current_page <= pages`, `rating <= MAX_RATING`.
//! - `added_date` is set once at creation and never changes.
//! - `start_date` / `end_date` are set once and then preserved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a tracked book.
pub type BookId = Uuid;

/// Highest accepted rating. `0` means unrated.
pub const MAX_RATING: u8 = 5;

/// Field-level validation failures for books and book input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Book id is the nil UUID.
    NilId,
    /// Title is blank after trimming.
    EmptyTitle,
    /// Author is blank after trimming.
    EmptyAuthor,
    /// Page count must be a positive integer.
    ZeroPages,
    /// Rating is outside `0..=MAX_RATING`.
    RatingOutOfRange(u8),
    /// Stored progress exceeds the total page count.
    CurrentPageOutOfRange { current_page: u32, pages: u32 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "book id must not be nil"),
            Self::EmptyTitle => write!(f, "title must not be blank"),
            Self::EmptyAuthor => write!(f, "author must not be blank"),
            Self::ZeroPages => write!(f, "pages must be a positive integer"),
            Self::RatingOutOfRange(rating) => {
                write!(f, "rating {rating} is outside 0..={MAX_RATING}")
            }
            Self::CurrentPageOutOfRange {
                current_page,
                pages,
            } => write!(f, "current page ({current_page}) must be <= pages ({pages})"),
        }
    }
}

impl Error for ValidationError {}

/// Input for adding a book to the library.
///
/// `title` and `author` are trimmed by the store before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub pages: u32,
    pub shelf: String,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        pages: u32,
        shelf: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            pages,
            shelf: shelf.into(),
        }
    }
}

/// A tracked work on exactly one shelf.
///
/// Serialized with camelCase keys and RFC 3339 dates; this is the
/// `BookRecord` shape inside persisted snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Total page count.
    pub pages: u32,
    /// Progress marker. Only tracked while the book sits on `Reading`.
    pub current_page: u32,
    /// Name of the containing shelf.
    pub shelf: String,
    pub added_date: DateTime<Utc>,
    /// First time the book entered `Reading` (or was created on `Reading`/`Read`).
    pub start_date: Option<DateTime<Utc>>,
    /// First time the book entered `Read`.
    pub end_date: Option<DateTime<Utc>>,
    /// `0` = unrated, otherwise `1..=5`.
    pub rating: u8,
    pub opinion: String,
}

impl Book {
    /// Checks field constraints that do not depend on other books or shelves.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId);
        }
        validate_identity(&self.title, &self.author)?;
        validate_pages(self.pages)?;
        validate_rating(self.rating)?;
        if self.current_page > self.pages {
            return Err(ValidationError::CurrentPageOutOfRange {
                current_page: self.current_page,
                pages: self.pages,
            });
        }
        Ok(())
    }

    /// Case-insensitive `(title, author)` identity match.
    pub fn same_work(&self, title: &str, author: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
            && self.author.to_lowercase() == author.to_lowercase()
    }

    /// Returns whether the book currently sits on `shelf`.
    pub fn is_on(&self, shelf: &str) -> bool {
        self.shelf == shelf
    }
}

pub(crate) fn validate_identity(title: &str, author: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if author.trim().is_empty() {
        return Err(ValidationError::EmptyAuthor);
    }
    Ok(())
}

pub(crate) fn validate_pages(pages: u32) -> Result<(), ValidationError> {
    if pages == 0 {
        return Err(ValidationError::ZeroPages);
    }
    Ok(())
}

pub(crate) fn validate_rating(rating: u8) -> Result<(), ValidationError> {
    if rating > MAX_RATING {
        return Err(ValidationError::RatingOutOfRange(rating));
    }
    Ok(())
}
