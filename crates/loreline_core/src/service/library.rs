//! In-memory library state and its mutation rules.
//!
//! # Responsibility
//! - Own the shelf list and book list.
//! - Enforce every shelf/book invariant on mutation.
//!
//! # Invariants
//! - Shelf names are unique (case-sensitive); defaults are never removed.
//! - `(title, author)` is unique case-insensitively.
//! - Every book's shelf is in the shelf list.
//! - `start_date`/`end_date` are only ever set when currently `None`.
//!
//! Nothing here touches storage or the wall clock; callers pass `now`.

use crate::model::book::{
    validate_identity, validate_pages, validate_rating, Book, BookId, NewBook,
};
use crate::model::shelf::{is_default_shelf, READ, READING, TO_READ};
use crate::model::snapshot::{LibrarySnapshot, SnapshotError};
use crate::service::error::{LibraryError, LibraryResult};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Combined edit from a book details dialog.
///
/// Fields left as `None` are not touched. Applied in order: progress, move,
/// rating, opinion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDetailsUpdate {
    /// Requested page; clamped to `[0, pages]`, ignored unless on `Reading`.
    pub current_page: Option<u32>,
    pub shelf: Option<String>,
    pub rating: Option<u8>,
    /// Stored trimmed.
    pub opinion: Option<String>,
}

/// Shelves and books with invariant-preserving mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    shelves: Vec<String>,
    books: Vec<Book>,
}

impl Default for Library {
    fn default() -> Self {
        let LibrarySnapshot { shelves, books } = LibrarySnapshot::default();
        Self { shelves, books }
    }
}

impl Library {
    /// Builds a library from a snapshot after checking its invariants.
    pub fn from_snapshot(snapshot: LibrarySnapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        let LibrarySnapshot { shelves, books } = snapshot;
        Ok(Self { shelves, books })
    }

    pub fn to_snapshot(&self) -> LibrarySnapshot {
        LibrarySnapshot {
            shelves: self.shelves.clone(),
            books: self.books.clone(),
        }
    }

    /// Shelf names in creation order.
    pub fn shelves(&self) -> &[String] {
        &self.shelves
    }

    /// Books in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn has_shelf(&self, name: &str) -> bool {
        self.shelves.iter().any(|shelf| shelf == name)
    }

    pub fn get_book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Appends a new shelf and returns its trimmed name.
    pub fn add_shelf(&mut self, name: &str) -> LibraryResult<String> {
        let name = name.trim();
        if name.is_empty() || self.has_shelf(name) {
            return Err(LibraryError::DuplicateShelf(name.to_string()));
        }
        self.shelves.push(name.to_string());
        Ok(name.to_string())
    }

    /// Removes a custom shelf, moving its books to `To Read`.
    ///
    /// Returns how many books were reassigned.
    pub fn delete_shelf(&mut self, name: &str) -> LibraryResult<usize> {
        if is_default_shelf(name) {
            return Err(LibraryError::ProtectedShelf(name.to_string()));
        }
        if !self.has_shelf(name) {
            return Err(LibraryError::InvalidShelf(name.to_string()));
        }

        let mut moved = 0;
        for book in self.books.iter_mut().filter(|book| book.shelf == name) {
            book.shelf = TO_READ.to_string();
            moved += 1;
        }
        self.shelves.retain(|shelf| shelf != name);
        Ok(moved)
    }

    /// Adds a book stamped with `now`.
    pub fn add_book(&mut self, input: NewBook, now: DateTime<Utc>) -> LibraryResult<Book> {
        let title = input.title.trim();
        let author = input.author.trim();
        validate_identity(title, author)?;
        validate_pages(input.pages)?;
        if !self.has_shelf(&input.shelf) {
            return Err(LibraryError::InvalidShelf(input.shelf));
        }
        if self.books.iter().any(|book| book.same_work(title, author)) {
            return Err(LibraryError::DuplicateBook {
                title: title.to_string(),
                author: author.to_string(),
            });
        }

        let started = input.shelf == READING || input.shelf == READ;
        let book = Book {
            id: self.fresh_id(),
            title: title.to_string(),
            author: author.to_string(),
            pages: input.pages,
            current_page: 0,
            start_date: started.then_some(now),
            end_date: (input.shelf == READ).then_some(now),
            shelf: input.shelf,
            added_date: now,
            rating: 0,
            opinion: String::new(),
        };
        self.books.push(book.clone());
        Ok(book)
    }

    /// Records reading progress, clamped to the page count.
    ///
    /// Progress is only tracked on `Reading`; elsewhere the book is returned
    /// unchanged.
    pub fn update_progress(&mut self, id: BookId, current_page: u32) -> LibraryResult<Book> {
        let book = self.book_mut(id)?;
        if book.shelf == READING {
            book.current_page = current_page.min(book.pages);
        }
        Ok(book.clone())
    }

    /// Moves a book, setting `start_date`/`end_date` the first time it enters
    /// `Reading`/`Read`.
    pub fn move_book(
        &mut self,
        id: BookId,
        shelf: &str,
        now: DateTime<Utc>,
    ) -> LibraryResult<Book> {
        if !self.has_shelf(shelf) {
            // Lookup order matters: unknown books win over unknown shelves.
            self.book_mut(id)?;
            return Err(LibraryError::InvalidShelf(shelf.to_string()));
        }
        let book = self.book_mut(id)?;
        if shelf == READING && book.start_date.is_none() {
            book.start_date = Some(now);
        }
        if shelf == READ && book.end_date.is_none() {
            book.end_date = Some(now);
        }
        book.shelf = shelf.to_string();
        Ok(book.clone())
    }

    pub fn rate_book(&mut self, id: BookId, rating: u8) -> LibraryResult<Book> {
        let book = self.book_mut(id)?;
        validate_rating(rating)?;
        book.rating = rating;
        Ok(book.clone())
    }

    pub fn set_opinion(&mut self, id: BookId, text: &str) -> LibraryResult<Book> {
        let book = self.book_mut(id)?;
        book.opinion = text.trim().to_string();
        Ok(book.clone())
    }

    /// Removes a book and returns it.
    pub fn delete_book(&mut self, id: BookId) -> LibraryResult<Book> {
        let index = self
            .books
            .iter()
            .position(|book| book.id == id)
            .ok_or(LibraryError::NotFound(id))?;
        Ok(self.books.remove(index))
    }

    /// Applies a details-dialog edit. Stops at the first failing step; callers
    /// run this on a working copy so a failure discards the partial edit.
    pub fn apply_details(
        &mut self,
        id: BookId,
        update: &BookDetailsUpdate,
        now: DateTime<Utc>,
    ) -> LibraryResult<Book> {
        let mut book = self.book_mut(id)?.clone();
        if let Some(page) = update.current_page {
            book = self.update_progress(id, page)?;
        }
        if let Some(shelf) = update.shelf.as_deref() {
            book = self.move_book(id, shelf, now)?;
        }
        if let Some(rating) = update.rating {
            book = self.rate_book(id, rating)?;
        }
        if let Some(opinion) = update.opinion.as_deref() {
            book = self.set_opinion(id, opinion)?;
        }
        Ok(book)
    }

    fn book_mut(&mut self, id: BookId) -> LibraryResult<&mut Book> {
        self.books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(LibraryError::NotFound(id))
    }

    fn fresh_id(&self) -> BookId {
        loop {
            let id = Uuid::new_v4();
            if self.get_book(id).is_none() {
                return id;
            }
        }
    }
}
