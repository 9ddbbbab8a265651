//! Transient UI selection state.
//!
//! Tracks the selected shelf and an in-progress rating edit. Never persisted;
//! a fresh session starts on `Reading` with no edit open.

use crate::model::book::{validate_rating, Book, BookId};
use crate::model::shelf::READING;
use crate::service::error::LibraryResult;

/// Rating picked in an open details dialog but not yet saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingDraft {
    pub book_id: BookId,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    current_shelf: String,
    editing: Option<RatingDraft>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_shelf: READING.to_string(),
            editing: None,
        }
    }
}

impl SessionState {
    /// Shelf whose books are on display.
    pub fn current_shelf(&self) -> &str {
        &self.current_shelf
    }

    /// Open rating edit, if any.
    pub fn editing(&self) -> Option<&RatingDraft> {
        self.editing.as_ref()
    }

    pub(crate) fn select(&mut self, shelf: &str) {
        self.current_shelf = shelf.to_string();
    }

    pub(crate) fn begin_edit(&mut self, book: &Book) -> RatingDraft {
        let draft = RatingDraft {
            book_id: book.id,
            rating: book.rating,
        };
        self.editing = Some(draft);
        draft
    }

    /// Updates the open draft. Returns `false` when no edit is open.
    pub(crate) fn set_draft_rating(&mut self, rating: u8) -> LibraryResult<bool> {
        validate_rating(rating)?;
        match self.editing.as_mut() {
            Some(draft) => {
                draft.rating = rating;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub(crate) fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub(crate) fn on_shelf_deleted(&mut self, name: &str) {
        if self.current_shelf == name {
            self.current_shelf = READING.to_string();
        }
    }

    pub(crate) fn on_book_gone(&mut self, id: BookId) {
        if self.editing.is_some_and(|draft| draft.book_id == id) {
            self.editing = None;
        }
    }
}
