//! Library store: the only gateway for reading or changing library state.
//!
//! # Responsibility
//! - Own the in-memory library and the session selection state.
//! - Persist the full snapshot after every mutation.
//! - Serve read-only views to collaborators.
//!
//! # Invariants
//! - A mutation is visible only after its snapshot was saved. On any failure
//!   the live state stays equal to the last persisted snapshot.
//! - Session state is updated only after the matching mutation succeeded.
//! - Titles, authors and opinions are never written to logs.

use crate::clock::{Clock, SystemClock};
use crate::model::book::{Book, BookId, NewBook};
use crate::model::snapshot::LibrarySnapshot;
use crate::repo::snapshot_repo::{RepoError, SnapshotRepository};
use crate::service::error::{LibraryError, LibraryResult};
use crate::service::library::{BookDetailsUpdate, Library};
use crate::service::session::{RatingDraft, SessionState};
use crate::view::projection::{self, ShelfCount};
use chrono::{DateTime, Utc};
use log::{error, info, warn};

/// Single source of truth for shelves and books.
pub struct LibraryStore<R: SnapshotRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
    library: Library,
    session: SessionState,
}

impl<R: SnapshotRepository> LibraryStore<R, SystemClock> {
    /// Opens the store with wall-clock timestamps.
    pub fn open_with_system_clock(repo: R) -> LibraryResult<Self> {
        Self::open(repo, SystemClock)
    }
}

impl<R: SnapshotRepository, C: Clock> LibraryStore<R, C> {
    /// Loads the persisted snapshot once, or starts from the default shelves.
    pub fn open(repo: R, clock: C) -> LibraryResult<Self> {
        let snapshot = repo.load_or_default().inspect_err(|err| {
            error!("event=library_open module=service status=error error={err}");
        })?;
        let library = Library::from_snapshot(snapshot)
            .map_err(|err| LibraryError::Persistence(RepoError::InvalidSnapshot(err)))?;
        info!(
            "event=library_open module=service status=ok shelves={} books={}",
            library.shelves().len(),
            library.books().len()
        );
        Ok(Self {
            repo,
            clock,
            library,
            session: SessionState::default(),
        })
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Copy of the state as last persisted.
    pub fn snapshot(&self) -> LibrarySnapshot {
        self.library.to_snapshot()
    }

    /// Shelf names, defaults first.
    pub fn shelf_list(&self) -> Vec<&str> {
        projection::shelf_list(self.library.shelves())
    }

    pub fn books_on_shelf(&self, shelf: &str) -> Vec<&Book> {
        projection::books_on_shelf(self.library.books(), shelf)
    }

    pub fn shelf_counts(&self) -> Vec<ShelfCount<'_>> {
        projection::shelf_counts(self.library.shelves(), self.library.books())
    }

    pub fn get_book(&self, id: BookId) -> Option<&Book> {
        self.library.get_book(id)
    }

    /// Books on the selected shelf matching `search_term`.
    pub fn current_view(&self, search_term: &str) -> Vec<&Book> {
        projection::filter_books(
            self.books_on_shelf(self.session.current_shelf()),
            search_term,
        )
    }

    pub fn add_shelf(&mut self, name: &str) -> LibraryResult<String> {
        self.commit("add_shelf", |library, _| library.add_shelf(name))
    }

    /// Deletes a custom shelf; its books move to `To Read`. Returns how many
    /// books were moved.
    pub fn delete_shelf(&mut self, name: &str) -> LibraryResult<usize> {
        let moved = self.commit("delete_shelf", |library, _| library.delete_shelf(name))?;
        self.session.on_shelf_deleted(name);
        Ok(moved)
    }

    pub fn add_book(&mut self, input: NewBook) -> LibraryResult<Book> {
        self.commit("add_book", move |library, now| library.add_book(input, now))
    }

    /// Records progress for a book on `Reading`, clamped to `[0, pages]`.
    pub fn update_book_progress(&mut self, id: BookId, current_page: u32) -> LibraryResult<Book> {
        self.commit("update_book_progress", |library, _| {
            library.update_progress(id, current_page)
        })
    }

    pub fn move_book(&mut self, id: BookId, shelf: &str) -> LibraryResult<Book> {
        self.commit("move_book", |library, now| library.move_book(id, shelf, now))
    }

    pub fn rate_book(&mut self, id: BookId, rating: u8) -> LibraryResult<Book> {
        self.commit("rate_book", |library, _| library.rate_book(id, rating))
    }

    pub fn set_opinion(&mut self, id: BookId, text: &str) -> LibraryResult<Book> {
        self.commit("set_opinion", |library, _| library.set_opinion(id, text))
    }

    pub fn delete_book(&mut self, id: BookId) -> LibraryResult<Book> {
        let removed = self.commit("delete_book", |library, _| library.delete_book(id))?;
        self.session.on_book_gone(id);
        Ok(removed)
    }

    /// Saves a details-dialog edit as one persisted change and closes any
    /// rating draft for the book.
    pub fn save_book_details(
        &mut self,
        id: BookId,
        update: &BookDetailsUpdate,
    ) -> LibraryResult<Book> {
        let saved = self.commit("save_book_details", |library, now| {
            library.apply_details(id, update, now)
        })?;
        self.session.on_book_gone(id);
        Ok(saved)
    }

    pub fn select_shelf(&mut self, name: &str) -> LibraryResult<()> {
        if !self.library.has_shelf(name) {
            return Err(LibraryError::InvalidShelf(name.to_string()));
        }
        self.session.select(name);
        Ok(())
    }

    /// Opens a rating draft seeded from the stored rating.
    pub fn begin_edit(&mut self, id: BookId) -> LibraryResult<RatingDraft> {
        let book = self.library.get_book(id).ok_or(LibraryError::NotFound(id))?;
        Ok(self.session.begin_edit(book))
    }

    /// Changes the open draft rating. Returns `false` when no edit is open.
    pub fn set_draft_rating(&mut self, rating: u8) -> LibraryResult<bool> {
        self.session.set_draft_rating(rating)
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel_edit();
    }

    /// Runs `mutate` on a working copy, persists it, then swaps it in.
    fn commit<T>(
        &mut self,
        op: &'static str,
        mutate: impl FnOnce(&mut Library, DateTime<Utc>) -> LibraryResult<T>,
    ) -> LibraryResult<T> {
        let now = self.clock.now();
        let mut working = self.library.clone();

        let value = mutate(&mut working, now).inspect_err(|err| {
            warn!(
                "event=library_mutation module=service status=rejected op={op} error_code={}",
                err.code()
            );
        })?;

        if let Err(err) = self.repo.save(&working.to_snapshot()) {
            error!(
                "event=library_mutation module=service status=error op={op} error_code=persistence error={err}"
            );
            return Err(LibraryError::Persistence(err));
        }

        self.library = working;
        info!(
            "event=library_mutation module=service status=ok op={op} shelves={} books={}",
            self.library.shelves().len(),
            self.library.books().len()
        );
        Ok(value)
    }
}
