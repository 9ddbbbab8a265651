//! Core of the Loreline book tracker.
//! This crate owns the shelf/book invariants, their persistence, and the
//! views derived from them. UI code talks to it through `LibraryStore`.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use clock::{Clock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookId, NewBook, ValidationError, MAX_RATING};
pub use model::shelf::{is_default_shelf, DEFAULT_SHELVES, READ, READING, TO_READ};
pub use model::snapshot::{LibrarySnapshot, SnapshotError};
pub use repo::snapshot_repo::{
    MemorySnapshotRepository, RepoError, RepoResult, SnapshotRepository,
    SqliteSnapshotRepository, DEFAULT_SLOT_KEY,
};
pub use service::error::{LibraryError, LibraryResult};
pub use service::library::{BookDetailsUpdate, Library};
pub use service::library_store::LibraryStore;
pub use service::session::{RatingDraft, SessionState};
pub use view::projection::{
    books_on_shelf, filter_books, rating_mood, shelf_counts, shelf_list, ShelfCount,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
