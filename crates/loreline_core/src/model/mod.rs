//! Book-tracking domain model.
//!
//! # Responsibility
//! - Define books, shelves and the persisted snapshot shape.
//! - Keep field and cross-record validation next to the data it guards.
//!
//! # Invariants
//! - Every book is identified by a stable `BookId`.
//! - Every book sits on exactly one existing shelf.

pub mod book;
pub mod shelf;
pub mod snapshot;
