//! Library use-case layer.
//!
//! # Responsibility
//! - Hold the invariant-enforcing library state and its mutation rules.
//! - Wrap every mutation with persist-or-rollback semantics.
//! - Keep collaborators decoupled from storage details.

pub mod error;
pub mod library;
pub mod library_store;
pub mod session;
