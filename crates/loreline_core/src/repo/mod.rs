//! Persistence adapter for the library snapshot.
//!
//! # Responsibility
//! - Define the load/save contract used by the library store.
//! - Keep storage and serialization details out of the store.
//!
//! # Invariants
//! - Snapshots are written wholesale; there are no partial writes.
//! - Invalid persisted state is rejected, never masked.

pub mod snapshot_repo;
