//! Shelf names and the built-in default set.
//!
//! Shelves are plain names; uniqueness is case-sensitive. The three defaults
//! always exist and cannot be deleted.

/// Default shelf for unread books and reassignment target on shelf deletion.
pub const TO_READ: &str = "To Read";
/// Default shelf where reading progress is tracked.
pub const READING: &str = "Reading";
/// Default shelf for finished books.
pub const READ: &str = "Read";

/// Default shelves in display order.
pub const DEFAULT_SHELVES: [&str; 3] = [TO_READ, READING, READ];

/// Returns whether `name` is one of the protected default shelves.
pub fn is_default_shelf(name: &str) -> bool {
    DEFAULT_SHELVES.contains(&name)
}

/// Owned copy of the default shelf list, used to seed a fresh library.
pub fn default_shelves() -> Vec<String> {
    DEFAULT_SHELVES.iter().map(|name| (*name).to_string()).collect()
}
