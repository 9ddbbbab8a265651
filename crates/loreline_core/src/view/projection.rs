//! Shelf and book list projections.
//!
//! # Invariants
//! - Book lists keep insertion order.
//! - Shelf lists put defaults first (`To Read`, `Reading`, `Read`), then
//!   custom shelves in creation order.
//! - An empty (or whitespace-only) search term is the identity filter.

use crate::model::book::Book;
use crate::model::shelf::{is_default_shelf, DEFAULT_SHELVES};

/// Shelf row for display with its member count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfCount<'a> {
    pub name: &'a str,
    pub books: usize,
    /// Default shelves render without a delete control.
    pub is_default: bool,
}

/// Books on `shelf`, in insertion order.
pub fn books_on_shelf<'a>(books: &'a [Book], shelf: &str) -> Vec<&'a Book> {
    books.iter().filter(|book| book.is_on(shelf)).collect()
}

/// Books whose title or author contains `search_term`, case-insensitively.
pub fn filter_books<'a, I>(books: I, search_term: &str) -> Vec<&'a Book>
where
    I: IntoIterator<Item = &'a Book>,
{
    let needle = search_term.trim().to_lowercase();
    if needle.is_empty() {
        return books.into_iter().collect();
    }
    books
        .into_iter()
        .filter(|book| {
            book.title.to_lowercase().contains(&needle)
                || book.author.to_lowercase().contains(&needle)
        })
        .collect()
}

/// All shelf names, defaults first in fixed order.
pub fn shelf_list(shelves: &[String]) -> Vec<&str> {
    let defaults = DEFAULT_SHELVES
        .iter()
        .filter_map(|name| shelves.iter().find(|shelf| shelf.as_str() == *name));
    let custom = shelves.iter().filter(|shelf| !is_default_shelf(shelf));
    defaults.chain(custom).map(String::as_str).collect()
}

/// Shelf rows in `shelf_list` order with membership counts.
pub fn shelf_counts<'a>(shelves: &'a [String], books: &[Book]) -> Vec<ShelfCount<'a>> {
    shelf_list(shelves)
        .into_iter()
        .map(|name| ShelfCount {
            name,
            books: books.iter().filter(|book| book.is_on(name)).count(),
            is_default: is_default_shelf(name),
        })
        .collect()
}

/// Mood glyph shown beside a star rating; `None` when unrated or out of range.
pub fn rating_mood(rating: u8) -> Option<&'static str> {
    match rating {
        1 => Some("😞"),
        2 => Some("😕"),
        3 => Some("😐"),
        4 => Some("🙂"),
        5 => Some("😊"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{rating_mood, shelf_list};

    #[test]
    fn shelf_list_reorders_defaults_ahead_of_custom() {
        let shelves = vec![
            "Favorites".to_string(),
            "Read".to_string(),
            "To Read".to_string(),
            "Abandoned".to_string(),
            "Reading".to_string(),
        ];
        assert_eq!(
            shelf_list(&shelves),
            vec!["To Read", "Reading", "Read", "Favorites", "Abandoned"]
        );
    }

    #[test]
    fn rating_mood_is_blank_for_unrated() {
        assert_eq!(rating_mood(0), None);
        assert_eq!(rating_mood(5), Some("😊"));
        assert_eq!(rating_mood(6), None);
    }
}
