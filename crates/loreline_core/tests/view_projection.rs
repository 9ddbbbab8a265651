use chrono::{TimeZone, Utc};
use loreline_core::{
    books_on_shelf, filter_books, shelf_counts, shelf_list, Book, ShelfCount,
};
use uuid::Uuid;

fn book(title: &str, author: &str, shelf: &str) -> Book {
    Book {
        id: Uuid::new_v4(),
        title: title.to_string(),
        author: author.to_string(),
        pages: 100,
        current_page: 0,
        shelf: shelf.to_string(),
        added_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        start_date: None,
        end_date: None,
        rating: 0,
        opinion: String::new(),
    }
}

fn shelf_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

fn sample_books() -> Vec<Book> {
    vec![
        book("Dune", "Frank Herbert", "Reading"),
        book("Emma", "Jane Austen", "To Read"),
        book("Persuasion", "Jane Austen", "Reading"),
        book("Solaris", "Stanislaw Lem", "Classics"),
    ]
}

#[test]
fn books_on_shelf_keeps_insertion_order() {
    let books = sample_books();
    let titles: Vec<&str> = books_on_shelf(&books, "Reading")
        .into_iter()
        .map(|book| book.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Dune", "Persuasion"]);
    assert!(books_on_shelf(&books, "reading").is_empty());
}

#[test]
fn filter_with_empty_term_is_identity() {
    let books = sample_books();
    let all: Vec<&Book> = books.iter().collect();
    assert_eq!(filter_books(all.clone(), ""), all);
    assert_eq!(filter_books(all.clone(), "   "), all);
}

#[test]
fn filter_matches_title_or_author_case_insensitively() {
    let books = sample_books();
    let titles: Vec<&str> = filter_books(&books, "AUSTEN")
        .into_iter()
        .map(|book| book.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Emma", "Persuasion"]);

    let titles: Vec<&str> = filter_books(&books, "sol")
        .into_iter()
        .map(|book| book.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Solaris"]);
}

#[test]
fn filter_is_idempotent() {
    let books = sample_books();
    for term in ["", "an", "Herbert", "zzz"] {
        let once = filter_books(&books, term);
        let twice = filter_books(once.clone(), term);
        assert_eq!(once, twice, "term `{term}`");
    }
}

#[test]
fn shelf_list_places_defaults_first_then_creation_order() {
    let shelves = shelf_names(&["To Read", "Reading", "Read", "Classics", "Abandoned"]);
    assert_eq!(
        shelf_list(&shelves),
        vec!["To Read", "Reading", "Read", "Classics", "Abandoned"]
    );
}

#[test]
fn shelf_counts_report_membership() {
    let shelves = shelf_names(&["To Read", "Reading", "Read", "Classics", "Empty"]);
    let books = sample_books();

    assert_eq!(
        shelf_counts(&shelves, &books),
        vec![
            ShelfCount { name: "To Read", books: 1, is_default: true },
            ShelfCount { name: "Reading", books: 2, is_default: true },
            ShelfCount { name: "Read", books: 0, is_default: true },
            ShelfCount { name: "Classics", books: 1, is_default: false },
            ShelfCount { name: "Empty", books: 0, is_default: false },
        ]
    );
}
