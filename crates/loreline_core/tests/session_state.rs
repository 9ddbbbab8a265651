use loreline_core::{
    BookDetailsUpdate, LibraryError, LibraryStore, MemorySnapshotRepository, NewBook,
    RatingDraft, ValidationError,
};

fn open_store() -> LibraryStore<MemorySnapshotRepository> {
    LibraryStore::open_with_system_clock(MemorySnapshotRepository::new()).unwrap()
}

#[test]
fn session_starts_on_reading_without_edit() {
    let store = open_store();
    assert_eq!(store.session().current_shelf(), "Reading");
    assert!(store.session().editing().is_none());
}

#[test]
fn select_shelf_requires_known_shelf() {
    let mut store = open_store();
    store.select_shelf("To Read").unwrap();
    assert_eq!(store.session().current_shelf(), "To Read");

    let err = store.select_shelf("Wishlist").unwrap_err();
    assert!(matches!(err, LibraryError::InvalidShelf(ref name) if name == "Wishlist"));
    assert_eq!(store.session().current_shelf(), "To Read");
}

#[test]
fn deleting_selected_shelf_resets_selection_to_reading() {
    let mut store = open_store();
    store.add_shelf("Wishlist").unwrap();
    store.add_shelf("Loans").unwrap();

    store.select_shelf("Wishlist").unwrap();
    store.delete_shelf("Loans").unwrap();
    assert_eq!(store.session().current_shelf(), "Wishlist");

    store.delete_shelf("Wishlist").unwrap();
    assert_eq!(store.session().current_shelf(), "Reading");
}

#[test]
fn current_view_filters_selected_shelf() {
    let mut store = open_store();
    store
        .add_book(NewBook::new("Dune", "Frank Herbert", 412, "Reading"))
        .unwrap();
    store
        .add_book(NewBook::new("Hyperion", "Dan Simmons", 482, "Reading"))
        .unwrap();
    store
        .add_book(NewBook::new("Dune Messiah", "Frank Herbert", 256, "To Read"))
        .unwrap();

    let titles: Vec<&str> = store
        .current_view("herbert")
        .into_iter()
        .map(|book| book.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Dune"]);

    store.select_shelf("To Read").unwrap();
    assert_eq!(store.current_view("").len(), 1);
    assert!(store.current_view("simmons").is_empty());
}

#[test]
fn rating_draft_is_seeded_and_updated() {
    let mut store = open_store();
    let book = store
        .add_book(NewBook::new("Dune", "Herbert", 412, "Reading"))
        .unwrap();
    store.rate_book(book.id, 2).unwrap();

    let draft = store.begin_edit(book.id).unwrap();
    assert_eq!(
        draft,
        RatingDraft {
            book_id: book.id,
            rating: 2
        }
    );

    assert!(store.set_draft_rating(4).unwrap());
    assert_eq!(store.session().editing().unwrap().rating, 4);
    assert_eq!(store.get_book(book.id).unwrap().rating, 2);

    assert!(matches!(
        store.set_draft_rating(7),
        Err(LibraryError::Validation(ValidationError::RatingOutOfRange(7)))
    ));
    assert_eq!(store.session().editing().unwrap().rating, 4);
}

#[test]
fn draft_rating_without_open_edit_is_a_no_op() {
    let mut store = open_store();
    assert!(!store.set_draft_rating(3).unwrap());
    assert!(store.session().editing().is_none());
}

#[test]
fn saving_details_closes_the_draft() {
    let mut store = open_store();
    let book = store
        .add_book(NewBook::new("Dune", "Herbert", 412, "Reading"))
        .unwrap();
    store.begin_edit(book.id).unwrap();
    store.set_draft_rating(5).unwrap();
    let rating = store.session().editing().unwrap().rating;

    let update = BookDetailsUpdate {
        rating: Some(rating),
        ..BookDetailsUpdate::default()
    };
    let saved = store.save_book_details(book.id, &update).unwrap();

    assert_eq!(saved.rating, 5);
    assert!(store.session().editing().is_none());
}

#[test]
fn deleting_edited_book_clears_draft_and_cancel_works() {
    let mut store = open_store();
    let dune = store
        .add_book(NewBook::new("Dune", "Herbert", 412, "Reading"))
        .unwrap();
    let emma = store
        .add_book(NewBook::new("Emma", "Austen", 474, "Read"))
        .unwrap();

    store.begin_edit(dune.id).unwrap();
    store.delete_book(emma.id).unwrap();
    assert!(store.session().editing().is_some());
    store.delete_book(dune.id).unwrap();
    assert!(store.session().editing().is_none());

    let missing = dune.id;
    assert!(matches!(
        store.begin_edit(missing),
        Err(LibraryError::NotFound(id)) if id == missing
    ));

    let again = store
        .add_book(NewBook::new("Dune", "Herbert", 412, "Reading"))
        .unwrap();
    store.begin_edit(again.id).unwrap();
    store.cancel_edit();
    assert!(store.session().editing().is_none());
}
