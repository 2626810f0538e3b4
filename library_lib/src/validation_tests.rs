use super::*;

fn failures(result: Result<(), LibraryError>) -> Vec<ValidationFailure> {
    match result {
        Err(LibraryError::Validation(failures)) => failures,
        other => panic!("expected validation failure, got {:?}", other),
    }
}

fn creation(title: Option<&str>, description: Option<&str>) -> BookForCreation {
    BookForCreation {
        title: title.map(str::to_string),
        description: description.map(str::to_string),
    }
}

fn update(title: Option<&str>, description: Option<&str>) -> BookForUpdate {
    BookForUpdate {
        title: title.map(str::to_string),
        description: description.map(str::to_string),
    }
}

// -- Search / genre filters --

#[test]
fn search_trimmed() {
    assert_eq!(
        validate_search(Some("  king  ")).unwrap(),
        Some("king".to_string())
    );
}

#[test]
fn search_blank_is_no_filter() {
    assert_eq!(validate_search(Some("   ")).unwrap(), None);
    assert_eq!(validate_search(None).unwrap(), None);
}

#[test]
fn search_control_chars_stripped() {
    assert_eq!(
        validate_search(Some("ki\u{0007}ng")).unwrap(),
        Some("king".to_string())
    );
}

#[test]
fn search_too_long() {
    let long = "a".repeat(MAX_SEARCH_LENGTH + 1);
    assert!(matches!(
        validate_search(Some(&long)),
        Err(LibraryError::BadRequest(_))
    ));
}

#[test]
fn search_at_limit() {
    let exact = "a".repeat(MAX_SEARCH_LENGTH);
    assert_eq!(validate_search(Some(&exact)).unwrap(), Some(exact));
}

#[test]
fn genre_kept_verbatim_apart_from_trim() {
    assert_eq!(
        validate_genre(Some(" Science Fiction ")).unwrap(),
        Some("Science Fiction".to_string())
    );
}

// -- Book creation --

#[test]
fn creation_valid() {
    assert!(validate_book_for_creation(&creation(Some("It"), Some("A clown"))).is_ok());
}

#[test]
fn creation_description_optional() {
    assert!(validate_book_for_creation(&creation(Some("It"), None)).is_ok());
}

#[test]
fn creation_missing_title() {
    let f = failures(validate_book_for_creation(&creation(None, Some("desc"))));
    assert_eq!(f, vec![ValidationFailure::new("title", "Please fill out the title")]);
}

#[test]
fn creation_blank_title() {
    let f = failures(validate_book_for_creation(&creation(Some("  "), None)));
    assert_eq!(f[0].field, "title");
}

#[test]
fn creation_title_too_long() {
    let long = "t".repeat(MAX_TITLE_LENGTH + 1);
    let f = failures(validate_book_for_creation(&creation(Some(&long), None)));
    assert_eq!(f, vec![ValidationFailure::new("title", "Max 500 characters")]);
}

#[test]
fn creation_title_limit_counts_characters() {
    let exact = "é".repeat(MAX_TITLE_LENGTH);
    assert!(validate_book_for_creation(&creation(Some(&exact), None)).is_ok());
}

#[test]
fn creation_description_too_long() {
    let long = "d".repeat(MAX_DESCRIPTION_LENGTH + 1);
    let f = failures(validate_book_for_creation(&creation(Some("t"), Some(&long))));
    assert_eq!(f[0].field, "description");
}

#[test]
fn creation_description_equal_to_title() {
    let f = failures(validate_book_for_creation(&creation(Some("Same"), Some("Same"))));
    assert_eq!(
        f,
        vec![ValidationFailure::new(
            "BookForCreation",
            "description can not be the same as title"
        )]
    );
}

// -- Book update --

#[test]
fn update_valid() {
    assert!(validate_book_for_update(&update(Some("It"), Some("A clown"))).is_ok());
}

#[test]
fn update_requires_description() {
    let f = failures(validate_book_for_update(&update(Some("It"), None)));
    assert_eq!(
        f,
        vec![ValidationFailure::new(
            "description",
            "Please fill out the description"
        )]
    );
}

#[test]
fn update_collects_every_failure() {
    let f = failures(validate_book_for_update(&update(None, None)));
    let fields: Vec<&str> = f.iter().map(|f| f.field.as_str()).collect();
    assert_eq!(fields, vec!["title", "description"]);
}

#[test]
fn update_description_equal_to_title() {
    let f = failures(validate_book_for_update(&update(Some("X"), Some("X"))));
    assert_eq!(f[0].field, "BookForUpdate");
}

// -- Author creation --

#[test]
fn author_without_books_is_valid() {
    assert!(validate_author_for_creation(&AuthorForCreation::default()).is_ok());
}

#[test]
fn author_nested_book_failures_are_prefixed() {
    let author = AuthorForCreation {
        first_name: "A".to_string(),
        last_name: "B".to_string(),
        genre: "C".to_string(),
        books: vec![creation(Some("ok"), None), creation(None, None)],
    };
    let f = failures(validate_author_for_creation(&author));
    assert_eq!(
        f,
        vec![ValidationFailure::new("books[1].title", "Please fill out the title")]
    );
}
