use library_core::Book;

#[test]
fn book_new_keeps_fields_verbatim() {
    let book = Book::new("", "Untitled", "Anonymous", -300);

    assert_eq!(book.id, "");
    assert_eq!(book.title, "Untitled");
    assert_eq!(book.author, "Anonymous");
    assert_eq!(book.year, -300);
    assert!(book.has_id(""));
}

#[test]
fn generated_ids_are_distinct_and_non_empty() {
    let first = Book::with_generated_id("A", "B", 2001);
    let second = Book::with_generated_id("A", "B", 2001);

    assert!(!first.id.is_empty());
    assert_ne!(first.id, second.id);
    assert_eq!(first.title, "A");
}

#[test]
fn book_serialization_uses_expected_wire_fields() {
    let book = Book::new("1", "Title One", "Author One", 2000);

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["ID"], "1");
    assert_eq!(json["Title"], "Title One");
    assert_eq!(json["Author"], "Author One");
    assert_eq!(json["Year"], 2000);

    let text = serde_json::to_string(&book).unwrap();
    assert_eq!(
        text,
        r#"{"ID":"1","Title":"Title One","Author":"Author One","Year":2000}"#
    );

    let decoded: Book = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, book);
}

#[test]
fn missing_wire_fields_decode_to_zero_values() {
    let decoded: Book = serde_json::from_str(r#"{"ID":"7"}"#).unwrap();
    assert_eq!(decoded, Book::new("7", "", "", 0));
}

#[test]
fn non_integer_year_is_rejected() {
    let result = serde_json::from_str::<Book>(r#"{"ID":"7","Year":"1999"}"#);
    assert!(result.is_err());
}

#[test]
fn common_field_casings_decode_to_the_same_book() {
    let lower: Book =
        serde_json::from_str(r#"{"id":"1","title":"T","author":"A","year":2000}"#).unwrap();
    let upper: Book =
        serde_json::from_str(r#"{"Id":"1","TITLE":"T","AUTHOR":"A","YEAR":2000}"#).unwrap();

    assert_eq!(lower, Book::new("1", "T", "A", 2000));
    assert_eq!(upper, lower);
}

#[test]
fn unrecognized_keys_fail_instead_of_decoding_empty() {
    let result = serde_json::from_str::<Book>(r#"{"book_id":"1","name":"T"}"#);
    assert!(result.is_err());
}
