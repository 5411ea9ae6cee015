//! Interactive catalog menu.
//!
//! Repository errors are printed and the loop continues; end of input ends the
//! session.

use crate::input::LineInput;
use library_core::{Book, BookRepository, BookService, NewBookRequest, OpContext};
use std::io::{self, BufRead, Write};

const MENU: &str = "\
1) List books
2) Add a book
3) Show a book
4) Update a book
5) Delete a book
0) Quit";

/// Runs the menu loop until the user quits or input ends.
pub fn run_menu<Repo, In, Out>(
    service: &BookService<Repo>,
    ctx: &OpContext,
    input: &mut LineInput<In, Out>,
) -> io::Result<()>
where
    Repo: BookRepository,
    In: BufRead,
    Out: Write,
{
    loop {
        writeln!(input.output(), "{MENU}")?;
        let step = match input.read_int("Choose an option: ") {
            Ok(choice) => dispatch(choice, service, ctx, input),
            Err(err) => Err(err),
        };
        match step {
            Ok(true) => continue,
            Ok(false) => return Ok(()),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
            Err(err) => return Err(err),
        }
    }
}

/// Returns `Ok(false)` when the session should end.
fn dispatch<Repo, In, Out>(
    choice: i64,
    service: &BookService<Repo>,
    ctx: &OpContext,
    input: &mut LineInput<In, Out>,
) -> io::Result<bool>
where
    Repo: BookRepository,
    In: BufRead,
    Out: Write,
{
    match choice {
        0 => return Ok(false),
        1 => list_books(service, ctx, input)?,
        2 => add_book(service, ctx, input)?,
        3 => show_book(service, ctx, input)?,
        4 => update_book(service, ctx, input)?,
        5 => delete_book(service, ctx, input)?,
        other => writeln!(input.output(), "Unknown option: {other}")?,
    }
    Ok(true)
}

fn list_books<Repo, In, Out>(
    service: &BookService<Repo>,
    ctx: &OpContext,
    input: &mut LineInput<In, Out>,
) -> io::Result<()>
where
    Repo: BookRepository,
    In: BufRead,
    Out: Write,
{
    match service.list_books(ctx) {
        Ok(books) if books.is_empty() => writeln!(input.output(), "The catalog is empty."),
        Ok(books) => {
            for book in &books {
                writeln!(input.output(), "{}", describe(book))?;
            }
            Ok(())
        }
        Err(err) => writeln!(input.output(), "Error: {err}"),
    }
}

fn add_book<Repo, In, Out>(
    service: &BookService<Repo>,
    ctx: &OpContext,
    input: &mut LineInput<In, Out>,
) -> io::Result<()>
where
    Repo: BookRepository,
    In: BufRead,
    Out: Write,
{
    let request = NewBookRequest {
        id: input.read_string("ID (blank to generate): ")?,
        title: input.read_string("Title: ")?,
        author: input.read_string("Author: ")?,
        year: input.read_int("Year: ")?,
    };
    match service.register_book(ctx, &request) {
        Ok(book) if !was_persisted(&request, &book) => writeln!(
            input.output(),
            "Error: book {} was not persisted; check the log for details",
            request.id
        ),
        Ok(book) => writeln!(input.output(), "Added {}", describe(&book)),
        Err(err) => writeln!(input.output(), "Error: {err}"),
    }
}

/// A failed write behind `create` comes back as an empty record rather than
/// an error, so compare what was stored against what was asked for.
fn was_persisted(request: &NewBookRequest, book: &Book) -> bool {
    if book.id.is_empty() {
        return false;
    }
    request.id.trim().is_empty() || book.id == request.id
}

fn show_book<Repo, In, Out>(
    service: &BookService<Repo>,
    ctx: &OpContext,
    input: &mut LineInput<In, Out>,
) -> io::Result<()>
where
    Repo: BookRepository,
    In: BufRead,
    Out: Write,
{
    let id = input.read_string("ID: ")?;
    match service.find_book(ctx, &id) {
        Ok(Some(book)) => writeln!(input.output(), "{}", describe(&book)),
        Ok(None) => writeln!(input.output(), "No book with ID {id}."),
        Err(err) => writeln!(input.output(), "Error: {err}"),
    }
}

/// Blank title or author keeps the stored value; the year is always re-entered.
fn update_book<Repo, In, Out>(
    service: &BookService<Repo>,
    ctx: &OpContext,
    input: &mut LineInput<In, Out>,
) -> io::Result<()>
where
    Repo: BookRepository,
    In: BufRead,
    Out: Write,
{
    let id = input.read_string("ID: ")?;
    let current = match service.find_book(ctx, &id) {
        Ok(Some(book)) => book,
        Ok(None) => return writeln!(input.output(), "No book with ID {id}."),
        Err(err) => return writeln!(input.output(), "Error: {err}"),
    };

    let title = input.read_string(&format!("Title [{}]: ", current.title))?;
    let author = input.read_string(&format!("Author [{}]: ", current.author))?;
    let year = input.read_int(&format!("Year [{}]: ", current.year))?;

    let updated = Book {
        title: if title.is_empty() { current.title } else { title },
        author: if author.is_empty() { current.author } else { author },
        year,
        ..current
    };
    match service.update_book(ctx, &updated) {
        Ok(()) => writeln!(input.output(), "Updated {}", describe(&updated)),
        Err(err) => writeln!(input.output(), "Error: {err}"),
    }
}

fn delete_book<Repo, In, Out>(
    service: &BookService<Repo>,
    ctx: &OpContext,
    input: &mut LineInput<In, Out>,
) -> io::Result<()>
where
    Repo: BookRepository,
    In: BufRead,
    Out: Write,
{
    let id = input.read_string("ID: ")?;
    match service.remove_book(ctx, &id) {
        Ok(()) => writeln!(input.output(), "Deleted {id}."),
        Err(err) => writeln!(input.output(), "Error: {err}"),
    }
}

fn describe(book: &Book) -> String {
    format!(
        "{}: {} by {} ({})",
        book.id, book.title, book.author, book.year
    )
}

#[cfg(test)]
mod tests {
    use super::{run_menu, was_persisted};
    use crate::input::LineInput;
    use library_core::{
        Book, BookRepository, BookService, JsonBookRepository, NewBookRequest, OpContext,
    };
    use std::io::Cursor;

    fn run(script: &str, repo: JsonBookRepository) -> String {
        let service = BookService::new(repo);
        let mut input = LineInput::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        run_menu(&service, &OpContext::background(), &mut input).unwrap();
        String::from_utf8(input.output().clone()).unwrap()
    }

    #[test]
    fn add_then_list_persists_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");

        let output = run(
            "2\n1\nTitle One\nAuthor One\nabc\n2000\n1\n0\n",
            JsonBookRepository::new(&path),
        );

        assert!(output.contains("Invalid input. Please enter a valid integer."));
        assert!(output.contains("Added 1: Title One by Author One (2000)"));
        let stored = JsonBookRepository::new(&path)
            .get_all(&OpContext::background())
            .unwrap();
        assert_eq!(stored, vec![Book::new("1", "Title One", "Author One", 2000)]);
    }

    #[test]
    fn failed_write_is_reported_instead_of_added() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("books.json");

        let output = run("2\n1\nT\nA\n2000\n", JsonBookRepository::new(&path));

        assert!(output.contains("Error: book 1 was not persisted"));
        assert!(!output.contains("Added"));
        assert!(!path.exists());
    }

    #[test]
    fn was_persisted_compares_requested_and_stored_ids() {
        let explicit = NewBookRequest {
            id: "1".to_string(),
            ..NewBookRequest::default()
        };
        assert!(was_persisted(&explicit, &Book::new("1", "T", "A", 1)));
        assert!(!was_persisted(&explicit, &Book::default()));
        assert!(!was_persisted(&explicit, &Book::new("2", "T", "A", 1)));

        let generated = NewBookRequest::default();
        assert!(was_persisted(&generated, &Book::with_generated_id("T", "A", 1)));
        assert!(!was_persisted(&generated, &Book::default()));
    }

    #[test]
    fn blank_id_generates_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");

        run("2\n\nDune\nHerbert\n1965\n0\n", JsonBookRepository::new(&path));

        let stored = JsonBookRepository::new(&path)
            .get_all(&OpContext::background())
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert!(!stored[0].id.is_empty());
        assert_eq!(stored[0].title, "Dune");
    }

    #[test]
    fn update_keeps_blank_fields_and_delete_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonBookRepository::new(dir.path().join("books.json"));
        repo.save_all(
            &OpContext::background(),
            &[Book::new("1", "Old Title", "Old Author", 1990)],
        )
        .unwrap();

        let output = run("4\n1\nNew Title\n\n1991\n5\n9\n", repo.clone());

        assert!(output.contains("Updated 1: New Title by Old Author (1991)"));
        assert!(output.contains("Error: failed to delete the book with id: 9"));
        let stored = repo.get_by_id(&OpContext::background(), "1").unwrap();
        assert_eq!(stored, Some(Book::new("1", "New Title", "Old Author", 1991)));
    }

    #[test]
    fn unknown_option_and_end_of_input_end_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(
            "7\n3\nmissing\n",
            JsonBookRepository::new(dir.path().join("books.json")),
        );

        assert!(output.contains("Unknown option: 7"));
        assert!(output.contains("No book with ID missing."));
    }

    #[test]
    fn empty_catalog_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(
            "1\n0\n",
            JsonBookRepository::new(dir.path().join("books.json")),
        );
        assert!(output.contains("The catalog is empty."));
    }
}
