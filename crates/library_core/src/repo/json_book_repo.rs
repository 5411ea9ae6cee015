//! JSON file-backed book repository.
//!
//! # Responsibility
//! - Implement `BookRepository` over one JSON array file.
//! - Reload the full collection on every call and rewrite it on every mutation.
//!
//! # Invariants
//! - No caching between calls; the file is the only source of truth.
//! - Cancellation is checked before each read and before each write.
//! - A failed `update`/`delete` lookup never writes to disk.

use crate::model::book::Book;
use crate::repo::book_repo::{BookRepository, RepoError, RepoResult};
use crate::repo::context::OpContext;
use crate::store::{ensure_store_file, read_records, write_records};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// Book repository persisted as a single pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonBookRepository {
    path: PathBuf,
}

impl JsonBookRepository {
    /// Opens the repository, creating the file with `[]` when absent.
    ///
    /// Initialization failures are logged and otherwise ignored; the first
    /// read or write against a broken path reports the real error. Use
    /// `try_new` to fail fast instead.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Err(err) = ensure_store_file(&path) {
            warn!(
                "event=repo_open module=repo status=degraded path={} error={}",
                path.display(),
                err
            );
        }
        Self { path }
    }

    /// Opens the repository and propagates file initialization failures.
    pub fn try_new(path: impl Into<PathBuf>) -> RepoResult<Self> {
        let path = path.into();
        ensure_store_file(&path)?;
        Ok(Self { path })
    }

    /// Path of the backing JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_books(&self, ctx: &OpContext) -> RepoResult<Vec<Book>> {
        check_cancelled(ctx, "load")?;
        Ok(read_records::<Book>(&self.path)?)
    }

    fn save_books(&self, ctx: &OpContext, books: &[Book]) -> RepoResult<()> {
        check_cancelled(ctx, "save")?;
        Ok(write_records(&self.path, books)?)
    }
}

impl BookRepository for JsonBookRepository {
    fn create(&self, ctx: &OpContext, book: Book) -> RepoResult<Book> {
        let mut books = self.load_books(ctx)?;
        books.push(book.clone());

        let total = books.len();
        settle_create(book, total, self.save_books(ctx, &books))
    }

    fn get_all(&self, ctx: &OpContext) -> RepoResult<Vec<Book>> {
        self.load_books(ctx)
    }

    fn save_all(&self, ctx: &OpContext, books: &[Book]) -> RepoResult<()> {
        self.save_books(ctx, books)?;
        info!(
            "event=book_save_all module=repo status=ok total={}",
            books.len()
        );
        Ok(())
    }

    fn get_by_id(&self, ctx: &OpContext, id: &str) -> RepoResult<Option<Book>> {
        let books = self.load_books(ctx)?;
        Ok(books.into_iter().find(|book| book.has_id(id)))
    }

    fn update(&self, ctx: &OpContext, book: &Book) -> RepoResult<()> {
        let mut books = self.load_books(ctx)?;

        let Some(slot) = books.iter_mut().find(|existing| existing.has_id(&book.id)) else {
            warn!(
                "event=book_update module=repo status=not_found id={}",
                book.id
            );
            return Err(RepoError::NotFound(book.id.clone()));
        };
        *slot = book.clone();

        self.save_books(ctx, &books)?;
        info!("event=book_update module=repo status=ok id={}", book.id);
        Ok(())
    }

    /// Rebuilds the collection without every record carrying `id`.
    fn delete(&self, ctx: &OpContext, id: &str) -> RepoResult<()> {
        let books = self.load_books(ctx)?;
        let before = books.len();

        let remaining: Vec<Book> = books.into_iter().filter(|book| !book.has_id(id)).collect();
        if remaining.len() == before {
            warn!("event=book_delete module=repo status=not_found id={id}");
            return Err(RepoError::NotDeleted(id.to_string()));
        }

        self.save_books(ctx, &remaining)?;
        info!(
            "event=book_delete module=repo status=ok id={id} removed={}",
            before - remaining.len()
        );
        Ok(())
    }
}

/// Turns the outcome of the write behind `create` into its result.
///
/// Cancellation propagates. Any other persist failure is logged and reported
/// as an empty successful result; callers that need a guarantee should
/// confirm with `get_by_id`.
fn settle_create(book: Book, total: usize, saved: RepoResult<()>) -> RepoResult<Book> {
    match saved {
        Ok(()) => {
            info!(
                "event=book_create module=repo status=ok id={} total={}",
                book.id, total
            );
            Ok(book)
        }
        Err(RepoError::Cancelled) => Err(RepoError::Cancelled),
        Err(err) => {
            error!(
                "event=book_create module=repo status=error persisted=false id={} error={}",
                book.id, err
            );
            Ok(Book::default())
        }
    }
}

fn check_cancelled(ctx: &OpContext, phase: &str) -> RepoResult<()> {
    if ctx.is_cancelled() {
        info!("event=repo_{phase} module=repo status=cancelled");
        return Err(RepoError::Cancelled);
    }
    Ok(())
}
