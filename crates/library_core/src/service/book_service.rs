//! Book catalog use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for catalog callers.
//! - Delegate persistence to any `BookRepository` implementation.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::book::Book;
use crate::repo::book_repo::{BookRepository, RepoResult};
use crate::repo::context::OpContext;

/// Use-case service wrapper for book CRUD operations.
pub struct BookService<R: BookRepository> {
    repo: R,
}

/// Request model for registering a book from interactive input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBookRequest {
    /// Requested ID. Blank (after trimming) means "generate one".
    pub id: String,
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Adds a fully formed book.
    pub fn add_book(&self, ctx: &OpContext, book: Book) -> RepoResult<Book> {
        self.repo.create(ctx, book)
    }

    /// Builds a book from request fields and adds it.
    ///
    /// # Contract
    /// - A blank `id` is replaced with a generated UUID string.
    /// - A non-blank `id` is used verbatim, duplicates included.
    pub fn register_book(&self, ctx: &OpContext, request: &NewBookRequest) -> RepoResult<Book> {
        let book = if request.id.trim().is_empty() {
            Book::with_generated_id(
                request.title.clone(),
                request.author.clone(),
                request.year,
            )
        } else {
            Book::new(
                request.id.clone(),
                request.title.clone(),
                request.author.clone(),
                request.year,
            )
        };
        self.repo.create(ctx, book)
    }

    /// Lists every stored book in stored order.
    pub fn list_books(&self, ctx: &OpContext) -> RepoResult<Vec<Book>> {
        self.repo.get_all(ctx)
    }

    /// Replaces the full catalog.
    pub fn replace_all(&self, ctx: &OpContext, books: &[Book]) -> RepoResult<()> {
        self.repo.save_all(ctx, books)
    }

    /// Finds one book by ID.
    pub fn find_book(&self, ctx: &OpContext, id: &str) -> RepoResult<Option<Book>> {
        self.repo.get_by_id(ctx, id)
    }

    /// Replaces an existing book by ID.
    ///
    /// Returns repository-level not-found errors unchanged.
    pub fn update_book(&self, ctx: &OpContext, book: &Book) -> RepoResult<()> {
        self.repo.update(ctx, book)
    }

    /// Removes a book by ID.
    pub fn remove_book(&self, ctx: &OpContext, id: &str) -> RepoResult<()> {
        self.repo.delete(ctx, id)
    }
}
