//! Book repository contract and error model.
//!
//! # Responsibility
//! - Declare the six catalog operations every storage backend provides.
//! - Map storage failures into one repository error type.
//!
//! # Invariants
//! - `get_by_id` never fails for an unknown ID.
//! - `update` and `delete` fail for an unknown ID (`NotFound` and
//!   `NotDeleted`) and leave stored state untouched.

use crate::model::book::{Book, BookId};
use crate::repo::context::OpContext;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for book persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    /// `update` found no record with this ID.
    NotFound(BookId),
    /// `delete` found no record with this ID.
    NotDeleted(BookId),
    Cancelled,
}

impl RepoError {
    /// Returns whether the error reports a missing target record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::NotDeleted(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::NotDeleted(id) => write!(f, "failed to delete the book with id: {id}"),
            Self::Cancelled => write!(f, "operation cancelled"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotFound(_) | Self::NotDeleted(_) => None,
            Self::Cancelled => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Repository interface for book CRUD operations.
///
/// Alternate backends implement this trait; callers such as `BookService`
/// depend only on it.
pub trait BookRepository {
    /// Appends `book` and returns it unchanged. IDs are neither generated nor
    /// checked for uniqueness.
    fn create(&self, ctx: &OpContext, book: Book) -> RepoResult<Book>;
    /// Returns the full collection in stored order.
    // TODO: add limit/offset once callers need paging.
    fn get_all(&self, ctx: &OpContext) -> RepoResult<Vec<Book>>;
    /// Replaces the whole stored collection with `books`.
    fn save_all(&self, ctx: &OpContext, books: &[Book]) -> RepoResult<()>;
    /// Returns the first record with `id`, or `None`.
    fn get_by_id(&self, ctx: &OpContext, id: &str) -> RepoResult<Option<Book>>;
    /// Replaces the first record sharing `book.id` with `book`.
    fn update(&self, ctx: &OpContext, book: &Book) -> RepoResult<()>;
    /// Removes records with `id`.
    fn delete(&self, ctx: &OpContext, id: &str) -> RepoResult<()>;
}
