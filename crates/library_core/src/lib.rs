//! Core catalog logic for the personal library.
//! This crate owns the book record, its JSON file store and the repository
//! contract that callers program against.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogLevel, LogTarget,
};
pub use model::book::{Book, BookId};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult};
pub use repo::context::OpContext;
pub use repo::json_book_repo::JsonBookRepository;
pub use service::book_service::{BookService, NewBookRequest};
pub use store::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
