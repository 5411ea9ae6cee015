//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the book data access contract independent of storage backend.
//! - Keep file layout and JSON details inside the store boundary.
//!
//! # Invariants
//! - Lookups report absence as `None`; mutations report absence as
//!   `RepoError::NotFound` / `RepoError::NotDeleted`.
//! - Every operation accepts an `OpContext` and honors its cancellation.

pub mod book_repo;
pub mod context;
pub mod json_book_repo;
