//! Catalog domain model.
//!
//! # Responsibility
//! - Define the record shape persisted by the book store.
//!
//! # Invariants
//! - Book IDs are caller-owned strings; uniqueness is expected but not enforced.
//! - Field order of `Book` is the on-disk field order.

pub mod book;
