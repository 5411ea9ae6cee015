//! Book domain model.
//!
//! # Responsibility
//! - Define the single catalog record and its JSON wire shape.
//!
//! # Invariants
//! - Wire field names are `ID`, `Title`, `Author`, `Year`, always in that order.
//! - Absent wire fields decode to zero values instead of failing.
//! - Lower, title and upper case spellings of each field name are accepted;
//!   any other key is rejected so a foreign record never decodes as empty.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller-supplied identifier used for lookup, update and delete.
pub type BookId = String;

/// One catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Book {
    #[serde(rename = "ID", alias = "id", alias = "Id")]
    pub id: BookId,
    #[serde(rename = "Title", alias = "title", alias = "TITLE")]
    pub title: String,
    #[serde(rename = "Author", alias = "author", alias = "AUTHOR")]
    pub author: String,
    /// Publication year. Negative values are accepted as-is.
    #[serde(rename = "Year", alias = "year", alias = "YEAR")]
    pub year: i64,
}

impl Book {
    /// Creates a book with a caller-provided ID.
    ///
    /// No validation is applied; an empty ID is a legal value.
    pub fn new(
        id: impl Into<BookId>,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            year,
        }
    }

    /// Creates a book with a freshly generated UUIDv4 string ID.
    ///
    /// Used by interactive entry when the user leaves the ID blank.
    pub fn with_generated_id(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i64,
    ) -> Self {
        Self::new(Uuid::new_v4().to_string(), title, author, year)
    }

    /// Returns whether this record is addressed by `id`.
    pub fn has_id(&self, id: &str) -> bool {
        self.id == id
    }
}
