//! Flat JSON file storage primitives.
//!
//! # Responsibility
//! - Initialize, read and overwrite a single JSON array document on disk.
//! - Report transport failures with the path and phase that failed.
//!
//! # Invariants
//! - A missing file reads as an empty collection, never as an error.
//! - Writes replace the whole document; there is no append or patch path.
//! - Writes are not atomic and take no lock. Last writer wins.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

mod file;

pub use file::{ensure_store_file, read_records, write_records, EMPTY_STORE_DOCUMENT};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// Probing or creating the store file failed.
    Init { path: PathBuf, source: io::Error },
    /// Reading an existing store file failed.
    Read { path: PathBuf, source: io::Error },
    /// The store file holds something other than a JSON array of records.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Serialize(serde_json::Error),
    Write { path: PathBuf, source: io::Error },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Init { path, source } => write!(
                f,
                "failed to initialize store file `{}`: {source}",
                path.display()
            ),
            Self::Read { path, source } => {
                write!(f, "failed to read file `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to unmarshal file `{}`: {source}", path.display())
            }
            Self::Serialize(source) => write!(f, "failed to marshal books: {source}"),
            Self::Write { path, source } => {
                write!(f, "failed to write file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Init { source, .. } | Self::Read { source, .. } | Self::Write { source, .. } => {
                Some(source)
            }
            Self::Parse { source, .. } | Self::Serialize(source) => Some(source),
        }
    }
}
