//! Whole-document file I/O for the JSON store.
//!
//! # Responsibility
//! - Create the store file with an empty array when it is absent.
//! - Load and persist full record collections.
//! - Emit `store_*` logging events with duration and status.
//!
//! # Invariants
//! - Parent directories are never created here.
//! - Output is pretty-printed with two-space indentation.

use super::{StoreError, StoreResult};
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

/// Literal content of a freshly initialized store file.
pub const EMPTY_STORE_DOCUMENT: &str = "[]";

/// Creates the store file with an empty array when it does not exist yet.
///
/// Returns `Ok(true)` when the file was created, `Ok(false)` when it already
/// existed.
///
/// # Errors
/// - Returns `StoreError::Init` when the path cannot be probed or written.
pub fn ensure_store_file(path: &Path) -> StoreResult<bool> {
    match fs::metadata(path) {
        Ok(_) => return Ok(false),
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            error!(
                "event=store_init module=store status=error error_code=stat_failed path={} error={}",
                path.display(),
                err
            );
            return Err(StoreError::Init {
                path: path.to_path_buf(),
                source: err,
            });
        }
    }

    if let Err(err) = fs::write(path, EMPTY_STORE_DOCUMENT) {
        error!(
            "event=store_init module=store status=error error_code=create_failed path={} error={}",
            path.display(),
            err
        );
        return Err(StoreError::Init {
            path: path.to_path_buf(),
            source: err,
        });
    }

    info!(
        "event=store_init module=store status=ok created=true path={}",
        path.display()
    );
    Ok(true)
}

/// Loads every record from the store file.
///
/// A missing file and a `null` document both read as an empty collection.
///
/// # Errors
/// - `StoreError::Read` for I/O failures other than not-found.
/// - `StoreError::Parse` when the content is not a JSON array of `T`.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    let started_at = Instant::now();

    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(
                "event=store_read module=store status=ok missing=true path={}",
                path.display()
            );
            return Ok(Vec::new());
        }
        Err(err) => {
            error!(
                "event=store_read module=store status=error error_code=read_failed path={} error={}",
                path.display(),
                err
            );
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    let records = serde_json::from_slice::<Option<Vec<T>>>(&data)
        .map_err(|err| {
            error!(
                "event=store_read module=store status=error error_code=parse_failed path={} error={}",
                path.display(),
                err
            );
            StoreError::Parse {
                path: path.to_path_buf(),
                source: err,
            }
        })?
        .unwrap_or_default();

    debug!(
        "event=store_read module=store status=ok records={} duration_ms={}",
        records.len(),
        started_at.elapsed().as_millis()
    );
    Ok(records)
}

/// Overwrites the store file with the full record collection.
///
/// The file is truncated and rewritten in place, so a crash mid-write can
/// leave a truncated document behind.
///
/// # Errors
/// - `StoreError::Serialize` when a record cannot be encoded.
/// - `StoreError::Write` when the file cannot be written.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> StoreResult<()> {
    let started_at = Instant::now();

    let data = serde_json::to_vec_pretty(records).map_err(StoreError::Serialize)?;

    if let Err(err) = fs::write(path, data) {
        error!(
            "event=store_write module=store status=error error_code=write_failed path={} error={}",
            path.display(),
            err
        );
        return Err(StoreError::Write {
            path: path.to_path_buf(),
            source: err,
        });
    }

    debug!(
        "event=store_write module=store status=ok records={} duration_ms={}",
        records.len(),
        started_at.elapsed().as_millis()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_store_file, read_records, write_records, EMPTY_STORE_DOCUMENT};
    use crate::store::StoreError;
    use std::fs;

    #[test]
    fn ensure_creates_empty_array_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");

        assert!(ensure_store_file(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), EMPTY_STORE_DOCUMENT);

        fs::write(&path, "[1, 2]").unwrap();
        assert!(!ensure_store_file(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2]");
    }

    #[test]
    fn ensure_does_not_create_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("books.json");

        let err = ensure_store_file(&path).unwrap_err();
        assert!(matches!(err, StoreError::Init { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn read_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let records: Vec<i64> = read_records(&dir.path().join("absent.json")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn read_null_document_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        fs::write(&path, "null").unwrap();

        let records: Vec<i64> = read_records(&path).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn read_malformed_document_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        fs::write(&path, "[{").unwrap();

        let err = read_records::<i64>(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(err.to_string().contains("failed to unmarshal"));
    }

    #[test]
    fn read_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_records::<i64>(dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn write_uses_two_space_indentation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("numbers.json");

        write_records(&path, &[1, 2]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[\n  1,\n  2\n]");

        write_records::<i64>(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn write_into_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_records(dir.path(), &[1]).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }
}
