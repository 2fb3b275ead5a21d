//! File-backed log storage.
//!
//! This module provides:
//! - [`FileLogStore`]: Records loaded from a JSON-lines file and served from memory
//! - [`read_json_lines`]: Parser for the on-disk format, one [`LogRecord`] per line
//!
//! The file is the source of truth; [`FileLogStore::reload`] re-reads it.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{LogError, Result};
use crate::filter::{LogPredicate, Pagination};
use crate::store::MemoryLogStore;
use crate::traits::LogStore;
use crate::types::LogRecord;

/// Log store populated from a JSON-lines file.
#[derive(Debug)]
pub struct FileLogStore {
    path: PathBuf,
    inner: MemoryLogStore,
}

impl FileLogStore {
    /// Opens the file at `path` and loads every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line is malformed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = read_json_lines(&path)?;
        info!(path = %path.display(), records = records.len(), "loaded log records");

        Ok(Self {
            path,
            inner: MemoryLogStore::from_records(records),
        })
    }

    /// Re-reads the backing file, replacing the in-memory records.
    ///
    /// On error the previously loaded records stay in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line is malformed.
    pub fn reload(&self) -> Result<usize> {
        let records = read_json_lines(&self.path)?;
        let count = records.len();
        self.inner.replace_all(records);
        info!(path = %self.path.display(), records = count, "reloaded log records");
        Ok(count)
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogStore for FileLogStore {
    fn count(&self, predicate: &LogPredicate) -> Result<u64> {
        self.inner.count(predicate)
    }

    fn find(&self, predicate: &LogPredicate, pagination: &Pagination) -> Result<Vec<LogRecord>> {
        self.inner.find(predicate, pagination)
    }

    fn estimated_count(&self) -> Result<u64> {
        self.inner.estimated_count()
    }

    fn insert(&self, record: LogRecord) -> Result<()> {
        self.inner.insert(record)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Reads JSON-lines records from `path`. Blank lines are skipped.
///
/// # Errors
///
/// Returns [`LogError::Io`] if the file cannot be read and
/// [`LogError::ParseError`] with the 1-based line number for a malformed line.
pub fn read_json_lines(path: &Path) -> Result<Vec<LogRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record = serde_json::from_str(trimmed).map_err(|e| LogError::ParseError {
            line: index + 1,
            reason: e.to_string(),
        })?;
        records.push(record);
    }

    debug!(path = %path.display(), count = records.len(), "parsed json lines");
    Ok(records)
}

/// Writes records to `path` as JSON lines, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_json_lines<'a>(
    path: &Path,
    records: impl IntoIterator<Item = &'a LogRecord>,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
