//! Traits for log storage backends.
//!
//! This module provides the [`LogStore`] trait, the contract the query
//! executor and summary aggregator need from a document store: equality,
//! inclusive range and case-insensitive substring matching (expressed as a
//! [`LogPredicate`]), counting, and sorted skip/limit retrieval.

use crate::error::Result;
use crate::filter::{LogPredicate, Pagination};
use crate::types::{LogRecord, LogStatus};

/// Trait for log storage backends.
///
/// Implementors must return [`LogStore::find`] results in a total order:
/// timestamp descending, ties broken by id descending. Without the tie-break
/// consecutive pages could overlap or skip records.
pub trait LogStore: Send + Sync {
    /// Counts records matching the predicate.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn count(&self, predicate: &LogPredicate) -> Result<u64>;

    /// Returns one page of matching records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find(&self, predicate: &LogPredicate, pagination: &Pagination) -> Result<Vec<LogRecord>>;

    /// Counts records with the given status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn count_by_status(&self, status: LogStatus) -> Result<u64> {
        self.count(&LogPredicate::new().with_status(status))
    }

    /// Returns the total number of records.
    ///
    /// Backends may answer from metadata instead of scanning. Both in-tree
    /// backends return an exact count.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn estimated_count(&self) -> Result<u64> {
        self.count(&LogPredicate::new())
    }

    /// Inserts a record, keeping the sort order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the record.
    fn insert(&self, record: LogRecord) -> Result<()>;

    /// Returns the number of stored records.
    fn len(&self) -> usize;

    /// Returns true if the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
