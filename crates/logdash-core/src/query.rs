//! Query execution: total count plus one sorted page.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::filter::FilterCriteria;
use crate::traits::LogStore;
use crate::types::LogRecord;

/// One page of results together with the unpaginated match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPage {
    /// Number of records matching the filter, ignoring pagination.
    pub total: u64,
    /// The requested page, newest first.
    pub records: Vec<LogRecord>,
}

impl QueryPage {
    /// Returns true if the page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Runs filter criteria against a store.
///
/// Performs two reads, a count and a page fetch. Both must succeed; there is
/// no partial result. The reads are not a snapshot: a concurrent write
/// between them can make `total` and `records` disagree by that write.
pub struct QueryExecutor<'a, S: LogStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: LogStore + ?Sized> QueryExecutor<'a, S> {
    /// Creates an executor over `store`.
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Executes the criteria.
    ///
    /// An empty match set is a successful, empty page.
    ///
    /// # Errors
    ///
    /// Returns the store's error if either read fails.
    pub fn execute(&self, criteria: &FilterCriteria) -> Result<QueryPage> {
        let total = self.store.count(&criteria.predicate)?;
        let records = self.store.find(&criteria.predicate, &criteria.pagination)?;

        debug!(
            total,
            page = criteria.pagination.page,
            page_size = criteria.pagination.page_size,
            returned = records.len(),
            "executed log query"
        );

        Ok(QueryPage { total, records })
    }
}

/// Convenience wrapper around [`QueryExecutor::execute`].
///
/// # Errors
///
/// Returns the store's error if either read fails.
pub fn execute<S: LogStore + ?Sized>(store: &S, criteria: &FilterCriteria) -> Result<QueryPage> {
    QueryExecutor::new(store).execute(criteria)
}
