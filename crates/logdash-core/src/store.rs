//! In-memory log storage.
//!
//! [`MemoryLogStore`] keeps records sorted newest first so that page reads are
//! a filtered skip/take over the vector.

use std::cmp::Ordering;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::filter::{LogPredicate, Pagination};
use crate::traits::LogStore;
use crate::types::LogRecord;

/// Total display order: timestamp descending, then id descending.
pub fn newest_first(a: &LogRecord, b: &LogRecord) -> Ordering {
    b.timestamp
        .cmp(&a.timestamp)
        .then_with(|| b.id.cmp(&a.id))
}

/// Thread-safe in-memory log store.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    /// Records in [`newest_first`] order.
    records: RwLock<Vec<LogRecord>>,
}

impl MemoryLogStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given records.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = LogRecord>) -> Self {
        let mut records: Vec<LogRecord> = records.into_iter().collect();
        records.sort_by(newest_first);
        Self {
            records: RwLock::new(records),
        }
    }

    /// Replaces every record in the store.
    pub fn replace_all(&self, records: impl IntoIterator<Item = LogRecord>) {
        let mut fresh: Vec<LogRecord> = records.into_iter().collect();
        fresh.sort_by(newest_first);
        debug!(count = fresh.len(), "replacing store contents");
        *self.records.write() = fresh;
    }

    /// Removes all records.
    pub fn clear(&self) {
        self.records.write().clear();
    }
}

impl LogStore for MemoryLogStore {
    fn count(&self, predicate: &LogPredicate) -> Result<u64> {
        let records = self.records.read();
        Ok(records.iter().filter(|r| predicate.matches(r)).count() as u64)
    }

    fn find(&self, predicate: &LogPredicate, pagination: &Pagination) -> Result<Vec<LogRecord>> {
        let skip = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let records = self.records.read();

        Ok(records
            .iter()
            .filter(|r| predicate.matches(r))
            .skip(skip)
            .take(pagination.limit())
            .cloned()
            .collect())
    }

    fn estimated_count(&self) -> Result<u64> {
        Ok(self.records.read().len() as u64)
    }

    fn insert(&self, record: LogRecord) -> Result<()> {
        let mut records = self.records.write();
        let at = records
            .partition_point(|existing| newest_first(existing, &record) == Ordering::Less);
        records.insert(at, record);
        Ok(())
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}

/// Shared log store handle.
pub type SharedLogStore = Arc<dyn LogStore>;

/// Creates a new shared in-memory store from records.
#[must_use]
pub fn shared_store(records: impl IntoIterator<Item = LogRecord>) -> SharedLogStore {
    Arc::new(MemoryLogStore::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LogId, LogStatus, Severity};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, minute, 0).unwrap()
    }

    fn make_record(id: &str, minute: u32, status: LogStatus) -> LogRecord {
        LogRecord {
            id: LogId::from(id),
            interface_name: "OrderSync".to_string(),
            integration_key: format!("KEY-{id}"),
            status,
            message: format!("message {id}"),
            severity: Severity::new(2).unwrap(),
            timestamp: at(minute),
        }
    }

    fn ids(records: &[LogRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn store_starts_empty() {
        let store = MemoryLogStore::new();

        assert!(store.is_empty());
        assert_eq!(store.count(&LogPredicate::new()).unwrap(), 0);
        assert!(store.find(&LogPredicate::new(), &Pagination::default()).unwrap().is_empty());
    }

    #[test]
    fn find_returns_newest_first() {
        let store = MemoryLogStore::new();
        store.insert(make_record("a", 1, LogStatus::Success)).unwrap();
        store.insert(make_record("c", 3, LogStatus::Success)).unwrap();
        store.insert(make_record("b", 2, LogStatus::Success)).unwrap();

        let page = store.find(&LogPredicate::new(), &Pagination::default()).unwrap();
        assert_eq!(ids(&page), vec!["c", "b", "a"]);
    }

    #[test]
    fn equal_timestamps_break_ties_by_id() {
        let store = MemoryLogStore::from_records(vec![
            make_record("b", 5, LogStatus::Success),
            make_record("d", 5, LogStatus::Success),
            make_record("a", 5, LogStatus::Success),
        ]);
        store.insert(make_record("c", 5, LogStatus::Success)).unwrap();

        let page = store.find(&LogPredicate::new(), &Pagination::default()).unwrap();
        assert_eq!(ids(&page), vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn find_skips_and_limits() {
        let store = MemoryLogStore::from_records(
            (0..10).map(|i| make_record(&format!("r{i}"), i, LogStatus::Success)),
        );

        let page = store.find(&LogPredicate::new(), &Pagination::new(2, 3)).unwrap();
        assert_eq!(ids(&page), vec!["r6", "r5", "r4"]);

        let beyond = store.find(&LogPredicate::new(), &Pagination::new(5, 3)).unwrap();
        assert!(beyond.is_empty());
    }

    #[test]
    fn count_applies_predicate() {
        let store = MemoryLogStore::from_records(vec![
            make_record("a", 1, LogStatus::Success),
            make_record("b", 2, LogStatus::Failure),
            make_record("c", 3, LogStatus::Failure),
        ]);

        assert_eq!(store.count_by_status(LogStatus::Failure).unwrap(), 2);
        assert_eq!(store.count_by_status(LogStatus::Warning).unwrap(), 0);
        assert_eq!(store.estimated_count().unwrap(), 3);
    }

    #[test]
    fn replace_all_and_clear() {
        let store = MemoryLogStore::new();
        store.insert(make_record("a", 1, LogStatus::Success)).unwrap();

        store.replace_all(vec![
            make_record("x", 1, LogStatus::Pending),
            make_record("y", 2, LogStatus::Pending),
        ]);
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn shared_store_is_usable_as_trait_object() {
        let store = shared_store(vec![make_record("a", 1, LogStatus::Success)]);
        assert_eq!(store.len(), 1);
    }
}
