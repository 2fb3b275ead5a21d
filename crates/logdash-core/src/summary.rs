//! Status summary counts for the dashboard header.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::traits::LogStore;
use crate::types::LogStatus;

/// Success, failure and overall record counts.
///
/// The three counts are read separately and are not a snapshot, so under
/// concurrent writes `success_count + failure_count` is not guaranteed to be
/// at most `total_count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    /// Records with status `Success`.
    pub success_count: u64,
    /// Records with status `Failure`.
    pub failure_count: u64,
    /// All records, regardless of status.
    pub total_count: u64,
}

impl StatusSummary {
    /// Records that are neither `Success` nor `Failure`.
    #[must_use]
    pub const fn other_count(&self) -> u64 {
        self.total_count
            .saturating_sub(self.success_count)
            .saturating_sub(self.failure_count)
    }
}

/// Computes the status summary over the whole store. Filters do not apply.
///
/// # Errors
///
/// Returns the store's error if any count fails.
pub fn summarize<S: LogStore + ?Sized>(store: &S) -> Result<StatusSummary> {
    let success_count = store.count_by_status(LogStatus::Success)?;
    let failure_count = store.count_by_status(LogStatus::Failure)?;
    let total_count = store.estimated_count()?;

    debug!(success_count, failure_count, total_count, "computed status summary");

    Ok(StatusSummary {
        success_count,
        failure_count,
        total_count,
    })
}
