//! Newest-first ordering and final truncation.
//!
//! Timestamps are compared as plain strings. That is chronological only when
//! every feed emits the same sortable format (e.g. RFC 3339); with mixed
//! formats the order is still deterministic, just not strictly by time. The
//! sort is stable, so ties keep their post-dedup order.

use crate::snapshot::FinalEntry;

pub fn rank_and_truncate(mut entries: Vec<FinalEntry>, final_keep: usize) -> Vec<FinalEntry> {
    entries.sort_by(|a, b| b.published.cmp(&a.published));
    entries.truncate(final_keep);
    entries
}
