//! Run-scoped deduplication + low-signal filtering.
//!
//! Strictly sequential, first occurrence wins. The caller builds a fresh
//! `DedupState` per run; nothing is remembered across runs.

use std::collections::HashSet;

use crate::filter::SignalFilter;
use crate::fingerprint::title_fingerprint;
use crate::normalize::{canonical_link, NormalizedEntry};

/// Seen keys for one pipeline run. Empty keys are never recorded.
#[derive(Debug, Default)]
pub struct DedupState {
    seen_links: HashSet<String>,
    seen_fingerprints: HashSet<String>,
}

impl DedupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen_link(&self, link: &str) -> bool {
        !link.is_empty() && self.seen_links.contains(link)
    }

    pub fn seen_fingerprint(&self, fp: &str) -> bool {
        !fp.is_empty() && self.seen_fingerprints.contains(fp)
    }

    pub fn mark(&mut self, link: &str, fp: &str) {
        if !link.is_empty() {
            self.seen_links.insert(link.to_string());
        }
        if !fp.is_empty() {
            self.seen_fingerprints.insert(fp.to_string());
        }
    }

    #[cfg(test)]
    fn counts(&self) -> (usize, usize) {
        (self.seen_links.len(), self.seen_fingerprints.len())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupStats {
    /// No link and no title: nothing to key on.
    pub keyless: usize,
    pub duplicate_link: usize,
    pub duplicate_title: usize,
    pub low_signal: usize,
    /// Candidates never looked at because the cap was reached.
    pub over_cap: usize,
    pub kept: usize,
}

impl DedupStats {
    pub fn deduped(&self) -> usize {
        self.duplicate_link + self.duplicate_title
    }
}

pub fn dedupe_and_filter(
    entries: Vec<NormalizedEntry>,
    filter: &SignalFilter,
    state: &mut DedupState,
    max_total: usize,
) -> (Vec<NormalizedEntry>, DedupStats) {
    let mut stats = DedupStats::default();
    let total = entries.len();
    let mut kept = Vec::with_capacity(total.min(max_total));

    for (i, entry) in entries.into_iter().enumerate() {
        if kept.len() >= max_total {
            stats.over_cap = total - i;
            break;
        }

        let link = canonical_link(&entry.link);
        if link.is_empty() && entry.title.trim().is_empty() {
            stats.keyless += 1;
            continue;
        }
        if state.seen_link(&link) {
            stats.duplicate_link += 1;
            continue;
        }
        let fp = title_fingerprint(&entry.title);
        if state.seen_fingerprint(&fp) {
            stats.duplicate_title += 1;
            continue;
        }
        if !filter.keep(&entry) {
            stats.low_signal += 1;
            continue;
        }

        state.mark(&link, &fp);
        kept.push(entry);
    }

    stats.kept = kept.len();
    (kept, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(title: &str, link: &str) -> NormalizedEntry {
        NormalizedEntry {
            title: title.into(),
            link: link.into(),
            summary: String::new(),
            published: "2025-01-01T00:00:00Z".into(),
            source: "Bankier.pl".into(),
        }
    }

    fn f() -> SignalFilter {
        SignalFilter::new(10, 40, &["raport"]).unwrap()
    }

    #[test]
    fn empty_keys_are_not_recorded() {
        let mut st = DedupState::new();
        st.mark("", "");
        assert_eq!(st.counts(), (0, 0));
        assert!(!st.seen_link(""));
        assert!(!st.seen_fingerprint(""));
    }

    #[test]
    fn entries_without_link_are_not_deduped_by_link() {
        let mut st = DedupState::new();
        let input = vec![
            e("Inflacja w Polsce spada", ""),
            e("Stopy procentowe bez zmian", ""),
        ];
        let (kept, stats) = dedupe_and_filter(input, &f(), &mut st, 10);
        assert_eq!(kept.len(), 2);
        assert_eq!(stats.deduped(), 0);
    }

    #[test]
    fn cap_stops_intake_and_counts_the_rest() {
        let mut st = DedupState::new();
        let input = (0..5)
            .map(|i| e(&format!("Unikalny tytuł numer {i}"), &format!("https://x/{i}")))
            .collect();
        let (kept, stats) = dedupe_and_filter(input, &f(), &mut st, 3);
        assert_eq!(kept.len(), 3);
        assert_eq!(stats.over_cap, 2);
    }

    #[test]
    fn filtered_entry_does_not_reserve_its_keys() {
        let mut st = DedupState::new();
        let mut rich = e("Raport", "https://x/r");
        rich.summary = "Szczegółowe omówienie wyników kwartalnych spółek z WIG20.".into();
        let input = vec![e("Raport", "https://x/r"), rich];
        let (kept, stats) = dedupe_and_filter(input, &f(), &mut st, 10);
        assert_eq!(stats.low_signal, 1);
        assert_eq!(kept.len(), 1);
        assert!(!kept[0].summary.is_empty());
    }
}
