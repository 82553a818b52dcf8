// src/ingest/mod.rs
pub mod providers;
pub mod types;

use chrono::{DateTime, Utc};
use metrics::{counter, histogram};

use crate::ingest::types::SourceProvider;
use crate::normalize::{normalize_entry, NormalizedEntry};

/// Outcome of one sequential pass over all sources.
#[derive(Debug, Default)]
pub struct Collected {
    pub entries: Vec<NormalizedEntry>,
    pub raw_count: usize,
    pub failed_sources: Vec<String>,
}

/// Fetch every source in order, one at a time. A failing source is logged and
/// counted as zero entries; it never stops the others.
pub async fn collect_all(
    providers: &[Box<dyn SourceProvider>],
    max_per_source: usize,
    summary_max_chars: usize,
    now: DateTime<Utc>,
) -> Collected {
    let mut out = Collected::default();

    for p in providers {
        tracing::debug!(source = p.name(), "fetching");
        let t0 = std::time::Instant::now();
        let fetched = p.fetch_latest().await;
        histogram!("news_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

        match fetched {
            Ok(raw) => {
                let before = out.entries.len();
                out.entries.extend(
                    raw.into_iter()
                        .take(max_per_source)
                        .map(|r| normalize_entry(r, p.name(), now, summary_max_chars)),
                );
                let n = out.entries.len() - before;
                out.raw_count += n;
                counter!("news_raw_entries_total").increment(n as u64);
                tracing::debug!(source = p.name(), entries = n, "fetched");
            }
            Err(e) => {
                tracing::warn!(error = ?e, source = p.name(), "source error, skipping");
                counter!("news_source_errors_total").increment(1);
                out.failed_sources.push(p.name().to_string());
            }
        }
    }

    out
}
