//! # Aggregation pipeline
//! collect (sequential, failure-isolated) → dedup + filter → categorize →
//! rank + truncate → snapshot sink.
//!
//! Every stage runs to completion over the in-memory batch before the next
//! starts. Only the sink can fail the run.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use metrics::{counter, gauge};

use crate::categorize::Categorizer;
use crate::config::AggregatorConfig;
use crate::dedup::{dedupe_and_filter, DedupState, DedupStats};
use crate::filter::SignalFilter;
use crate::ingest::{collect_all, types::SourceProvider};
use crate::normalize::NormalizedEntry;
use crate::rank::rank_and_truncate;
use crate::snapshot::{FinalEntry, Snapshot, SnapshotSink};
use crate::telemetry::ensure_metrics_described;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub raw: usize,
    pub kept: usize,
    pub written: usize,
    pub dedup: DedupStats,
    pub failed_sources: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    filter: SignalFilter,
    categorizer: Categorizer,
    max_per_source: usize,
    max_total: usize,
    final_keep: usize,
    summary_max_chars: usize,
}

impl Pipeline {
    pub fn from_config(cfg: &AggregatorConfig) -> Result<Self> {
        Ok(Self {
            filter: SignalFilter::from_config(cfg)?,
            categorizer: Categorizer::from_config(cfg),
            max_per_source: cfg.max_per_source,
            max_total: cfg.max_total,
            final_keep: cfg.final_keep,
            summary_max_chars: cfg.summary_max_chars,
        })
    }

    /// Pure part of the run: dedup/filter with fresh state, tag, order, cap.
    pub fn process(&self, entries: Vec<NormalizedEntry>) -> (Vec<FinalEntry>, DedupStats) {
        let mut state = DedupState::new();
        let (kept, stats) = dedupe_and_filter(entries, &self.filter, &mut state, self.max_total);

        let tagged = kept
            .into_iter()
            .map(|e| {
                let cat = self.categorizer.categorize(&e.source, &e.title);
                FinalEntry::from_normalized(e, cat)
            })
            .collect();

        (rank_and_truncate(tagged, self.final_keep), stats)
    }

    pub async fn run<S: SnapshotSink + ?Sized>(
        &self,
        providers: &[Box<dyn SourceProvider>],
        sink: &S,
        now: DateTime<Utc>,
    ) -> Result<(Snapshot, RunReport)> {
        ensure_metrics_described();

        let collected =
            collect_all(providers, self.max_per_source, self.summary_max_chars, now).await;
        let raw = collected.raw_count;
        let (articles, stats) = self.process(collected.entries);
        let kept = stats.kept;

        let snapshot = Snapshot::new(Utc::now(), articles);
        sink.store(&snapshot).await.context("writing snapshot")?;

        counter!("news_kept_total").increment(kept as u64);
        counter!("news_dedup_total").increment(stats.deduped() as u64);
        counter!("news_filtered_total").increment(stats.low_signal as u64);
        counter!("news_skipped_keyless_total").increment(stats.keyless as u64);
        gauge!("news_pipeline_last_run_ts").set(Utc::now().timestamp() as f64);

        let report = RunReport {
            raw,
            kept,
            written: snapshot.articles.len(),
            dedup: stats,
            failed_sources: collected.failed_sources,
        };
        tracing::info!(
            raw = report.raw,
            kept = report.kept,
            deduped = stats.deduped(),
            filtered = stats.low_signal,
            keyless = stats.keyless,
            written = report.written,
            failed = report.failed_sources.len(),
            "snapshot written"
        );

        Ok((snapshot, report))
    }
}
