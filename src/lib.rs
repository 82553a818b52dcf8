// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod categorize;
pub mod config;
pub mod dedup;
pub mod filter;
pub mod fingerprint;
pub mod ingest;
pub mod normalize;
pub mod pipeline;
pub mod rank;
pub mod snapshot;
pub mod sources;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::categorize::{Categorizer, Category};
pub use crate::config::AggregatorConfig;
pub use crate::pipeline::{Pipeline, RunReport};
pub use crate::snapshot::{FinalEntry, JsonFileSink, Snapshot, SnapshotSink};

use tracing::info;

/// Load config, fetch every registered source over HTTP and write the snapshot
/// to `output_path`. Errors only when the config is unusable or the write fails.
pub async fn run_from_env() -> anyhow::Result<RunReport> {
    let cfg = AggregatorConfig::load_default()?;
    info!(
        sources = cfg.sources.len(),
        output = %cfg.output_path.display(),
        "aggregator config loaded"
    );

    let pipeline = Pipeline::from_config(&cfg)?;
    let providers =
        ingest::providers::providers_from_sources(&cfg.sources, cfg.fetch_timeout_secs)?;
    let sink = JsonFileSink::new(&cfg.output_path);

    let (_snapshot, report) = pipeline.run(&providers, &sink, chrono::Utc::now()).await?;
    Ok(report)
}
