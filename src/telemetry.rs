// src/telemetry.rs
use metrics::{describe_counter, describe_gauge, describe_histogram};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// One-time metrics registration (so series show up once a recorder is installed).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "news_raw_entries_total",
            "Raw entries read from sources (after the per-source cap)."
        );
        describe_counter!(
            "news_source_errors_total",
            "Source fetch/parse failures treated as empty."
        );
        describe_counter!("news_kept_total", "Entries kept after dedup + filtering.");
        describe_counter!(
            "news_dedup_total",
            "Entries dropped as duplicate link or title."
        );
        describe_counter!(
            "news_filtered_total",
            "Entries dropped as low-signal (generic title, short summary)."
        );
        describe_counter!(
            "news_skipped_keyless_total",
            "Entries with neither link nor title."
        );
        describe_histogram!("news_fetch_ms", "Per-source fetch time in milliseconds.");
        describe_gauge!(
            "news_pipeline_last_run_ts",
            "Unix ts when the pipeline last wrote a snapshot."
        );
    });
}

pub const ENV_LOG_FORMAT: &str = "NEWS_LOG_FORMAT";

fn wants_json(raw: Option<&str>) -> bool {
    raw.is_some_and(|v| v.trim().eq_ignore_ascii_case("json"))
}

/// Compact fmt logs, or one JSON object per line when `NEWS_LOG_FORMAT=json`.
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("news_aggregator=info,warn"));
    let json = wants_json(std::env::var(ENV_LOG_FORMAT).ok().as_deref());

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}
