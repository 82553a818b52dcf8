//! News aggregator — binary entrypoint.
//! One batch run: fetch all sources, build the snapshot, write it, exit.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    news_aggregator::telemetry::init_tracing();

    match news_aggregator::run_from_env().await {
        Ok(report) => {
            if !report.failed_sources.is_empty() {
                tracing::warn!(failed = ?report.failed_sources, "some sources were skipped");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = ?e, "aggregation run failed");
            ExitCode::FAILURE
        }
    }
}
