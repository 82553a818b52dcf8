// src/snapshot.rs
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::categorize::Category;
use crate::normalize::NormalizedEntry;

/// One article as written to the snapshot: flat `{title, link, summary, published, source, category}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalEntry {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: String,
    pub source: String,
    pub category: Category,
}

impl FinalEntry {
    pub fn from_normalized(entry: NormalizedEntry, category: Category) -> Self {
        Self {
            title: entry.title,
            link: entry.link,
            summary: entry.summary,
            published: entry.published,
            source: entry.source,
            category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub generated_at: String, // RFC 3339 UTC
    pub articles: Vec<FinalEntry>,
}

impl Snapshot {
    pub fn new(generated_at: DateTime<Utc>, articles: Vec<FinalEntry>) -> Self {
        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            articles,
        }
    }

    /// Pretty JSON, non-ASCII left as-is.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing snapshot")
    }
}

#[async_trait::async_trait]
pub trait SnapshotSink: Send + Sync {
    /// Persist the snapshot. An error here is fatal for the run.
    async fn store(&self, snapshot: &Snapshot) -> Result<()>;
}

/// Writes the snapshot to a JSON file via temp file + rename, so readers
/// never observe a half-written document.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait::async_trait]
impl SnapshotSink for JsonFileSink {
    async fn store(&self, snapshot: &Snapshot) -> Result<()> {
        let body = snapshot.to_json_pretty()?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, body)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("moving snapshot into {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub stored: std::sync::Mutex<Vec<Snapshot>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Snapshot> {
        self.stored.lock().ok().and_then(|v| v.last().cloned())
    }
}

#[async_trait::async_trait]
impl SnapshotSink for MemorySink {
    async fn store(&self, snapshot: &Snapshot) -> Result<()> {
        self.stored
            .lock()
            .map_err(|_| anyhow::anyhow!("memory sink mutex poisoned"))?
            .push(snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Snapshot {
        let entry = NormalizedEntry {
            title: "Złoty umacnia się".into(),
            link: "https://www.bankier.pl/a".into(),
            summary: "Kurs EUR/PLN spada".into(),
            published: "2025-03-01T08:00:00Z".into(),
            source: "Bankier.pl".into(),
        };
        Snapshot::new(
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
            vec![FinalEntry::from_normalized(entry, Category::Pl)],
        )
    }

    #[test]
    fn serializes_flat_articles_and_keeps_unicode() {
        let json = sample().to_json_pretty().unwrap();
        assert!(json.contains("\"generated_at\": \"2025-03-01T09:00:00Z\""));
        assert!(json.contains("\"category\": \"pl\""));
        assert!(json.contains("Złoty umacnia się"));
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        let keys: Vec<_> = v["articles"][0].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 6);
    }

    #[tokio::test]
    async fn file_sink_writes_and_leaves_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("news.json");
        let sink = JsonFileSink::new(&path);
        sink.store(&sample()).await.unwrap();

        let back: Snapshot =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, sample());
        assert!(!dir.path().join("out").join("news.json.tmp").exists());
    }
}
