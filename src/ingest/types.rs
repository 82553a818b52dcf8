// src/ingest/types.rs
use anyhow::Result;

/// Entry as handed over by a feed. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RawEntry {
    pub title: Option<String>,
    pub headline: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub published: Option<String>, // verbatim, format varies per feed
    pub updated: Option<String>,
}

#[async_trait::async_trait]
pub trait SourceProvider: Send + Sync {
    async fn fetch_latest(&self) -> Result<Vec<RawEntry>>;
    fn name(&self) -> &str;
}
