// src/config/mod.rs
//! Static aggregator configuration: caps, thresholds, keyword lists and the source registry.
//!
//! Every field has a default, so a config file only needs the keys it overrides.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::sources::{clean_sources, default_sources, SourceSpec};

pub const ENV_CONFIG_PATH: &str = "NEWS_CONFIG_PATH";
pub const DEFAULT_TOML_PATH: &str = "config/aggregator.toml";
pub const DEFAULT_JSON_PATH: &str = "config/aggregator.json";

fn default_max_per_source() -> usize {
    20
}
fn default_max_total() -> usize {
    300
}
fn default_final_keep() -> usize {
    200
}
fn default_min_title_len() -> usize {
    10
}
fn default_min_summary_len() -> usize {
    40
}
fn default_summary_max_chars() -> usize {
    400
}
fn default_fetch_timeout_secs() -> u64 {
    20
}
fn default_output_path() -> PathBuf {
    PathBuf::from("news.json")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_generic_patterns() -> Vec<String> {
    strings(&[
        r"krótki (podsumowanie|przegląd)",
        r"wydarzenia na rynku",
        r"aktualności",
        r"wiadomości",
        r"news",
        r"przegląd rynków",
        r"raport",
    ])
}
fn default_domestic_sources() -> Vec<String> {
    strings(&[
        "bankier",
        "money",
        "parkiet",
        "pb.pl",
        "stockwatch",
        "puls",
        "comparic",
        "fxmag",
        "forsal",
        "stooq",
    ])
}
fn default_international_sources() -> Vec<String> {
    strings(&["reuters", "cnbc", "marketwatch", "yahoo", "bloomberg"])
}
fn default_eu_keywords() -> Vec<String> {
    strings(&["europe", "euro", "uk"])
}
fn default_crypto_keywords() -> Vec<String> {
    strings(&["crypto", "btc", "krypt", "bitcoin"])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Entries read from a single feed, regardless of feed size.
    #[serde(default = "default_max_per_source")]
    pub max_per_source: usize,
    /// Working cap applied while deduplicating, before ranking.
    #[serde(default = "default_max_total")]
    pub max_total: usize,
    /// Articles written to the snapshot.
    #[serde(default = "default_final_keep")]
    pub final_keep: usize,
    #[serde(default = "default_min_title_len")]
    pub min_title_len: usize,
    #[serde(default = "default_min_summary_len")]
    pub min_summary_len: usize,
    #[serde(default = "default_summary_max_chars")]
    pub summary_max_chars: usize,
    /// Case-insensitive regexes marking a title as low-signal.
    #[serde(default = "default_generic_patterns")]
    pub generic_patterns: Vec<String>,
    #[serde(default = "default_domestic_sources")]
    pub domestic_sources: Vec<String>,
    #[serde(default = "default_international_sources")]
    pub international_sources: Vec<String>,
    #[serde(default = "default_eu_keywords")]
    pub eu_keywords: Vec<String>,
    #[serde(default = "default_crypto_keywords")]
    pub crypto_keywords: Vec<String>,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceSpec>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_per_source: default_max_per_source(),
            max_total: default_max_total(),
            final_keep: default_final_keep(),
            min_title_len: default_min_title_len(),
            min_summary_len: default_min_summary_len(),
            summary_max_chars: default_summary_max_chars(),
            generic_patterns: default_generic_patterns(),
            domestic_sources: default_domestic_sources(),
            international_sources: default_international_sources(),
            eu_keywords: default_eu_keywords(),
            crypto_keywords: default_crypto_keywords(),
            output_path: default_output_path(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            sources: default_sources(),
        }
    }
}

impl AggregatorConfig {
    /// Load from an explicit path. Supports TOML or JSON.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading aggregator config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg = parse_config(&content, ext.as_str())
            .with_context(|| format!("parsing aggregator config {}", path.display()))?;
        Ok(cfg.sanitized())
    }

    /// Load using env var + fallbacks:
    /// 1) $NEWS_CONFIG_PATH
    /// 2) config/aggregator.toml
    /// 3) config/aggregator.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
        let toml_p = PathBuf::from(DEFAULT_TOML_PATH);
        if toml_p.exists() {
            return Self::load_from(&toml_p);
        }
        let json_p = PathBuf::from(DEFAULT_JSON_PATH);
        if json_p.exists() {
            return Self::load_from(&json_p);
        }
        Ok(Self::default())
    }

    /// Normalize keyword lists and keep the caps consistent.
    pub fn sanitized(mut self) -> Self {
        self.domestic_sources = clean_keywords(self.domestic_sources);
        self.international_sources = clean_keywords(self.international_sources);
        self.eu_keywords = clean_keywords(self.eu_keywords);
        self.crypto_keywords = clean_keywords(self.crypto_keywords);
        self.generic_patterns = self
            .generic_patterns
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        self.sources = clean_sources(self.sources);
        if self.final_keep > self.max_total {
            self.final_keep = self.max_total;
        }
        self
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<AggregatorConfig> {
    match hint_ext {
        "toml" => Ok(toml::from_str(s)?),
        "json" => Ok(serde_json::from_str(s)?),
        _ => {
            // No usable extension: JSON first, TOML second.
            if let Ok(v) = serde_json::from_str(s) {
                return Ok(v);
            }
            toml::from_str(s).map_err(|e| anyhow!("unsupported config format: {e}"))
        }
    }
}

/// Trim, lowercase, drop empties and duplicates. First occurrence keeps its position.
fn clean_keywords(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim().to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}
