//! # Categorizer
//! Coarse topical/geographic tag from source identity and title keywords.
//!
//! Decision order, first match wins:
//! 1. source matches a domestic identifier → `pl`
//! 2. source matches an international identifier → `eu` if the title has a
//!    Europe/UK keyword, else `us`
//! 3. title has a crypto keyword → `crypto`
//! 4. `other`
//!
//! All matching is lowercase substring matching. This is a heuristic and will
//! misfile edge cases (e.g. "uk" inside an unrelated word); nothing checks the
//! result against ground truth.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::AggregatorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pl,
    Eu,
    Us,
    Crypto,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pl => "pl",
            Category::Eu => "eu",
            Category::Us => "us",
            Category::Crypto => "crypto",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Categorizer {
    domestic_sources: Vec<String>,
    international_sources: Vec<String>,
    eu_keywords: Vec<String>,
    crypto_keywords: Vec<String>,
}

fn lower_all(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|n| !n.is_empty() && haystack.contains(n.as_str()))
}

impl Categorizer {
    pub fn new(
        domestic_sources: &[String],
        international_sources: &[String],
        eu_keywords: &[String],
        crypto_keywords: &[String],
    ) -> Self {
        Self {
            domestic_sources: lower_all(domestic_sources),
            international_sources: lower_all(international_sources),
            eu_keywords: lower_all(eu_keywords),
            crypto_keywords: lower_all(crypto_keywords),
        }
    }

    pub fn from_config(cfg: &AggregatorConfig) -> Self {
        Self::new(
            &cfg.domestic_sources,
            &cfg.international_sources,
            &cfg.eu_keywords,
            &cfg.crypto_keywords,
        )
    }

    pub fn categorize(&self, source: &str, title: &str) -> Category {
        let s = source.to_lowercase();
        let t = title.to_lowercase();

        if contains_any(&s, &self.domestic_sources) {
            return Category::Pl;
        }
        if contains_any(&s, &self.international_sources) {
            if contains_any(&t, &self.eu_keywords) {
                return Category::Eu;
            }
            return Category::Us;
        }
        if contains_any(&t, &self.crypto_keywords) {
            return Category::Crypto;
        }
        Category::Other
    }
}
