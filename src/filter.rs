//! Low-signal filter.
//!
//! A title is "generic" when it is missing, too short, or matches one of the
//! configured boilerplate patterns (case-insensitive). A generic title only
//! costs the entry its place when the summary is short too; a long summary
//! carries the entry on its own. Non-generic titles always pass.

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

use crate::config::AggregatorConfig;
use crate::normalize::NormalizedEntry;

#[derive(Debug, Clone)]
pub struct SignalFilter {
    min_title_len: usize,
    min_summary_len: usize,
    patterns: Vec<Regex>,
}

impl SignalFilter {
    pub fn new<S: AsRef<str>>(
        min_title_len: usize,
        min_summary_len: usize,
        patterns: &[S],
    ) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p.as_ref())
                    .case_insensitive(true)
                    .build()
                    .with_context(|| format!("compiling generic-title pattern {:?}", p.as_ref()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            min_title_len,
            min_summary_len,
            patterns,
        })
    }

    pub fn from_config(cfg: &AggregatorConfig) -> Result<Self> {
        Self::new(
            cfg.min_title_len,
            cfg.min_summary_len,
            cfg.generic_patterns.as_slice(),
        )
    }

    pub fn is_generic_title(&self, title: &str) -> bool {
        let t = title.trim();
        if t.is_empty() || t.chars().count() < self.min_title_len {
            return true;
        }
        self.patterns.iter().any(|re| re.is_match(t))
    }

    /// `true` = keep.
    pub fn keep(&self, entry: &NormalizedEntry) -> bool {
        if !self.is_generic_title(&entry.title) {
            return true;
        }
        entry.summary.chars().count() >= self.min_summary_len
    }
}
