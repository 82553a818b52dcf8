//! Entry normalizer: raw feed entry → canonical `NormalizedEntry`.
//!
//! Pure transform. Missing fields become empty strings, never a reason to drop.
//! Published timestamps are passed through verbatim; only a missing value is
//! replaced, by `now` rendered as RFC 3339 UTC.

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ingest::types::RawEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEntry {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: String,
    pub source: String,
}

/// Collapse whitespace runs to one space and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode HTML entities and collapse whitespace. Angle brackets stay: titles
/// are plain text, and "Zysk <netto> wyższy" must keep every word.
pub fn clean_title(s: &str) -> String {
    collapse_whitespace(&html_escape::decode_html_entities(s))
}

/// Decode HTML entities, strip tags, collapse whitespace. For summaries.
pub fn clean_text(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s);

    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[a-z!][^>]*>").unwrap());
    let stripped = re_tags.replace_all(&decoded, " ");

    collapse_whitespace(&stripped)
}

/// Link with any `#fragment` removed, trimmed.
pub fn canonical_link(link: &str) -> String {
    link.split('#').next().unwrap_or_default().trim().to_string()
}

/// Cut to at most `max` characters (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].trim_end().to_string(),
        None => s.to_string(),
    }
}

fn first_populated(fields: &[&Option<String>]) -> Option<String> {
    fields
        .iter()
        .filter_map(|f| f.as_deref())
        .find(|v| !v.trim().is_empty())
        .map(str::to_string)
}

pub fn fallback_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn normalize_entry(
    raw: RawEntry,
    source: &str,
    now: DateTime<Utc>,
    summary_max_chars: usize,
) -> NormalizedEntry {
    let title = first_populated(&[&raw.title, &raw.headline])
        .map(|t| clean_title(&t))
        .unwrap_or_default();
    let summary = first_populated(&[&raw.summary, &raw.description])
        .map(|s| clean_text(&s))
        .map(|s| truncate_chars(&s, summary_max_chars))
        .unwrap_or_default();
    let link = raw.link.as_deref().map(canonical_link).unwrap_or_default();
    let published = first_populated(&[&raw.published, &raw.updated])
        .map(|p| p.trim().to_string())
        .unwrap_or_else(|| fallback_timestamp(now));

    NormalizedEntry {
        title,
        link,
        summary,
        published,
        source: source.to_string(),
    }
}
