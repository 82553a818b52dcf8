// src/ingest/providers/rss.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use quick_xml::de::from_str;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::time::Duration;

use crate::ingest::types::{RawEntry, SourceProvider};
use crate::sources::SourceSpec;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    #[serde(rename = "dc:title")]
    dc_title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    #[serde(rename = "dc:date")]
    dc_date: Option<String>,
    #[serde(rename = "atom:updated")]
    atom_updated: Option<String>,
    description: Option<String>,
}

impl From<Item> for RawEntry {
    fn from(it: Item) -> Self {
        RawEntry {
            title: it.title,
            headline: it.dc_title,
            link: it.link,
            description: it.description,
            published: it.pub_date,
            updated: it.atom_updated.or(it.dc_date),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entry: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<String>,
    #[serde(rename = "link", default)]
    link: Vec<AtomLink>,
    summary: Option<String>,
    published: Option<String>,
    updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

impl From<AtomEntry> for RawEntry {
    fn from(e: AtomEntry) -> Self {
        // rel="alternate" (or no rel) is the article itself; fall back to any href.
        let link = e
            .link
            .iter()
            .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
            .or_else(|| e.link.first())
            .and_then(|l| l.href.clone());
        RawEntry {
            title: e.title,
            link,
            summary: e.summary,
            published: e.published,
            updated: e.updated,
            ..Default::default()
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum FeedKind {
    Rss,
    Atom,
}

/// Root element decides the format: `<feed>` is Atom, anything else is treated as RSS.
fn sniff_feed_kind(xml: &str) -> FeedKind {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return if e.local_name().as_ref() == b"feed" {
                    FeedKind::Atom
                } else {
                    FeedKind::Rss
                };
            }
            Ok(Event::Eof) | Err(_) => return FeedKind::Rss,
            Ok(_) => {}
        }
    }
}

/// RSS 2.0 or Atom feed source. Either fetched over HTTP or parsed from an in-memory fixture.
pub struct RssProvider {
    name: String,
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl RssProvider {
    pub fn from_fixture(name: impl Into<String>, xml: &str) -> Self {
        Self {
            name: name.into(),
            mode: Mode::Fixture(xml.to_string()),
        }
    }

    pub fn from_url(name: impl Into<String>, url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            name: name.into(),
            mode: Mode::Http {
                url: url.into(),
                client,
            },
        }
    }

    fn parse_items_from_str(&self, s: &str) -> Result<Vec<RawEntry>> {
        let xml_clean = html_entities_to_numeric(s);
        match sniff_feed_kind(&xml_clean) {
            FeedKind::Atom => {
                let feed: AtomFeed = from_str(&xml_clean)
                    .with_context(|| format!("parsing {} atom xml", self.name))?;
                Ok(feed.entry.into_iter().map(RawEntry::from).collect())
            }
            FeedKind::Rss => {
                let rss: Rss = from_str(&xml_clean)
                    .with_context(|| format!("parsing {} rss xml", self.name))?;
                Ok(rss.channel.item.into_iter().map(RawEntry::from).collect())
            }
        }
    }
}

#[async_trait]
impl SourceProvider for RssProvider {
    async fn fetch_latest(&self) -> Result<Vec<RawEntry>> {
        match &self.mode {
            Mode::Fixture(s) => self.parse_items_from_str(s),
            Mode::Http { url, client } => {
                let body = client
                    .get(url.as_str())
                    .send()
                    .await
                    .with_context(|| format!("{} http get()", self.name))?
                    .error_for_status()
                    .with_context(|| format!("{} http status", self.name))?
                    .text()
                    .await
                    .with_context(|| format!("{} http .text()", self.name))?;
                self.parse_items_from_str(&body)
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// One HTTP provider per registry row, sharing a client, in registry order.
pub fn providers_from_sources(
    sources: &[SourceSpec],
    timeout_secs: u64,
) -> Result<Vec<Box<dyn SourceProvider>>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("news-aggregator/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building http client")?;

    Ok(sources
        .iter()
        .map(|s| {
            Box::new(RssProvider::from_url(&s.name, &s.url, client.clone()))
                as Box<dyn SourceProvider>
        })
        .collect())
}

// Named HTML entities are not valid XML; feeds use them anyway. Rewrite every
// named entity except the five XML ones as a numeric reference. Names HTML
// does not know either are escaped so they survive as literal text.
fn html_entities_to_numeric(s: &str) -> String {
    static RE_ENTITY: OnceCell<Regex> = OnceCell::new();
    let re = RE_ENTITY.get_or_init(|| Regex::new(r"&([A-Za-z][A-Za-z0-9]*);").unwrap());

    re.replace_all(s, |caps: &Captures| {
        let name = &caps[1];
        if matches!(name, "amp" | "lt" | "gt" | "quot" | "apos") {
            return caps[0].to_string();
        }
        let decoded = html_escape::decode_html_entities(&caps[0]);
        if decoded == caps[0] {
            return format!("&amp;{name};");
        }
        decoded.chars().map(|c| format!("&#x{:X};", c as u32)).collect()
    })
    .into_owned()
}
