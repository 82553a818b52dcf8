//! Source registry: human-readable feed name → fetch endpoint.
//!
//! Order matters. Sources are fetched in registry order, and the deduplicator
//! keeps the first copy it sees, so a story cross-posted by several feeds
//! survives under whichever source is listed first.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub name: String,
    pub url: String,
}

impl SourceSpec {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Built-in registry: Polish financial sites first, then international business feeds.
pub fn default_sources() -> Vec<SourceSpec> {
    [
        // Polska
        ("Bankier.pl", "https://www.bankier.pl/rss/wiadomosci.xml"),
        ("Money.pl", "https://www.money.pl/rss/"),
        ("BusinessInsider.pl", "https://businessinsider.com.pl/.feed"),
        ("Comparic.pl", "https://comparic.pl/feed/"),
        ("Stooq.pl", "https://stooq.pl/n/?f=114"),
        ("FXMag.pl", "https://fxmag.pl/feed"),
        ("Forsal.pl", "https://forsal.pl/rss"),
        ("Parkiet.com", "https://www.parkiet.com/rss/1079"),
        ("PulsBiznesu.pl", "https://www.pb.pl/rss"),
        ("StockWatch.pl", "https://www.stockwatch.pl/rss.xml"),
        // International / USA
        ("Reuters", "http://feeds.reuters.com/reuters/businessNews"),
        ("CNBC", "https://www.cnbc.com/id/10001147/device/rss/rss.html"),
        ("MarketWatch", "https://www.marketwatch.com/rss/topstories"),
        ("YahooFinance", "https://feeds.finance.yahoo.com/rss/"),
        (
            "Bloomberg",
            "https://www.bloomberg.com/feed/podcast/etf-report.xml",
        ),
    ]
    .into_iter()
    .map(|(name, url)| SourceSpec::new(name, url))
    .collect()
}

/// Drop rows with a blank name or URL, trimming the rest. Keeps order.
pub(crate) fn clean_sources(items: Vec<SourceSpec>) -> Vec<SourceSpec> {
    items
        .into_iter()
        .filter_map(|s| {
            let name = s.name.trim();
            let url = s.url.trim();
            if name.is_empty() || url.is_empty() {
                None
            } else {
                Some(SourceSpec::new(name, url))
            }
        })
        .collect()
}
