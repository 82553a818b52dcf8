pub mod rss;

pub use rss::{providers_from_sources, RssProvider};
