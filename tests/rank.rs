// tests/rank.rs
use news_aggregator::rank::rank_and_truncate;
use news_aggregator::{Category, FinalEntry};

fn f(title: &str, published: &str) -> FinalEntry {
    FinalEntry {
        title: title.into(),
        link: format!("https://n/{title}"),
        summary: String::new(),
        published: published.into(),
        source: "Reuters".into(),
        category: Category::Us,
    }
}

#[test]
fn newest_first_and_exact_cap() {
    let input = vec![
        f("a", "2025-03-01T10:00:00Z"),
        f("b", "2025-03-03T10:00:00Z"),
        f("c", "2025-03-02T10:00:00Z"),
        f("d", "2025-02-28T10:00:00Z"),
    ];
    let out = rank_and_truncate(input, 2);
    let titles: Vec<_> = out.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["b", "c"]);
}

#[test]
fn equal_timestamps_keep_input_order() {
    let ts = "2025-03-01T10:00:00Z";
    let input = vec![f("first", ts), f("second", ts), f("third", ts)];
    let out = rank_and_truncate(input, 10);
    let titles: Vec<_> = out.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[test]
fn mixed_formats_do_not_panic() {
    let input = vec![
        f("rfc2822", "Mon, 03 Mar 2025 09:15:00 +0100"),
        f("iso", "2025-03-03T09:15:00Z"),
        f("empty", ""),
    ];
    let out = rank_and_truncate(input, 10);
    assert_eq!(out.len(), 3);
    assert_eq!(out.last().unwrap().title, "empty");
}
