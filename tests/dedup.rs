// tests/dedup.rs
use std::collections::HashSet;

use news_aggregator::dedup::{dedupe_and_filter, DedupState};
use news_aggregator::filter::SignalFilter;
use news_aggregator::fingerprint::title_fingerprint;
use news_aggregator::normalize::NormalizedEntry;

fn e(source: &str, title: &str, link: &str) -> NormalizedEntry {
    NormalizedEntry {
        title: title.into(),
        link: link.into(),
        summary: String::new(),
        published: "2025-03-03T09:00:00Z".into(),
        source: source.into(),
    }
}

fn filter() -> SignalFilter {
    SignalFilter::new(10, 40, &["przegląd rynków"]).unwrap()
}

#[test]
fn first_seen_wins_on_title_variants() {
    let raw = vec![
        e("Bankier.pl", "Rynek akcji rośnie trzeci dzień", "https://b.pl/1"),
        e("Bankier.pl", "RYNEK akcji rośnie, trzeci dzień!", "https://b.pl/2"),
    ];
    let mut st = DedupState::new();
    let (kept, stats) = dedupe_and_filter(raw, &filter(), &mut st, 300);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].link, "https://b.pl/1");
    assert_eq!(stats.duplicate_title, 1);
}

#[test]
fn cross_source_link_duplicate_keeps_earlier_source() {
    let raw = vec![
        e("Money.pl", "Złoty najmocniejszy od roku", "https://x.pl/a#top"),
        e("Forsal.pl", "Inny tytuł tego samego tekstu", "https://x.pl/a"),
    ];
    let mut st = DedupState::new();
    let (kept, stats) = dedupe_and_filter(raw, &filter(), &mut st, 300);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].source, "Money.pl");
    assert_eq!(stats.duplicate_link, 1);
}

#[test]
fn blank_records_are_dropped_individually() {
    let raw = vec![
        e("A", "", ""),
        e("A", "", ""),
        e("A", "Kurs franka spada trzeci dzień", ""),
    ];
    let mut st = DedupState::new();
    let (kept, stats) = dedupe_and_filter(raw, &filter(), &mut st, 300);
    assert_eq!(stats.keyless, 2);
    assert_eq!(kept.len(), 1);
}

#[test]
fn emitted_entries_never_share_nonempty_keys() {
    let titles = [
        "Inflacja spada",
        "INFLACJA SPADA!",
        "Stopy bez zmian w marcu",
        "Inflacja spada w lutym",
        "stopy bez zmian, w marcu",
        "Nowy rekord WIG20",
    ];
    let links = ["https://a/1", "https://a/2", "https://a/1#c", "", "https://a/3", ""];
    let raw: Vec<_> = titles
        .iter()
        .zip(links.iter())
        .map(|(t, l)| e("Bankier.pl", &format!("{t} na rynku"), l))
        .collect();

    let mut st = DedupState::new();
    let (kept, _) = dedupe_and_filter(raw, &filter(), &mut st, 300);

    let mut links_seen = HashSet::new();
    let mut fps_seen = HashSet::new();
    for k in &kept {
        let link = k.link.split('#').next().unwrap().to_string();
        if !link.is_empty() {
            assert!(links_seen.insert(link), "duplicate link in {kept:?}");
        }
        let fp = title_fingerprint(&k.title);
        if !fp.is_empty() {
            assert!(fps_seen.insert(fp), "duplicate fingerprint in {kept:?}");
        }
    }
    // #2 repeats #1's title, #3 repeats #1's link; #5 is new because #3 never got in.
    assert_eq!(kept.len(), 4);
}

#[test]
fn working_cap_applies_across_sources() {
    let raw: Vec<_> = (0..10)
        .map(|i| {
            let src = if i < 5 { "Bankier.pl" } else { "Reuters" };
            e(src, &format!("Unikalny nagłówek numer {i}"), &format!("https://n/{i}"))
        })
        .collect();
    let mut st = DedupState::new();
    let (kept, stats) = dedupe_and_filter(raw, &filter(), &mut st, 4);
    assert_eq!(kept.len(), 4);
    assert!(kept.iter().all(|k| k.source == "Bankier.pl"));
    assert_eq!(stats.over_cap, 6);
}
