// tests/categorize.rs
use news_aggregator::config::AggregatorConfig;
use news_aggregator::{Categorizer, Category};

fn c() -> Categorizer {
    Categorizer::from_config(&AggregatorConfig::default())
}

#[test]
fn international_source_splits_eu_and_us() {
    let c = c();
    assert_eq!(
        c.categorize("Reuters", "European markets rally on ECB move"),
        Category::Eu
    );
    assert_eq!(c.categorize("Reuters", "Wall Street closes higher"), Category::Us);
    assert_eq!(c.categorize("MarketWatch", "UK gilts slide"), Category::Eu);
}

#[test]
fn domestic_source_is_always_pl() {
    let c = c();
    for title in ["Wall Street closes higher", "Bitcoin rośnie", "European markets"] {
        assert_eq!(c.categorize("Bankier.pl", title), Category::Pl);
    }
    assert_eq!(c.categorize("PulsBiznesu.pl", "x"), Category::Pl);
}

#[test]
fn unknown_source_falls_to_crypto_or_other() {
    let c = c();
    assert_eq!(c.categorize("Blog", "Kryptowaluty tracą"), Category::Crypto);
    assert_eq!(c.categorize("Blog", "BTC above 90k"), Category::Crypto);
    assert_eq!(c.categorize("Blog", "Ceny mieszkań"), Category::Other);
}
