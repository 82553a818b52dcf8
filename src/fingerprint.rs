//! Title fingerprint used as the secondary dedup key.

/// Lowercase, collapse whitespace, trim, drop everything that is not
/// alphanumeric or a space. Whitespace is collapsed once more at the end so
/// punctuation surrounded by spaces ("A - B") leaves no double gap.
///
/// An empty or absent title yields `""`, which callers must not treat as a key.
pub fn title_fingerprint(title: &str) -> String {
    let lowered = title.to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    let stripped: String = collapsed
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
