// Canonical tag form and batch bounding guard rails.

use blueprint_channels::{MAX_TAGS, normalize_tag, normalize_tags};

const SAMPLES: &[&str] = &[
    "",
    "   ",
    "Shake!",
    "  Sleep   Recovery  ",
    "--leading and trailing--",
    "a--b---c",
    "Tabs\tand\nnewlines",
    "Crème brûlée",
    "100% Protein!!",
    "!!!",
    "-",
    "x - - y",
    "ÀÉÎ",
    "MiXeD_Case_Underscore",
    "emoji 🎉 party",
];

fn assert_canonical(tag: &str) {
    assert!(
        tag.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
        "unexpected character in {tag:?}"
    );
    assert!(!tag.starts_with('-'), "leading hyphen in {tag:?}");
    assert!(!tag.ends_with('-'), "trailing hyphen in {tag:?}");
    assert!(!tag.contains("--"), "doubled hyphen in {tag:?}");
}

#[test]
fn normalized_tags_are_canonical() {
    for sample in SAMPLES {
        assert_canonical(&normalize_tag(sample));
    }
}

#[test]
fn normalize_tag_is_idempotent() {
    for sample in SAMPLES {
        let once = normalize_tag(sample);
        assert_eq!(normalize_tag(&once), once, "input {sample:?}");
    }
}

#[test]
fn known_conversions() {
    assert_eq!(normalize_tag("  Sleep   Recovery  "), "sleep-recovery");
    assert_eq!(normalize_tag("100% Protein!!"), "100-protein");
    assert_eq!(normalize_tag("MiXeD_Case_Underscore"), "mixedcaseunderscore");
    assert_eq!(normalize_tag("emoji 🎉 party"), "emoji-party");
    assert_eq!(normalize_tag("ÀÉÎ"), "");
}

#[test]
fn shake_variants_collapse_to_one_tag() {
    assert_eq!(normalize_tags(["Shake!", "SHAKE", " shake "]), vec!["shake"]);
}

#[test]
fn batch_never_exceeds_max_and_never_repeats() {
    let tags = normalize_tags(SAMPLES);
    assert!(tags.len() <= MAX_TAGS);
    let mut sorted = tags.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), tags.len());
}

#[test]
fn batch_keeps_first_seen_order_when_truncating() {
    let tags = normalize_tags(["Zeta", "alpha", "ZETA", "beta", "", "gamma", "delta"]);
    assert_eq!(tags, vec!["zeta", "alpha", "beta", "gamma"]);
}

#[test]
fn batch_is_idempotent() {
    let inputs = ["Meal Prep", "meal-prep", "Rest!", "?", "Sleep"];
    let once = normalize_tags(inputs);
    assert_eq!(normalize_tags(&once), once);
}

#[test]
fn punctuation_only_batch_is_empty() {
    assert!(normalize_tags(["!!!", "   ", "-"]).is_empty());
}
