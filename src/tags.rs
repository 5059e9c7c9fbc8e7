//! Tag canonicalization.
//!
//! Free-text labels are reduced to slugs made of `a-z`, `0-9` and single
//! interior hyphens. `normalize_tag` is the only canonicalization routine in
//! the crate; the resolver and catalog validation both call it so the rules
//! cannot drift apart.

use std::collections::HashSet;
use tracing::trace;

/// Maximum number of distinct tags kept by [`normalize_tags`].
pub const MAX_TAGS: usize = 4;

/// Canonicalize a single label.
///
/// Returns an empty string when nothing survives (for example `"!!!"`);
/// callers treat that as "no tag".
pub fn normalize_tag(input: &str) -> String {
    let lowered = input.trim_matches(is_tag_whitespace).to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for ch in lowered.chars() {
        if is_tag_whitespace(ch) {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' {
            slug.push(ch);
        }
    }

    collapse_hyphens(&slug)
}

/// Whitespace as the web client's `\s` class sees it: Unicode space
/// separators plus tab, line terminators and U+FEFF, but not U+0085.
fn is_tag_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' ' | '\u{A0}' | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}' | '\u{2029}' | '\u{202F}' | '\u{205F}' | '\u{3000}' | '\u{FEFF}'
    )
}

fn collapse_hyphens(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_dash = false;
    for ch in raw.chars() {
        if ch == '-' {
            if prev_dash {
                continue;
            }
            prev_dash = true;
        } else {
            prev_dash = false;
        }
        out.push(ch);
    }
    out.trim_matches('-').to_string()
}

/// Canonicalize a batch of labels.
///
/// Keeps first-seen order, drops empty and repeated slugs, and stops after
/// [`MAX_TAGS`] distinct entries.
pub fn normalize_tags<I, S>(inputs: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for raw in inputs {
        let raw = raw.as_ref();
        let tag = normalize_tag(raw);
        if tag.is_empty() {
            trace!(input = raw, "dropping label with no canonical form");
            continue;
        }
        if !seen.insert(tag.clone()) {
            trace!(input = raw, tag = %tag, "dropping duplicate tag");
            continue;
        }
        if out.len() == MAX_TAGS {
            trace!(tag = %tag, max = MAX_TAGS, "tag limit reached; truncating");
            break;
        }
        out.push(tag);
    }

    out
}

/// True when `value` is already in canonical form and non-empty.
pub fn is_canonical_tag(value: &str) -> bool {
    !value.is_empty() && normalize_tag(value) == value
}
