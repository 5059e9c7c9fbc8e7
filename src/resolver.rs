//! Primary-channel resolution.
//!
//! Maps a set of tags to exactly one channel slug. Every input tag is
//! re-canonicalized, matched against each non-`general` catalog entry (exact
//! `tagSlug` first, then aliases), and the smallest candidate under
//! `(match kind, priority, slug)` wins. Unmatched or empty input falls back to
//! `general`. None of these functions can fail.

use crate::catalog::ChannelEntry;
use crate::tags::normalize_tag;
use std::collections::BTreeSet;
use tracing::debug;

/// Reserved fallback channel; never matched by tags.
pub const FALLBACK_CHANNEL: &str = "general";

/// Prefix used by [`channel_label_for_tags`].
pub const CHANNEL_LABEL_PREFIX: &str = "b/";

/// How a tag matched a channel. Declaration order is precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchKind {
    Exact,
    Alias,
}

/// A (tag, channel) match. Field order defines the ranking: derived `Ord`
/// compares kind, then priority, then slug.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Candidate<'a> {
    pub kind: MatchKind,
    pub priority: i64,
    pub slug: &'a str,
}

impl<'a> Candidate<'a> {
    pub fn new(kind: MatchKind, entry: &'a ChannelEntry) -> Self {
        Self {
            kind,
            priority: entry.priority,
            slug: entry.slug.as_str(),
        }
    }
}

/// Fallback slug for `catalog`: its `general` entry, or the literal
/// `"general"` when the catalog lacks one.
pub fn fallback_slug(catalog: &[ChannelEntry]) -> &str {
    catalog
        .iter()
        .find(|entry| entry.slug == FALLBACK_CHANNEL)
        .map(|entry| entry.slug.as_str())
        .unwrap_or(FALLBACK_CHANNEL)
}

/// Canonicalize, dedupe and drop empties, without the batch size limit.
pub(crate) fn canonical_tag_set<S: AsRef<str>>(tags: &[S]) -> BTreeSet<String> {
    tags.iter()
        .map(|tag| normalize_tag(tag.as_ref()))
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Resolve the primary channel by scanning every catalog entry.
pub fn resolve_primary_channel<'a, S: AsRef<str>>(
    tag_slugs: &[S],
    catalog: &'a [ChannelEntry],
) -> &'a str {
    let fallback = fallback_slug(catalog);
    if tag_slugs.is_empty() {
        return fallback;
    }

    let tags = canonical_tag_set(tag_slugs);
    if tags.is_empty() {
        debug!("no usable tags after canonicalization; using {fallback}");
        return fallback;
    }

    let mut candidates: Vec<Candidate<'a>> = Vec::new();
    for entry in catalog.iter().filter(|e| e.slug != FALLBACK_CHANNEL) {
        for tag in &tags {
            if *tag == entry.tag_slug {
                candidates.push(Candidate::new(MatchKind::Exact, entry));
            } else if entry.has_alias(tag) {
                candidates.push(Candidate::new(MatchKind::Alias, entry));
            }
        }
    }

    pick_winner(candidates, fallback, &tags)
}

/// Smallest candidate's slug, or `fallback` when nothing matched.
pub(crate) fn pick_winner<'a>(
    candidates: impl IntoIterator<Item = Candidate<'a>>,
    fallback: &'a str,
    tags: &BTreeSet<String>,
) -> &'a str {
    match candidates.into_iter().min() {
        Some(winner) => winner.slug,
        None => {
            debug!(?tags, "no channel matched; using {fallback}");
            fallback
        }
    }
}

/// `"b/" + resolve_primary_channel(tags, catalog)`.
pub fn channel_label_for_tags<S: AsRef<str>>(tag_slugs: &[S], catalog: &[ChannelEntry]) -> String {
    format_channel_label(resolve_primary_channel(tag_slugs, catalog))
}

/// Display label for a channel slug, e.g. `b/general`.
pub fn format_channel_label(slug: &str) -> String {
    format!("{CHANNEL_LABEL_PREFIX}{slug}")
}
