//! Tag canonicalization and primary-channel resolution for blueprints.
//!
//! Free-text labels become canonical tag slugs through [`normalize_tags`];
//! a tag set maps to exactly one channel through [`resolve_primary_channel`]
//! (or the indexed [`ChannelCatalog::resolve`]). Both are total: bad input
//! degrades to "no tag" or the `general` channel.

pub mod catalog;
pub mod postability;
pub mod resolver;
pub mod runtime;
pub mod tags;

use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;

pub use catalog::{
    CatalogKey, CatalogMetadata, CatalogSchema, ChannelCatalog, ChannelCatalogFile, ChannelEntry, ChannelStatus,
    DEFAULT_CATALOG_PATH, DEFAULT_CATALOG_SCHEMA_PATH, load_catalog_from_path,
};
pub use postability::{is_channel_postable, is_slug_postable};
pub use resolver::{
    CHANNEL_LABEL_PREFIX, FALLBACK_CHANNEL, MatchKind, channel_label_for_tags,
    resolve_primary_channel,
};
pub use tags::{MAX_TAGS, is_canonical_tag, normalize_tag, normalize_tags};

/// Split a comma separated tag list. Whitespace inside a tag is kept since it
/// becomes a hyphen during canonicalization.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse raw tags from stdin-style input: a JSON array of strings, or one tag
/// per line.
pub fn parse_tag_stream(input: &str) -> Result<Vec<String>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        let value: Value = serde_json::from_str(trimmed).context("parsing JSON tag array")?;
        let Value::Array(items) = value else {
            bail!("expected a JSON array of tags");
        };
        return items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::String(tag) => Ok(tag),
                other => Err(anyhow!("tag at index {idx} is not a string: {other}")),
            })
            .collect();
    }

    Ok(trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
