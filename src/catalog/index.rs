//! Validated channel catalog plus a derived tag index.
//!
//! Loading is strict: the schema version must be known, every slug, tag and
//! alias must already be canonical, slugs must be unique and `general` must be
//! present. Resolution through the index returns the same slug as
//! [`resolve_primary_channel`](crate::resolver::resolve_primary_channel) over
//! the same entries.

use crate::catalog::{CatalogKey, CatalogMetadata, ChannelCatalogFile, ChannelEntry};
use crate::catalog::{load_catalog_from_path, parse_catalog};
use crate::postability::is_channel_postable;
use crate::resolver::{
    Candidate, FALLBACK_CHANNEL, MatchKind, canonical_tag_set, fallback_slug, format_channel_label,
    pick_winner,
};
use crate::tags::is_canonical_tag;
use anyhow::{Context, Result, bail};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::info;

pub const DEFAULT_SCHEMA_VERSION: &str = "channel_catalog_v1";
const ENV_ALLOWED_SCHEMA_VERSIONS: &str = "BLUEPRINT_ALLOWED_CATALOG_SCHEMAS";

const BUNDLED_CATALOG: &str = include_str!("../../catalogs/channels_v1.json");

#[derive(Debug)]
pub struct ChannelCatalog {
    metadata: CatalogMetadata,
    channels: Vec<ChannelEntry>,
    by_slug: BTreeMap<String, usize>,
    by_tag: BTreeMap<String, Vec<(MatchKind, usize)>>,
}

impl ChannelCatalog {
    /// Load and validate a catalog from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = load_catalog_from_path(path)?;
        let catalog =
            Self::from_file(file).with_context(|| format!("validating {}", path.display()))?;
        info!(
            path = %path.display(),
            key = %catalog.key(),
            channels = catalog.channels.len(),
            "loaded channel catalog"
        );
        Ok(catalog)
    }

    /// The catalog compiled into the crate (`catalogs/channels_v1.json`).
    pub fn bundled() -> Result<Self> {
        let file = parse_catalog(BUNDLED_CATALOG).context("parsing bundled channel catalog")?;
        Self::from_file(file).context("validating bundled channel catalog")
    }

    pub fn from_file(file: ChannelCatalogFile) -> Result<Self> {
        validate_schema_version(&file.schema_version)?;
        validate_catalog_metadata(&file.catalog)?;
        let by_slug = build_slug_index(&file.channels)?;
        let by_tag = build_tag_index(&file.channels);
        Ok(Self {
            metadata: file.catalog,
            channels: file.channels,
            by_slug,
            by_tag,
        })
    }

    pub fn key(&self) -> &CatalogKey {
        &self.metadata.key
    }

    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    /// Entries in catalog order.
    pub fn channels(&self) -> &[ChannelEntry] {
        &self.channels
    }

    pub fn channel(&self, slug: &str) -> Option<&ChannelEntry> {
        self.by_slug.get(slug).map(|&idx| &self.channels[idx])
    }

    /// Resolve the primary channel using the tag index.
    pub fn resolve<S: AsRef<str>>(&self, tag_slugs: &[S]) -> &str {
        let fallback = fallback_slug(&self.channels);
        if tag_slugs.is_empty() {
            return fallback;
        }
        let tags = canonical_tag_set(tag_slugs);
        let candidates = tags
            .iter()
            .filter_map(|tag| self.by_tag.get(tag))
            .flatten()
            .map(|&(kind, idx)| Candidate::new(kind, &self.channels[idx]));
        pick_winner(candidates, fallback, &tags)
    }

    pub fn label_for_tags<S: AsRef<str>>(&self, tag_slugs: &[S]) -> String {
        format_channel_label(self.resolve(tag_slugs))
    }

    pub fn is_postable(&self, slug: &str) -> bool {
        is_channel_postable(self.channel(slug))
    }
}

/// Allowed catalog schema versions: the default plus any listed in
/// `BLUEPRINT_ALLOWED_CATALOG_SCHEMAS`.
pub fn allowed_schema_versions() -> BTreeSet<String> {
    let mut versions: BTreeSet<String> = BTreeSet::new();
    versions.insert(DEFAULT_SCHEMA_VERSION.to_string());
    if let Ok(raw) = std::env::var(ENV_ALLOWED_SCHEMA_VERSIONS) {
        for v in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            versions.insert(v.to_string());
        }
    }
    versions
}

pub(crate) fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }
    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }
    Ok(())
}

fn validate_catalog_metadata(meta: &CatalogMetadata) -> Result<()> {
    let key = &meta.key.0;
    if key.is_empty() {
        bail!("catalog.key must not be empty");
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!("catalog.key must match ^[A-Za-z0-9_.-]+$, got {}", key);
    }
    if meta.title.trim().is_empty() {
        bail!("catalog.title must not be empty");
    }
    if meta.labels.iter().any(|label| label.trim().is_empty()) {
        bail!("catalog.labels must not contain empty entries");
    }
    Ok(())
}

fn build_slug_index(channels: &[ChannelEntry]) -> Result<BTreeMap<String, usize>> {
    if channels.is_empty() {
        bail!("catalog contains no channels");
    }

    let mut map = BTreeMap::new();
    for (idx, entry) in channels.iter().enumerate() {
        if !is_canonical_tag(&entry.slug) {
            bail!("channel slug '{}' is not a canonical tag", entry.slug);
        }
        if !is_canonical_tag(&entry.tag_slug) {
            bail!(
                "channel {} has non-canonical tagSlug '{}'",
                entry.slug,
                entry.tag_slug
            );
        }
        if let Some(alias) = entry.aliases.iter().find(|a| !is_canonical_tag(a)) {
            bail!("channel {} has non-canonical alias '{}'", entry.slug, alias);
        }
        if map.insert(entry.slug.clone(), idx).is_some() {
            bail!("duplicate channel slug {}", entry.slug);
        }
    }

    if !map.contains_key(FALLBACK_CHANNEL) {
        bail!("catalog must define the '{FALLBACK_CHANNEL}' channel");
    }
    Ok(map)
}

fn build_tag_index(channels: &[ChannelEntry]) -> BTreeMap<String, Vec<(MatchKind, usize)>> {
    let mut map: BTreeMap<String, Vec<(MatchKind, usize)>> = BTreeMap::new();
    for (idx, entry) in channels.iter().enumerate() {
        if entry.slug == FALLBACK_CHANNEL {
            continue;
        }
        map.entry(entry.tag_slug.clone())
            .or_default()
            .push((MatchKind::Exact, idx));
        for alias in entry.aliases.iter().filter(|a| **a != entry.tag_slug) {
            map.entry(alias.clone())
                .or_default()
                .push((MatchKind::Alias, idx));
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_is_valid() {
        let catalog = ChannelCatalog::bundled().expect("bundled catalog validates");
        assert!(catalog.channel(FALLBACK_CHANNEL).is_some());
        assert_eq!(catalog.key().0, "blueprint_channels_v1");
        assert!(!catalog.is_postable(FALLBACK_CHANNEL));
    }

    #[test]
    fn tag_index_skips_general() {
        let catalog = ChannelCatalog::bundled().unwrap();
        assert!(
            catalog
                .by_tag
                .values()
                .flatten()
                .all(|&(_, idx)| catalog.channels[idx].slug != FALLBACK_CHANNEL)
        );
    }
}
