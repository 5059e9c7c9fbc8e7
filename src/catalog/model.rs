//! Serde model for channel catalog files.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;

/// Parsed catalog document as stored under `catalogs/`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChannelCatalogFile {
    pub schema_version: String,
    pub catalog: CatalogMetadata,
    pub channels: Vec<ChannelEntry>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CatalogMetadata {
    pub key: CatalogKey,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One channel definition.
///
/// `tag_slug` is the exact-match tag; `aliases` match with lower precedence.
/// Lower `priority` wins among equal match kinds.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelEntry {
    pub slug: String,
    pub tag_slug: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub priority: i64,
    pub status: ChannelStatus,
    #[serde(default)]
    pub is_join_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ChannelEntry {
    pub fn has_alias(&self, tag: &str) -> bool {
        self.aliases.iter().any(|alias| alias == tag)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChannelStatus {
    Active,
    ComingSoon,
    Archived,
    Other(String),
}

impl ChannelStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ChannelStatus::Active => "active",
            ChannelStatus::ComingSoon => "coming_soon",
            ChannelStatus::Archived => "archived",
            ChannelStatus::Other(value) => value.as_str(),
        }
    }
}

impl From<&str> for ChannelStatus {
    fn from(value: &str) -> Self {
        match value {
            "active" => ChannelStatus::Active,
            "coming_soon" => ChannelStatus::ComingSoon,
            "archived" => ChannelStatus::Archived,
            other => ChannelStatus::Other(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for ChannelStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(ChannelStatus::from(raw.as_str()))
    }
}

impl Serialize for ChannelStatus {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Read and parse a catalog file without semantic validation.
pub fn load_catalog_from_path(path: &Path) -> Result<ChannelCatalogFile> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading channel catalog {}", path.display()))?;
    parse_catalog(&data).with_context(|| format!("parsing channel catalog {}", path.display()))
}

pub fn parse_catalog(data: &str) -> Result<ChannelCatalogFile> {
    let catalog: ChannelCatalogFile = serde_json::from_str(data)?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entry_uses_camel_case_fields_and_defaults() {
        let entry: ChannelEntry = serde_json::from_value(json!({
            "slug": "sleep-recovery",
            "tagSlug": "sleep-recovery",
            "priority": 20,
            "status": "active"
        }))
        .expect("entry parses");
        assert_eq!(entry.tag_slug, "sleep-recovery");
        assert!(entry.aliases.is_empty());
        assert!(!entry.is_join_enabled);
        assert_eq!(entry.status, ChannelStatus::Active);
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status: ChannelStatus = serde_json::from_value(json!("paused")).unwrap();
        assert_eq!(status, ChannelStatus::Other("paused".to_string()));
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("paused"));
    }
}
