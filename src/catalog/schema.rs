//! JSON Schema check for catalog files.
//!
//! Structure comes from the schema file; `schema_version` is checked against
//! the same allowed set as load time. Other semantic rules (unique slugs, the
//! `general` entry) live in [`ChannelCatalog::from_file`](super::ChannelCatalog::from_file).

use anyhow::{Context, Result, anyhow, bail};
use crate::catalog::index::validate_schema_version;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

const BUNDLED_SCHEMA: &str = include_str!("../../schema/channel_catalog.schema.json");

pub struct CatalogSchema {
    compiled: JSONSchema,
}

impl CatalogSchema {
    pub fn load(path: &Path) -> Result<Self> {
        let raw: Value = serde_json::from_reader(
            File::open(path).with_context(|| format!("opening catalog schema {}", path.display()))?,
        )
        .with_context(|| format!("parsing catalog schema {}", path.display()))?;
        Self::compile(&raw).with_context(|| format!("compiling catalog schema {}", path.display()))
    }

    pub fn bundled() -> Result<Self> {
        let raw: Value =
            serde_json::from_str(BUNDLED_SCHEMA).context("parsing bundled catalog schema")?;
        Self::compile(&raw).context("compiling bundled catalog schema")
    }

    fn compile(raw: &Value) -> Result<Self> {
        let compiled = JSONSchema::compile(raw).map_err(|err| anyhow!("{err}"))?;
        Ok(Self { compiled })
    }

    /// Validate `input`, reporting every schema violation at once.
    pub fn validate(&self, input: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(input) {
            let details = errors
                .map(|err| format!("{}: {}", err.instance_path, err))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("catalog failed schema validation:\n{}", details);
        }
        let version = input
            .get("schema_version")
            .and_then(Value::as_str)
            .unwrap_or_default();
        validate_schema_version(version)
    }
}
