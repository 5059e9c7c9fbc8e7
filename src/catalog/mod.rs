//! Channel catalog wiring.
//!
//! Wraps the channel catalog on disk (for example `catalogs/channels_v1.json`)
//! so callers can load a validated snapshot. `model` mirrors the file format;
//! `ChannelCatalog` adds validation and a tag index for resolution.

pub mod index;
pub mod model;
pub mod schema;

pub use index::{ChannelCatalog, DEFAULT_SCHEMA_VERSION, allowed_schema_versions};
pub use model::{
    CatalogKey, CatalogMetadata, ChannelCatalogFile, ChannelEntry, ChannelStatus,
    load_catalog_from_path, parse_catalog,
};
pub use schema::CatalogSchema;

/// Default relative path to the bundled channel catalog.
pub const DEFAULT_CATALOG_PATH: &str = "catalogs/channels_v1.json";

/// Default relative path to the catalog JSON Schema.
pub const DEFAULT_CATALOG_SCHEMA_PATH: &str = "schema/channel_catalog.schema.json";
