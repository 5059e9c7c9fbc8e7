//! Validate a channel catalog file.
//!
//! Runs the JSON Schema check first, then the semantic rules enforced at
//! load time (canonical slugs, unique slugs, the `general` channel).
//!
//! Usage:
//!   catalog-validate --file catalogs/channels_v1.json
//!   catalog-validate --schema schema/channel_catalog.schema.json < catalog.json

use anyhow::{Context, Result};
use blueprint_channels::catalog::{CatalogSchema, ChannelCatalog, DEFAULT_CATALOG_SCHEMA_PATH};
use blueprint_channels::runtime::{find_repo_root, init_logging};
use clap::Parser;
use serde_json::Value;
use std::fs::File;
use std::io::{Read, stdin};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "catalog-validate")]
#[command(about = "Validate a channel catalog against its schema and load-time rules")]
struct Cli {
    /// Catalog file; reads stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
    /// JSON Schema path; defaults to the repository copy, then the bundled one.
    #[arg(long)]
    schema: Option<PathBuf>,
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<Value> {
    let mut buf = String::new();
    if let Some(path) = file {
        File::open(path)
            .with_context(|| format!("opening input file {}", path.display()))?
            .read_to_string(&mut buf)
            .with_context(|| format!("reading input file {}", path.display()))?;
    } else {
        stdin()
            .read_to_string(&mut buf)
            .context("reading stdin for catalog JSON")?;
    }
    let value: Value = serde_json::from_str(&buf).context("parsing catalog JSON")?;
    Ok(value)
}

fn load_schema(cli_path: Option<PathBuf>) -> Result<CatalogSchema> {
    let path = cli_path.or_else(|| {
        find_repo_root()
            .map(|root| root.join(DEFAULT_CATALOG_SCHEMA_PATH))
            .filter(|path| path.is_file())
    });
    match path {
        Some(path) => CatalogSchema::load(&path),
        None => CatalogSchema::bundled(),
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let input = read_input(cli.file.as_ref())?;
    let schema = load_schema(cli.schema)?;
    schema.validate(&input)?;

    let file = serde_json::from_value(input).context("decoding catalog")?;
    let catalog = ChannelCatalog::from_file(file)?;
    info!(key = %catalog.key(), channels = catalog.channels().len(), "catalog valid");
    println!(
        "ok: {} \"{}\" ({} channels)",
        catalog.key(),
        catalog.metadata().title,
        catalog.channels().len()
    );
    Ok(())
}
