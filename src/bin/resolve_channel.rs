//! Resolves a tag list to its primary channel.
//!
//! Usage:
//!   resolve-channel --tags "Shake!, sleep recovery"
//!   resolve-channel --json --catalog catalogs/channels_v1.json < tags.json

use anyhow::{Context, Result};
use blueprint_channels::runtime::{init_logging, load_catalog};
use blueprint_channels::{normalize_tags, parse_tag_stream, split_list};
use clap::Parser;
use serde::Serialize;
use std::io::{Read, stdin};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "resolve-channel")]
#[command(about = "Resolve a tag list to its primary blueprint channel")]
struct Cli {
    /// Comma separated tags; reads stdin (JSON array or one per line) when omitted.
    #[arg(long)]
    tags: Option<String>,
    /// Channel catalog path (or set BLUEPRINT_CATALOG_PATH).
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Print a JSON object instead of the bare channel slug.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Resolution<'a> {
    tags: Vec<String>,
    channel: &'a str,
    label: String,
    postable: bool,
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let catalog = load_catalog(cli.catalog.as_deref())?;
    let raw = match cli.tags {
        Some(list) => split_list(&list),
        None => {
            let mut buf = String::new();
            stdin()
                .read_to_string(&mut buf)
                .context("reading tags from stdin")?;
            parse_tag_stream(&buf)?
        }
    };

    let tags = normalize_tags(&raw);
    let channel = catalog.resolve(&tags);
    if cli.json {
        let resolution = Resolution {
            label: catalog.label_for_tags(&tags),
            postable: catalog.is_postable(channel),
            channel,
            tags,
        };
        println!("{}", serde_json::to_string(&resolution)?);
    } else {
        println!("{channel}");
    }
    Ok(())
}
