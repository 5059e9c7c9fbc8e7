//! Prints the canonical tag set for free-text labels as a JSON array.

use anyhow::{Context, Result};
use blueprint_channels::runtime::init_logging;
use blueprint_channels::{normalize_tags, parse_tag_stream, split_list};
use clap::Parser;
use std::io::{Read, stdin};

#[derive(Parser, Debug)]
#[command(name = "normalize-tags")]
#[command(about = "Canonicalize, dedupe and bound a list of tags")]
struct Cli {
    /// Comma separated tags; reads stdin (JSON array or one per line) when omitted.
    #[arg(long)]
    tags: Option<String>,
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
    println!("{}", serde_json::to_string(&normalize_tags(&raw))?);
    Ok(())
}
