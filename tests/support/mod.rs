#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use blueprint_channels::{ChannelEntry, ChannelStatus};
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn entry(slug: &str, tag_slug: &str, aliases: &[&str], priority: i64) -> ChannelEntry {
    ChannelEntry {
        slug: slug.to_string(),
        tag_slug: tag_slug.to_string(),
        aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
        priority,
        status: ChannelStatus::Active,
        is_join_enabled: true,
        display_name: None,
        description: None,
    }
}

// Small test-owned catalog shaped like the bundled one.
pub fn fixture_catalog() -> Vec<ChannelEntry> {
    vec![
        entry("general", "general", &[], 1000),
        entry(
            "nutrition-meal-planning",
            "nutrition-meal-planning",
            &["shake", "meal-prep"],
            10,
        ),
        entry("sleep-recovery", "sleep-recovery", &["rest", "sleep"], 20),
    ]
}

pub fn write_json(value: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    serde_json::to_writer(&mut file, value)?;
    file.flush()?;
    Ok(file)
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to spawn {:?}", cmd.get_program()))?;
    if !output.status.success() {
        bail!(
            "command {:?} failed with {:?}\nstdout: {}\nstderr: {}",
            cmd.get_program(),
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}

pub fn run_with_stdin(mut cmd: Command, input: &str) -> Result<Output> {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd
        .spawn()
        .with_context(|| format!("failed to spawn {:?}", cmd.get_program()))?;
    child
        .stdin
        .take()
        .context("child stdin unavailable")?
        .write_all(input.as_bytes())?;
    Ok(child.wait_with_output()?)
}
