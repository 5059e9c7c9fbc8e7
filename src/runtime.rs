//! Process-level wiring shared by the binaries: repository discovery, catalog
//! path resolution and logging setup.

use crate::catalog::{ChannelCatalog, DEFAULT_CATALOG_PATH};
use anyhow::Result;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const ROOT_SENTINEL: &str = DEFAULT_CATALOG_PATH;
const MANIFEST: &str = "Cargo.toml";
const ENV_ROOT: &str = "BLUEPRINT_CHANNELS_ROOT";
const ENV_CATALOG_PATH: &str = "BLUEPRINT_CATALOG_PATH";
const ENV_LOG: &str = "BLUEPRINT_LOG";

/// Install a stderr `tracing` subscriber.
///
/// The filter comes from `BLUEPRINT_LOG`, then `RUST_LOG`, then `warn`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(ENV_LOG)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(ROOT_SENTINEL).is_file() && candidate.join(MANIFEST).is_file()
}

fn repo_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_repo_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the repository checkout, if any.
///
/// Tries `BLUEPRINT_CHANNELS_ROOT`, then the directories above the current
/// executable, then the build-time `BLUEPRINT_CHANNELS_ROOT_HINT`.
pub fn find_repo_root() -> Option<PathBuf> {
    if let Ok(env_root) = env::var(ENV_ROOT) {
        if let Some(root) = repo_root_from_hint(&env_root) {
            return Some(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Some(root);
            }
        }
    }

    option_env!("BLUEPRINT_CHANNELS_ROOT_HINT").and_then(repo_root_from_hint)
}

/// Where the catalog should come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Bundled,
}

/// Pick the catalog source from an explicit override, the
/// `BLUEPRINT_CATALOG_PATH` env var, the repository checkout, or the bundled
/// copy, in that order.
pub fn resolve_catalog_source(cli_override: Option<&Path>) -> CatalogSource {
    let env_path = env_non_empty(ENV_CATALOG_PATH);
    catalog_source_from(cli_override, env_path.as_deref(), find_repo_root().as_deref())
}

fn catalog_source_from(
    cli_override: Option<&Path>,
    env_path: Option<&str>,
    repo_root: Option<&Path>,
) -> CatalogSource {
    if let Some(path) = cli_override {
        return CatalogSource::File(path.to_path_buf());
    }
    if let Some(path) = env_path {
        return CatalogSource::File(PathBuf::from(path));
    }
    if let Some(root) = repo_root {
        return CatalogSource::File(root.join(DEFAULT_CATALOG_PATH));
    }
    CatalogSource::Bundled
}

/// Resolve the catalog source and load it.
pub fn load_catalog(cli_override: Option<&Path>) -> Result<ChannelCatalog> {
    match resolve_catalog_source(cli_override) {
        CatalogSource::File(path) => ChannelCatalog::load(&path),
        CatalogSource::Bundled => {
            debug!("no catalog path configured; using bundled catalog");
            ChannelCatalog::bundled()
        }
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
