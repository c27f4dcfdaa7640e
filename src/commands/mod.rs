//! Subcommand implementations

pub mod check;
pub mod render;
pub mod watch;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use viewcache::config::{load_or_default, ViewCacheConfig};
use viewcache::{DirectiveCompiler, LocalViewLoader, ViewCache};

use crate::cli::Cli;

/// Resolve configuration: config file, then environment, then CLI flags
pub fn resolve_config(cli: &Cli) -> Result<ViewCacheConfig> {
    let (mut config, warnings) =
        load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;

    for warning in &warnings {
        let location = match warning.line {
            Some(line) => format!("{}:{}", warning.file.display(), line),
            None => warning.file.display().to_string(),
        };
        match &warning.suggestion {
            Some(suggestion) => warn!(
                "{location}: unknown config key '{}' (did you mean '{suggestion}'?)",
                warning.key
            ),
            None => warn!("{location}: unknown config key '{}'", warning.key),
        }
    }

    if let Some(root) = &cli.root {
        config.root_directory = root.clone();
        config = config.anchored_at(&std::env::current_dir()?);
    }
    if let Some(suffix) = &cli.suffix {
        config.suffix = suffix.clone();
    }
    Ok(config)
}

/// Cache over the local filesystem with the built-in compiler
pub fn local_cache(config: &ViewCacheConfig) -> ViewCache {
    ViewCache::new(
        config,
        LocalViewLoader::with_root(&config.root_directory),
        DirectiveCompiler::new(),
    )
}

pub(crate) fn read_model_file(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read model file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Model file {} is not valid JSON", path.display()))
}
