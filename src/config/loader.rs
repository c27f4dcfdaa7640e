//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ViewCacheError, ViewCacheResult};

use super::types::ViewCacheConfig;

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "viewcache.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
///
/// A relative `root_directory` is resolved against the config file's
/// directory.
pub fn load_with_warnings(path: &Path) -> ViewCacheResult<(ViewCacheConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: ViewCacheConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ViewCacheError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config.anchored_at(&config_dir(path)), warnings))
}

/// Absolute directory containing `path`
fn config_dir(path: &Path) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => cwd.join(parent),
        _ => cwd,
    }
}

/// Load configuration, discarding warnings
pub fn load(path: &Path) -> ViewCacheResult<ViewCacheConfig> {
    load_with_warnings(path).map(|(config, _)| config)
}

/// Load from an explicit file, `./viewcache.toml`, the user config, or defaults.
///
/// An explicit file that fails to load is an error; discovered files are
/// only used when present. Environment overrides are applied last.
pub fn load_or_default(
    explicit: Option<&Path>,
) -> ViewCacheResult<(ViewCacheConfig, Vec<ConfigWarning>)> {
    if let Some(path) = explicit {
        let (config, warnings) = load_with_warnings(path)?;
        return Ok((with_env_overrides(config), warnings));
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    let user = dirs::config_dir().map(|dir| dir.join("viewcache").join("config.toml"));

    for candidate in std::iter::once(local).chain(user) {
        if candidate.is_file() {
            debug!(path = %candidate.display(), "Loading config");
            let (config, warnings) = load_with_warnings(&candidate)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }

    Ok((with_env_overrides(ViewCacheConfig::default()), Vec::new()))
}

/// Apply environment variable overrides (VIEWCACHE_* prefix)
pub fn with_env_overrides(mut config: ViewCacheConfig) -> ViewCacheConfig {
    // VIEWCACHE_ROOT
    if let Ok(root) = std::env::var("VIEWCACHE_ROOT") {
        if !root.trim().is_empty() {
            config.root_directory = PathBuf::from(root);
            if let Ok(cwd) = std::env::current_dir() {
                config = config.anchored_at(&cwd);
            }
        }
    }

    // VIEWCACHE_SUFFIX
    if let Ok(suffix) = std::env::var("VIEWCACHE_SUFFIX") {
        if !suffix.trim().is_empty() {
            config.suffix = suffix;
        }
    }

    // VIEWCACHE_WATCH
    if let Ok(val) = std::env::var("VIEWCACHE_WATCH") {
        config.watch = parse_flag(&val);
    }

    config
}

fn parse_flag(val: &str) -> bool {
    !matches!(
        val.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &["root_directory", "suffix", "watch"];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 3 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
