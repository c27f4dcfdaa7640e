//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::path::normalize_suffix;

/// Suffix watched when none is configured
pub const DEFAULT_SUFFIX: &str = ".tpl";

/// View cache options, supplied once at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCacheConfig {
    /// Application root that logical view paths are resolved against
    #[serde(default = "default_root_directory")]
    pub root_directory: PathBuf,

    /// View file extension used to filter change events
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Whether to watch the root for changes
    #[serde(default = "default_watch")]
    pub watch: bool,
}

fn default_root_directory() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

fn default_watch() -> bool {
    true
}

impl Default for ViewCacheConfig {
    fn default() -> Self {
        Self {
            root_directory: default_root_directory(),
            suffix: default_suffix(),
            watch: default_watch(),
        }
    }
}

impl ViewCacheConfig {
    /// Config rooted at `root_directory` with default suffix and watching on
    pub fn new(root_directory: impl Into<PathBuf>) -> Self {
        Self {
            root_directory: root_directory.into(),
            suffix: default_suffix(),
            watch: default_watch(),
        }
    }

    /// Set the suffix filter
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Enable or disable live invalidation
    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }

    /// Suffix in canonical `.ext` form
    pub fn normalized_suffix(&self) -> String {
        normalize_suffix(&self.suffix)
    }

    /// Make a relative root absolute against `base`
    pub fn anchored_at(mut self, base: &Path) -> Self {
        if self.root_directory.is_relative() {
            self.root_directory = base.join(&self.root_directory);
        }
        self
    }
}
