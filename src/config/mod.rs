//! Configuration module for viewcache
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (VIEWCACHE_*)
//! 3. Explicit config file, then `./viewcache.toml`
//! 4. User config (~/.config/viewcache/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load, load_or_default, load_with_warnings, with_env_overrides, ConfigWarning,
    CONFIG_FILE_NAME,
};
pub use types::{ViewCacheConfig, DEFAULT_SUFFIX};
