//! Error types for viewcache
//!
//! Uses `thiserror` for library errors. Collaborator errors (`LoadError`,
//! `CompileError`) live next to their ports and are wrapped here with the
//! cache key they failed for.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{CompileError, LoadError};

/// Result type alias for viewcache operations
pub type ViewCacheResult<T> = Result<T, ViewCacheError>;

/// Main error type for viewcache operations
#[derive(Error, Debug)]
pub enum ViewCacheError {
    /// The view source could not be loaded (missing, unreadable, or empty)
    #[error("failed to load view '{key}': {source}")]
    Load {
        key: String,
        #[source]
        source: LoadError,
    },

    /// The template compiler rejected the view source
    #[error("failed to compile view '{key}': {source}")]
    Compile {
        key: String,
        #[source]
        source: CompileError,
    },

    /// The filesystem watcher could not be set up (non-fatal)
    #[error("failed to watch '{root}': {message}")]
    WatchSetup { root: PathBuf, message: String },

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ViewCacheError {
    /// The cache key this error refers to, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            ViewCacheError::Load { key, .. } | ViewCacheError::Compile { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Whether the error came from the loader reporting a missing file
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ViewCacheError::Load {
                source: LoadError::NotFound { .. },
                ..
            }
        )
    }
}
