//! ViewLoader port - abstraction over reading view sources
//!
//! The cache hands the loader a normalized path and gets back the source
//! text. Not-found and read failures are kept apart so callers can tell a
//! missing view from a broken disk.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for loader operations
pub type LoadResult<T> = Result<T, LoadError>;

/// View loading errors
#[derive(Error, Debug)]
pub enum LoadError {
    /// No file exists at the path
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but has no content
    #[error("view is empty: {}", .path.display())]
    Empty { path: PathBuf },
}

impl LoadError {
    /// Path the error refers to
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::NotFound { path } | LoadError::Read { path, .. } | LoadError::Empty { path } => {
                path
            }
        }
    }
}

/// Loads raw view source for a normalized path
pub trait ViewLoader: Send + Sync {
    /// Return the exact text contents of the view at `path`
    fn load(&self, path: &str) -> LoadResult<String>;
}

impl<F> ViewLoader for F
where
    F: Fn(&str) -> LoadResult<String> + Send + Sync,
{
    fn load(&self, path: &str) -> LoadResult<String> {
        self(path)
    }
}
