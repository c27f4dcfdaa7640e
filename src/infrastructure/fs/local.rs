//! Local View Loader
//!
//! Implements the ViewLoader port for views on local disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::path::{normalize_root, SEPARATOR};
use crate::domain::ports::{LoadError, LoadResult, ViewLoader};

/// Reads views with `std::fs`
///
/// Cache keys are lower-cased, so on a case-sensitive filesystem the key may
/// not name the file directly. When a root is configured, a not-found read
/// falls back to matching each path component below the root without regard
/// to case.
#[derive(Debug, Clone, Default)]
pub struct LocalViewLoader {
    root: Option<PathBuf>,
}

impl LocalViewLoader {
    /// Loader that reads keys verbatim
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader with case-insensitive lookup below `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Locate `key` below the root, ignoring case in every component
    ///
    /// A name spelled exactly like the component wins. Otherwise the
    /// component must match a single entry; several candidates that differ
    /// only in case are reported as a read error.
    fn find_case_insensitive(&self, key: &str) -> LoadResult<Option<PathBuf>> {
        let Some(root) = self.root.as_ref() else {
            return Ok(None);
        };
        let Some(relative) = key.strip_prefix(&normalize_root(root)) else {
            return Ok(None);
        };

        let mut current = root.clone();
        for component in relative.split(SEPARATOR).filter(|c| !c.is_empty()) {
            let Ok(entries) = fs::read_dir(&current) else {
                return Ok(None);
            };
            let mut candidates: Vec<_> = entries
                .filter_map(Result::ok)
                .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
                .filter(|(name, _)| name.to_lowercase() == component)
                .collect();

            current = match candidates.iter().position(|(name, _)| name == component) {
                Some(exact) => candidates.swap_remove(exact).1,
                None if candidates.len() == 1 => candidates.remove(0).1,
                None if candidates.is_empty() => return Ok(None),
                None => {
                    candidates.sort();
                    let names: Vec<_> = candidates.into_iter().map(|(name, _)| name).collect();
                    return Err(LoadError::Read {
                        path: current.join(component),
                        source: std::io::Error::other(format!(
                            "ambiguous case-insensitive match: {}",
                            names.join(", ")
                        )),
                    });
                }
            };
        }

        Ok(current.is_file().then_some(current))
    }
}

impl ViewLoader for LocalViewLoader {
    fn load(&self, path: &str) -> LoadResult<String> {
        let direct = Path::new(path);
        match fs::read_to_string(direct) {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let Some(actual) = self.find_case_insensitive(path)? else {
                    return Err(LoadError::NotFound {
                        path: direct.to_path_buf(),
                    });
                };
                debug!(key = %path, actual = %actual.display(), "Resolved view case-insensitively");
                fs::read_to_string(&actual).map_err(|source| read_error(&actual, source))
            }
            Err(err) => Err(read_error(direct, err)),
        }
    }
}

fn read_error(path: &Path, source: std::io::Error) -> LoadError {
    if source.kind() == ErrorKind::NotFound {
        LoadError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        LoadError::Read {
            path: path.to_path_buf(),
            source,
        }
    }
}
