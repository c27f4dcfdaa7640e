//! Change event routing

use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::event::ModifyKind;
use notify::{Event, EventKind};
use tracing::debug;

use crate::domain::path::{matches_suffix, normalize_event_path, normalize_suffix};
use crate::domain::ports::Invalidate;

/// Whether a notify event kind reports new or changed content
///
/// Metadata-only modifications (permissions, timestamps) and removals are
/// not changes: a removed view keeps being served until it is replaced.
pub fn is_change(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    }
}

/// Filters change events by suffix and forwards normalized keys
pub struct EventRouter {
    root: PathBuf,
    canonical_root: Option<PathBuf>,
    suffix: String,
    target: Arc<dyn Invalidate>,
}

impl EventRouter {
    pub fn new(root: impl Into<PathBuf>, suffix: &str, target: Arc<dyn Invalidate>) -> Self {
        let root = root.into();
        // notify reports resolved paths; remember where the root really
        // lives so keys built from the configured root still correlate
        let canonical_root = root.canonicalize().ok().filter(|c| c != &root);
        Self {
            root,
            canonical_root,
            suffix: normalize_suffix(suffix),
            target,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Cache key for `path`, or `None` when the suffix does not match
    pub fn normalize(&self, path: &Path) -> Option<String> {
        if !matches_suffix(path, &self.suffix) {
            return None;
        }
        Some(normalize_event_path(&self.rebase(path)))
    }

    /// Invalidate the key for `path` if it is a view file
    pub fn route(&self, path: &Path) -> bool {
        match self.normalize(path) {
            Some(key) => {
                debug!(key = %key, "Routing change notification");
                self.target.invalidate(&key);
                true
            }
            None => false,
        }
    }

    /// Route every path of a change event, returning how many were forwarded
    pub fn route_event(&self, event: &Event) -> usize {
        if !is_change(&event.kind) {
            return 0;
        }
        event.paths.iter().filter(|path| self.route(path)).count()
    }

    fn rebase(&self, path: &Path) -> PathBuf {
        self.canonical_root
            .as_deref()
            .and_then(|canonical| path.strip_prefix(canonical).ok())
            .map(|relative| self.root.join(relative))
            .unwrap_or_else(|| path.to_path_buf())
    }
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRouter")
            .field("root", &self.root)
            .field("canonical_root", &self.canonical_root)
            .field("suffix", &self.suffix)
            .finish_non_exhaustive()
    }
}
