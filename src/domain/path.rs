//! View path normalization
//!
//! Cache keys and watcher events are correlated through a single canonical
//! string form: forward slashes, rooted at the application root, lower-cased.
//! Everything in here is pure string manipulation; nothing touches the disk.

use std::path::Path;

/// Canonical separator used in every normalized path
pub const SEPARATOR: char = '/';

/// Normalize an application root into its canonical prefix form.
///
/// Backslashes become `/`, the result is lower-cased and ends with exactly
/// one `/`. An empty root normalizes to `/`.
pub fn normalize_root(root: &Path) -> String {
    let converted = root.to_string_lossy().replace('\\', "/").to_lowercase();
    let mut normalized = converted.trim_end_matches(SEPARATOR).to_string();
    normalized.push(SEPARATOR);
    normalized
}

/// Resolve a logical view path against a normalized root.
///
/// `root` must already be in [`normalize_root`] form. Accepts both separator
/// styles and an optional leading separator. A path that already carries the
/// root prefix is returned unchanged, which keeps the function idempotent.
///
/// ```
/// use viewcache::domain::path::resolve_path;
///
/// assert_eq!(resolve_path("/app/", "\\Views\\Hello.tpl"), "/app/views/hello.tpl");
/// assert_eq!(resolve_path("/app/", "/app/views/hello.tpl"), "/app/views/hello.tpl");
/// ```
pub fn resolve_path(root: &str, view_path: &str) -> String {
    let lowered = view_path.replace('\\', "/").to_lowercase();
    if lowered.starts_with(root) {
        return lowered;
    }

    let relative = lowered.strip_prefix(SEPARATOR).unwrap_or(&lowered);
    format!("{root}{relative}")
}

/// Normalize an absolute path delivered by the filesystem change source.
pub fn normalize_event_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}

/// Normalize a configured suffix filter: `tpl`, `.tpl` and `*.tpl` all
/// become `.tpl`. An empty filter stays empty and matches every file.
pub fn normalize_suffix(raw: &str) -> String {
    let trimmed = raw.trim().trim_start_matches('*').to_lowercase();
    if trimmed.is_empty() || trimmed.starts_with('.') {
        trimmed
    } else {
        format!(".{trimmed}")
    }
}

/// Case-insensitive suffix test. `suffix` must be in [`normalize_suffix`] form.
pub fn matches_suffix(path: &Path, suffix: &str) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(suffix)
}
