//! Cache events and counters

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Cache event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CacheEvent {
    /// A view was compiled on first access
    ViewCompiled {
        key: String,
        model_type: String,
        generation: u64,
    },
    /// A resident view was recompiled after a change notification
    ViewRefreshed {
        key: String,
        model_type: String,
        generation: u64,
        fingerprint: String,
    },
    /// Recompiling a resident view failed; the previous view is still served
    RefreshFailed { key: String, message: String },
    /// A change notification named a key that is not cached
    InvalidationIgnored { key: String },
    /// Live invalidation is active
    WatchStarted { root: String, suffix: String },
    /// Live invalidation could not be set up
    WatchUnavailable { root: String, message: String },
}

impl CacheEvent {
    /// Convert to a JSON line with a "source": "viewcache" field included
    pub fn to_json(&self) -> String {
        let mut value = serde_json::to_value(self)
            .unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("source".to_string(), serde_json::json!("viewcache"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Cache key the event concerns, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            CacheEvent::ViewCompiled { key, .. }
            | CacheEvent::ViewRefreshed { key, .. }
            | CacheEvent::RefreshFailed { key, .. }
            | CacheEvent::InvalidationIgnored { key } => Some(key),
            CacheEvent::WatchStarted { .. } | CacheEvent::WatchUnavailable { .. } => None,
        }
    }
}

/// Point-in-time snapshot of cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// `get` calls served from a resident entry
    pub hits: u64,
    /// `get` calls that ran the load-and-compile sequence
    pub misses: u64,
    /// `get` calls that waited on another caller's compile and reused it
    pub coalesced: u64,
    /// Successful refreshes of resident entries
    pub refreshes: u64,
    /// Failed refreshes (previous entry kept)
    pub refresh_failures: u64,
    /// Invalidations for keys that were not resident
    pub ignored_invalidations: u64,
    /// Load failures on either path
    pub load_failures: u64,
    /// Compile failures on either path
    pub compile_failures: u64,
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub(crate) hits: AtomicU64,
    pub(crate) misses: AtomicU64,
    pub(crate) coalesced: AtomicU64,
    pub(crate) refreshes: AtomicU64,
    pub(crate) refresh_failures: AtomicU64,
    pub(crate) ignored_invalidations: AtomicU64,
    pub(crate) load_failures: AtomicU64,
    pub(crate) compile_failures: AtomicU64,
}

impl Counters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
            refreshes: self.refreshes.load(Ordering::Relaxed),
            refresh_failures: self.refresh_failures.load(Ordering::Relaxed),
            ignored_invalidations: self.ignored_invalidations.load(Ordering::Relaxed),
            load_failures: self.load_failures.load(Ordering::Relaxed),
            compile_failures: self.compile_failures.load(Ordering::Relaxed),
        }
    }
}
