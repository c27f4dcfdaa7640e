//! The view cache

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use crate::config::ViewCacheConfig;
use crate::domain::path::{normalize_root, resolve_path};
use crate::domain::ports::{Invalidate, LoadError, TemplateCompiler, ViewLoader};
use crate::domain::CompiledView;
use crate::error::{ViewCacheError, ViewCacheResult};

use super::event::{CacheEvent, CacheStats, Counters};
use super::flight::SingleFlight;

/// Callback receiving cache events
pub type CacheObserver = Arc<dyn Fn(&CacheEvent) + Send + Sync>;

/// Thread-safe, lazily populated cache of compiled views
///
/// Warm lookups take only a read lock. Loading and compiling run under a
/// per-key gate so a key is compiled by at most one caller at a time; the
/// map itself is write-locked only to publish a finished view.
pub struct ViewCache {
    root: String,
    loader: Arc<dyn ViewLoader>,
    compiler: Arc<dyn TemplateCompiler>,
    entries: RwLock<HashMap<String, Arc<CompiledView>>>,
    flights: SingleFlight,
    generation: AtomicU64,
    counters: Counters,
    observer: RwLock<Option<CacheObserver>>,
}

impl ViewCache {
    /// Create an empty cache rooted at `config.root_directory`
    pub fn new(
        config: &ViewCacheConfig,
        loader: impl ViewLoader + 'static,
        compiler: impl TemplateCompiler + 'static,
    ) -> Self {
        Self::with_shared(config, Arc::new(loader), Arc::new(compiler))
    }

    /// Create an empty cache from already shared collaborators
    pub fn with_shared(
        config: &ViewCacheConfig,
        loader: Arc<dyn ViewLoader>,
        compiler: Arc<dyn TemplateCompiler>,
    ) -> Self {
        Self {
            root: normalize_root(&config.root_directory),
            loader,
            compiler,
            entries: RwLock::new(HashMap::new()),
            flights: SingleFlight::new(),
            generation: AtomicU64::new(0),
            counters: Counters::default(),
            observer: RwLock::new(None),
        }
    }

    /// Normalized root prefix every key starts with
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Normalize a logical view path into its cache key
    pub fn resolve_path(&self, view_path: &str) -> String {
        resolve_path(&self.root, view_path)
    }

    /// Get the compiled view for `view_path`, loading and compiling it on
    /// first access.
    ///
    /// Concurrent first accesses of one key compile once: later callers
    /// wait for the first and return its view. Failures are returned to the
    /// caller and never cached, so the next call retries.
    pub fn get(&self, view_path: &str) -> ViewCacheResult<Arc<CompiledView>> {
        let key = self.resolve_path(view_path);

        if let Some(view) = self.lookup(&key) {
            Counters::bump(&self.counters.hits);
            debug!(key = %key, "View cache hit");
            return Ok(view);
        }

        let (view, compiled) = self.flights.run(&key, || {
            if let Some(view) = self.lookup(&key) {
                Counters::bump(&self.counters.coalesced);
                debug!(key = %key, "View compiled by concurrent caller");
                return Ok((view, false));
            }

            Counters::bump(&self.counters.misses);
            debug!(key = %key, "View cache miss");
            self.load_and_compile(&key).map(|view| (view, true))
        })?;

        // Observers run after the gate is released so they may call back
        // into the cache for the same key.
        if compiled {
            info!(
                key = %key,
                model_type = %view.model_type(),
                generation = view.generation(),
                "View compiled"
            );
            self.emit(CacheEvent::ViewCompiled {
                key: key.clone(),
                model_type: view.model_type().to_string(),
                generation: view.generation(),
            });
        }
        Ok(view)
    }

    /// Resident view for `view_path`, without loading
    pub fn peek(&self, view_path: &str) -> Option<Arc<CompiledView>> {
        self.lookup(&self.resolve_path(view_path))
    }

    /// Recompile a resident key.
    ///
    /// Returns `Ok(None)` without touching the loader when `key` is not
    /// cached. Residency is checked under the key's gate, so a refresh that
    /// races the key's first load waits for it and then recompiles. On
    /// failure the previous view stays in place.
    pub fn refresh(&self, key: &str) -> ViewCacheResult<Option<Arc<CompiledView>>> {
        let refreshed = self.flights.run(key, || {
            if !self.contains(key) {
                return Ok(None);
            }
            self.load_and_compile(key).map(Some)
        })?;

        let Some(view) = refreshed else {
            return Ok(None);
        };

        Counters::bump(&self.counters.refreshes);
        info!(
            key = %key,
            generation = view.generation(),
            fingerprint = %view.fingerprint().short(),
            "View refreshed"
        );
        self.emit(CacheEvent::ViewRefreshed {
            key: key.to_string(),
            model_type: view.model_type().to_string(),
            generation: view.generation(),
            fingerprint: view.fingerprint().to_string(),
        });
        Ok(Some(view))
    }

    /// Whether `key` (already normalized) is resident
    pub fn contains(&self, key: &str) -> bool {
        self.read_entries().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    /// Resident keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.read_entries().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }

    /// Register the callback that receives cache events, replacing any
    /// previous one
    pub fn set_observer(&self, observer: impl Fn(&CacheEvent) + Send + Sync + 'static) {
        *self.observer.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(observer));
    }

    pub(crate) fn emit(&self, event: CacheEvent) {
        let observer = self
            .observer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(observer) = observer {
            observer(&event);
        }
    }

    fn lookup(&self, key: &str) -> Option<Arc<CompiledView>> {
        self.read_entries().get(key).cloned()
    }

    /// Load, compile and publish `key`. Callers hold the key's gate.
    fn load_and_compile(&self, key: &str) -> ViewCacheResult<Arc<CompiledView>> {
        let source = match self.loader.load(key) {
            Ok(source) if source.is_empty() => Err(LoadError::Empty { path: key.into() }),
            other => other,
        }
        .map_err(|source| {
            Counters::bump(&self.counters.load_failures);
            ViewCacheError::Load {
                key: key.to_string(),
                source,
            }
        })?;

        let compiled = self.compiler.compile(&source).map_err(|source| {
            Counters::bump(&self.counters.compile_failures);
            ViewCacheError::Compile {
                key: key.to_string(),
                source,
            }
        })?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let view = Arc::new(CompiledView::new(key, source, compiled, generation));
        self.write_entries().insert(key.to_string(), Arc::clone(&view));
        Ok(view)
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<CompiledView>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<CompiledView>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub(crate) fn gates_in_flight(&self) -> usize {
        self.flights.in_flight()
    }
}

impl Invalidate for ViewCache {
    /// Refresh a resident key, reporting failures instead of returning them
    fn invalidate(&self, key: &str) {
        match self.refresh(key) {
            Ok(Some(_)) => {}
            Ok(None) => {
                Counters::bump(&self.counters.ignored_invalidations);
                debug!(key = %key, "Ignoring invalidation for non-resident view");
                self.emit(CacheEvent::InvalidationIgnored {
                    key: key.to_string(),
                });
            }
            Err(err) => {
                Counters::bump(&self.counters.refresh_failures);
                warn!(key = %key, error = %err, "View refresh failed; keeping previous version");
                self.emit(CacheEvent::RefreshFailed {
                    key: key.to_string(),
                    message: err.to_string(),
                });
            }
        }
    }
}

impl fmt::Debug for ViewCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewCache")
            .field("root", &self.root)
            .field("entries", &self.len())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
