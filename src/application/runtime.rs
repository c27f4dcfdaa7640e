//! View runtime
//!
//! Wires a `ViewCache` to a `WatcherAdapter` according to the configuration.
//! A watcher that cannot be set up is reported once and the runtime carries
//! on serving views without live invalidation.

use std::sync::Arc;

use tracing::warn;

use crate::config::ViewCacheConfig;
use crate::domain::ports::{TemplateCompiler, ViewLoader};
use crate::error::ViewCacheError;
use crate::infrastructure::{DirectiveCompiler, LocalViewLoader};

use super::cache::{CacheEvent, ViewCache};
use super::watch::WatcherAdapter;

/// A view cache plus its optional live invalidation
#[derive(Debug)]
pub struct ViewRuntime {
    cache: Arc<ViewCache>,
    watcher: Option<WatcherAdapter>,
    watch_error: Option<ViewCacheError>,
}

impl ViewRuntime {
    /// Build a cache from `loader` and `compiler` and start watching
    pub fn start(
        config: &ViewCacheConfig,
        loader: impl ViewLoader + 'static,
        compiler: impl TemplateCompiler + 'static,
    ) -> Self {
        Self::from_cache(config, ViewCache::new(config, loader, compiler))
    }

    /// `start` with the filesystem loader and the directive compiler
    pub fn with_defaults(config: &ViewCacheConfig) -> Self {
        Self::start(
            config,
            LocalViewLoader::with_root(&config.root_directory),
            DirectiveCompiler::new(),
        )
    }

    /// Start watching for an already built cache.
    ///
    /// Use this to register an observer before the watch events are emitted.
    pub fn from_cache(config: &ViewCacheConfig, cache: ViewCache) -> Self {
        let cache = Arc::new(cache);
        let mut runtime = Self {
            cache: cache.clone(),
            watcher: None,
            watch_error: None,
        };

        if !config.watch {
            return runtime;
        }

        let root = config.root_directory.display().to_string();
        let suffix = config.normalized_suffix();
        match WatcherAdapter::start(&config.root_directory, &suffix, cache.clone()) {
            Ok(adapter) => {
                cache.emit(CacheEvent::WatchStarted { root, suffix });
                runtime.watcher = Some(adapter);
            }
            Err(err) => {
                warn!(
                    root = %root,
                    error = %err,
                    "Live view invalidation unavailable; views will not refresh on change"
                );
                cache.emit(CacheEvent::WatchUnavailable {
                    root,
                    message: err.to_string(),
                });
                runtime.watch_error = Some(err);
            }
        }
        runtime
    }

    pub fn cache(&self) -> &Arc<ViewCache> {
        &self.cache
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    /// Why watching could not be started, if it was requested and failed
    pub fn watch_error(&self) -> Option<&ViewCacheError> {
        self.watch_error.as_ref()
    }

    /// Stop live invalidation; the cache stays usable through other handles
    pub fn shutdown(mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.stop();
        }
    }
}
