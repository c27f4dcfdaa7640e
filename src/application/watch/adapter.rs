//! Watcher adapter implementation

use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use crate::domain::ports::Invalidate;
use crate::error::{ViewCacheError, ViewCacheResult};

use super::router::EventRouter;

const WORKER_NAME: &str = "viewcache-watch";

/// Recursive filesystem subscription feeding an `Invalidate` target
///
/// notify's callback only forwards events over a channel; routing and the
/// recompiles it triggers run on a dedicated worker thread. Dropping the
/// adapter unsubscribes and joins the worker.
pub struct WatcherAdapter {
    root: PathBuf,
    watcher: Option<RecommendedWatcher>,
    worker: Option<JoinHandle<()>>,
}

impl WatcherAdapter {
    /// Subscribe to `root` and forward changed `suffix` files to `target`
    pub fn start(
        root: &Path,
        suffix: &str,
        target: Arc<dyn Invalidate>,
    ) -> ViewCacheResult<Self> {
        let router = EventRouter::new(root, suffix, target);
        let (tx, rx) = channel::<Event>();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    let _ = tx.send(event);
                }
                Err(err) => warn!(error = %err, "File watcher error"),
            },
            Config::default(),
        )
        .map_err(|e| setup_error(root, e))?;

        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(|e| setup_error(root, e))?;

        let worker = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || {
                for event in rx {
                    let routed = router.route_event(&event);
                    if routed == 0 {
                        debug!(kind = ?event.kind, "Ignoring file event");
                    }
                }
                debug!("Watch worker exiting");
            })?;

        info!(root = %root.display(), suffix = %suffix, "Watching views");
        Ok(Self {
            root: root.to_path_buf(),
            watcher: Some(watcher),
            worker: Some(worker),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Unsubscribe and wait for in-flight invalidations to finish
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the watcher drops the sender, which ends the worker loop
        drop(self.watcher.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Watch worker panicked");
            }
        }
    }
}

impl Drop for WatcherAdapter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for WatcherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherAdapter")
            .field("root", &self.root)
            .field("running", &self.worker.is_some())
            .finish()
    }
}

fn setup_error(root: &Path, err: notify::Error) -> ViewCacheError {
    ViewCacheError::WatchSetup {
        root: root.to_path_buf(),
        message: err.to_string(),
    }
}
