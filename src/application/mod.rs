//! Application Layer
//!
//! Orchestrates the domain ports:
//!
//! - `ViewCache` - memoizing, single-flight cache of compiled views
//! - `WatcherAdapter` / `EventRouter` - filesystem changes to invalidations
//! - `ViewRuntime` - a cache with live invalidation wired per configuration

pub mod cache;
pub mod runtime;
pub mod watch;

pub use cache::{CacheEvent, CacheObserver, CacheStats, ViewCache};
pub use runtime::ViewRuntime;
pub use watch::{is_change, EventRouter, WatcherAdapter};
