//! View Cache
//!
//! The central component: a map from normalized view path to compiled view,
//! filled on first access and refreshed in place on change notification.
//!
//! ## Architecture
//!
//! - `ViewCache` - Get-or-compile plus the `Invalidate` entry point
//! - `SingleFlight` - Per-key gates serializing load-and-compile
//! - `CacheEvent` / `CacheStats` - Observability for hosts and the CLI
//!
//! ## Usage
//!
//! ```ignore
//! let cache = ViewCache::new(&config, LocalViewLoader::with_root(root), DirectiveCompiler::new());
//! let view = cache.get("/views/hello.tpl")?;
//! let html = view.render(&model)?;
//! ```

mod event;
mod flight;
mod store;


pub use event::{CacheEvent, CacheStats};
pub use store::{CacheObserver, ViewCache};
