//! viewcache - compiled view template cache kept coherent with the filesystem
//!
//! Views are addressed by logical path, compiled once on first access and
//! served from memory afterwards. A filesystem watcher recompiles resident
//! views when their files change; a view that fails to recompile keeps
//! serving its previous version.
//!
//! ```no_run
//! use viewcache::{ViewCacheConfig, ViewRuntime};
//!
//! let config = ViewCacheConfig::new("/srv/app");
//! let runtime = ViewRuntime::with_defaults(&config);
//! let view = runtime.cache().get("/views/home.tpl")?;
//! println!("{}", view.render(&serde_json::json!({"Name": "Ada"}))?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{CacheEvent, CacheStats, ViewCache, ViewRuntime, WatcherAdapter};
pub use config::ViewCacheConfig;
pub use domain::ports::{
    CompileError, CompiledTemplate, Invalidate, LoadError, RenderError, Template,
    TemplateCompiler, ViewLoader,
};
pub use domain::{CompiledView, Fingerprint, ModelType};
pub use error::{ViewCacheError, ViewCacheResult};
pub use infrastructure::{DirectiveCompiler, LocalViewLoader};
