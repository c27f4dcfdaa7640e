//! Live invalidation
//!
//! Subscribes to filesystem changes under the application root and turns
//! each create or modify of a view file into an `Invalidate` call on the
//! normalized path.
//!
//! ## Architecture
//!
//! - `EventRouter` - pure filter and normalize step, no watcher involved
//! - `WatcherAdapter` - owns the `notify` subscription and the worker thread
//!   that feeds routed events to the target
//!
//! ## Usage
//!
//! ```ignore
//! let adapter = WatcherAdapter::start(root, ".tpl", cache.clone())?;
//! // ...
//! adapter.stop();
//! ```

mod adapter;
mod router;


pub use adapter::WatcherAdapter;
pub use router::{is_change, EventRouter};
