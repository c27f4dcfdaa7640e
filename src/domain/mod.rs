//! Domain Layer
//!
//! Pure types and rules for the view cache, without I/O.
//!
//! ## Structure
//!
//! - `path` - Key normalization shared by the cache and the watcher
//! - `view` - The `CompiledView` entity and its value objects
//! - `ports/` - Interfaces for the loader, compiler and invalidation target

pub mod path;
pub mod ports;
pub mod view;

pub use view::{CompiledView, Fingerprint, ModelType};
