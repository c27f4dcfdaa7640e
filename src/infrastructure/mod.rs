//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - View loading from local disk
//! - `compiler/` - The built-in directive template compiler

pub mod compiler;
pub mod fs;

// Re-export for convenience
pub use compiler::{DirectiveCompiler, DirectiveTemplate};
pub use fs::LocalViewLoader;
