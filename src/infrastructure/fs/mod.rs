//! File System Implementations
//!
//! Concrete implementations of the ViewLoader port.

mod local;

pub use local::LocalViewLoader;
