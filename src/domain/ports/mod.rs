//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the view cache.
//! Infrastructure layer provides concrete implementations; tests substitute
//! closures through the blanket `Fn` implementations.

pub mod invalidate;
pub mod template_compiler;
pub mod view_loader;

pub use invalidate::Invalidate;
pub use template_compiler::{CompileError, CompiledTemplate, RenderError, Template, TemplateCompiler};
pub use view_loader::{LoadError, LoadResult, ViewLoader};
