//! Built-in Template Compiler
//!
//! `DirectiveCompiler` implements the TemplateCompiler port for a small
//! template language: an optional `@model Type` declaration plus
//! `@Model.field` expressions rendered against a JSON model.

mod directive;
mod template;

pub use directive::DirectiveCompiler;
pub use template::{DirectiveTemplate, Segment};
