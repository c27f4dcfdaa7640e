//! TemplateCompiler port - the templating engine seen from the cache
//!
//! The cache treats compiled templates as opaque `Arc<dyn Template>` handles.
//! It only needs the model type next to the artifact so downstream callers
//! can bind a typed model before rendering.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::domain::view::ModelType;

/// A compiled, executable template
pub trait Template: fmt::Debug + Send + Sync {
    /// Render the template against a model
    fn render(&self, model: &Value) -> Result<String, RenderError>;

    /// Model paths the template reads, for diagnostics
    fn bindings(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Compiler output: the artifact and the model type it binds to
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    pub artifact: Arc<dyn Template>,
    pub model_type: ModelType,
}

impl CompiledTemplate {
    pub fn new(artifact: impl Template + 'static, model_type: ModelType) -> Self {
        Self {
            artifact: Arc::new(artifact),
            model_type,
        }
    }
}

/// Template compilation error with an optional source position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", describe(.line, .column, .message))]
pub struct CompileError {
    /// 1-indexed line, 0 when unknown
    pub line: usize,
    /// 1-indexed column, 0 when unknown
    pub column: usize,
    pub message: String,
}

impl CompileError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }

    /// Error without position information
    pub fn without_position(message: impl Into<String>) -> Self {
        Self::new(0, 0, message)
    }
}

fn describe(line: &usize, column: &usize, message: &str) -> String {
    if *line == 0 {
        message.to_string()
    } else {
        format!("{line}:{column}: {message}")
    }
}

/// Template rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The model has no value at the referenced path
    #[error("model has no field '{path}'")]
    MissingField { path: String },

    #[error("{0}")]
    Other(String),
}

/// Compiles view source text into a template
pub trait TemplateCompiler: Send + Sync {
    fn compile(&self, source: &str) -> Result<CompiledTemplate, CompileError>;
}

impl<F> TemplateCompiler for F
where
    F: Fn(&str) -> Result<CompiledTemplate, CompileError> + Send + Sync,
{
    fn compile(&self, source: &str) -> Result<CompiledTemplate, CompileError> {
        self(source)
    }
}
