//! Compiled View Entity
//!
//! A `CompiledView` is the unit stored in the view cache: the loaded source,
//! the compiled artifact and the model type the artifact binds to. Views are
//! immutable; a refresh builds a new one and swaps it into the cache.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::ports::{CompiledTemplate, RenderError, Template};

/// Descriptor of the model a compiled template binds to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ModelType {
    /// The template declared `@model Name`
    Named(String),
    /// No model declaration; any model is accepted
    #[default]
    Dynamic,
}

impl ModelType {
    /// Create a named model type
    pub fn named(name: impl Into<String>) -> Self {
        ModelType::Named(name.into())
    }

    /// Declared type name, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            ModelType::Named(name) => Some(name),
            ModelType::Dynamic => None,
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelType::Named(name) => write!(f, "{}", name),
            ModelType::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// SHA-256 fingerprint of a view's source text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Prefix for SHA-256 fingerprints
    pub const PREFIX: &'static str = "sha256:";

    /// Compute the fingerprint of `content`
    pub fn of(content: &str) -> Self {
        use sha2::{Digest, Sha256};
        let hash = Sha256::digest(content.as_bytes());
        Self(format!("{}{:x}", Self::PREFIX, hash))
    }

    /// Full fingerprint string with prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated hex form for display
    pub fn short(&self) -> &str {
        let hex = self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0);
        &hex[..hex.len().min(12)]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One successfully loaded and compiled view
#[derive(Debug, Clone)]
pub struct CompiledView {
    key: String,
    source_text: String,
    artifact: Arc<dyn Template>,
    model_type: ModelType,
    fingerprint: Fingerprint,
    generation: u64,
}

impl CompiledView {
    /// Build a view from its key, source and compiler output.
    ///
    /// `generation` is assigned by the cache at publication time.
    pub fn new(
        key: impl Into<String>,
        source_text: impl Into<String>,
        compiled: CompiledTemplate,
        generation: u64,
    ) -> Self {
        let source_text = source_text.into();
        Self {
            key: key.into(),
            fingerprint: Fingerprint::of(&source_text),
            source_text,
            artifact: compiled.artifact,
            model_type: compiled.model_type,
            generation,
        }
    }

    /// Normalized path this view is cached under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Source text as loaded at compile time
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// The compiled artifact
    pub fn artifact(&self) -> &Arc<dyn Template> {
        &self.artifact
    }

    pub fn model_type(&self) -> &ModelType {
        &self.model_type
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Publication counter; later publications of a key have larger values
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether both views share the same compiled artifact instance
    pub fn same_artifact(&self, other: &CompiledView) -> bool {
        Arc::ptr_eq(&self.artifact, &other.artifact)
    }

    /// Render the artifact against a model
    pub fn render(&self, model: &Value) -> Result<String, RenderError> {
        self.artifact.render(model)
    }
}
