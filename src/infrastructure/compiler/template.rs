//! Compiled directive templates

use serde_json::Value;

use crate::domain::ports::{RenderError, Template};

/// One piece of a compiled template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal output
    Text(String),
    /// `@Model` followed by a (possibly empty) field path
    Model(Vec<String>),
}

/// A parsed template ready to render against a JSON model
#[derive(Debug, Clone)]
pub struct DirectiveTemplate {
    segments: Vec<Segment>,
    literal_len: usize,
}

impl DirectiveTemplate {
    pub(crate) fn new(segments: Vec<Segment>) -> Self {
        let literal_len = segments
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => text.len(),
                Segment::Model(_) => 0,
            })
            .sum();
        Self {
            segments,
            literal_len,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl Template for DirectiveTemplate {
    fn render(&self, model: &Value) -> Result<String, RenderError> {
        let mut out = String::with_capacity(self.literal_len);
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Model(fields) => {
                    let value = lookup(model, fields).ok_or_else(|| RenderError::MissingField {
                        path: binding_path(fields),
                    })?;
                    write_value(&mut out, value);
                }
            }
        }
        Ok(out)
    }

    fn bindings(&self) -> Vec<String> {
        let mut bindings: Vec<String> = Vec::new();
        for segment in &self.segments {
            if let Segment::Model(fields) = segment {
                let path = binding_path(fields);
                if !bindings.contains(&path) {
                    bindings.push(path);
                }
            }
        }
        bindings
    }
}

fn binding_path(fields: &[String]) -> String {
    std::iter::once("Model")
        .chain(fields.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(".")
}

fn lookup<'a>(model: &'a Value, fields: &[String]) -> Option<&'a Value> {
    fields.iter().try_fold(model, |value, field| match value {
        Value::Object(map) => map.get(field),
        Value::Array(items) => field.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => escape_html(out, s),
        Value::Array(_) | Value::Object(_) => escape_html(out, &value.to_string()),
    }
}

fn escape_html(out: &mut String, raw: &str) {
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
