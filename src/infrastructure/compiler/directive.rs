//! Directive template parser
//!
//! Syntax:
//!
//! ```text
//! @model Shop.Product          optional, on its own line, before any content
//! <h1>@Model.Name</h1>         model expression, dotted field path
//! <p>@Model</p>                the whole model
//! <p>mail@@example.com</p>     `@@` is a literal `@`
//! ```
//!
//! An `@` directly preceded by an identifier character (as in an e-mail
//! address) or followed by something that cannot start an identifier is
//! literal text.

use crate::domain::ports::{CompileError, CompiledTemplate, TemplateCompiler};
use crate::domain::view::ModelType;

use super::template::{DirectiveTemplate, Segment};

const MODEL_DIRECTIVE: &str = "@model";
const MODEL_EXPRESSION: &str = "Model";

/// Compiles the `@model` directive template language
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveCompiler;

impl DirectiveCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateCompiler for DirectiveCompiler {
    fn compile(&self, source: &str) -> Result<CompiledTemplate, CompileError> {
        let (model_type, segments) = parse(source)?;
        Ok(CompiledTemplate::new(
            DirectiveTemplate::new(segments),
            model_type,
        ))
    }
}

/// Parse `source` into its model type and render segments
pub(crate) fn parse(source: &str) -> Result<(ModelType, Vec<Segment>), CompileError> {
    let mut parser = Parser::default();

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let line_no = index + 1;
        if let Some(declared) = directive_argument(line) {
            parser.model_directive(line_no, line, declared)?;
        } else {
            parser.content_line(line_no, line)?;
        }
    }

    Ok(parser.finish())
}

/// If `line` is an `@model` directive line, return its argument
fn directive_argument(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix(MODEL_DIRECTIVE)?;
    match rest.chars().next() {
        None => Some(""),
        Some(c) if c.is_whitespace() => Some(rest.trim()),
        Some(_) => None,
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_valid_type_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_ident_start(first) => {
            chars.all(|c| is_ident_char(c) || matches!(c, '.' | ':' | '<' | '>' | ',' | ' ' | '[' | ']'))
        }
        _ => false,
    }
}

#[derive(Default)]
struct Parser {
    model_type: Option<ModelType>,
    segments: Vec<Segment>,
    text: String,
    seen_content: bool,
}

impl Parser {
    fn model_directive(&mut self, line_no: usize, line: &str, declared: &str) -> Result<(), CompileError> {
        let column = line.len() - line.trim_start().len() + 1;

        if self.model_type.is_some() {
            return Err(CompileError::new(line_no, column, "duplicate '@model' directive"));
        }
        if self.seen_content {
            return Err(CompileError::new(
                line_no,
                column,
                "'@model' must appear before template content",
            ));
        }
        if declared.is_empty() {
            return Err(CompileError::new(line_no, column, "'@model' requires a type name"));
        }
        if !is_valid_type_name(declared) {
            return Err(CompileError::new(
                line_no,
                column + MODEL_DIRECTIVE.len() + 1,
                format!("invalid model type name '{declared}'"),
            ));
        }

        self.model_type = Some(ModelType::named(declared));
        Ok(())
    }

    fn content_line(&mut self, line_no: usize, line: &str) -> Result<(), CompileError> {
        if !line.trim().is_empty() {
            self.seen_content = true;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c != '@' {
                self.text.push(c);
                i += 1;
                continue;
            }

            let prev = i.checked_sub(1).map(|p| chars[p]);
            match chars.get(i + 1).copied() {
                Some('@') => {
                    self.text.push('@');
                    i += 2;
                }
                Some(next) if is_ident_start(next) && !prev.is_some_and(is_ident_char) => {
                    let start = i + 1;
                    let end = scan_ident(&chars, start);
                    let ident: String = chars[start..end].iter().collect();

                    if ident == MODEL_DIRECTIVE.trim_start_matches('@') {
                        return Err(CompileError::new(
                            line_no,
                            i + 1,
                            "'@model' directive must be on its own line",
                        ));
                    }
                    if ident != MODEL_EXPRESSION {
                        return Err(CompileError::new(
                            line_no,
                            i + 1,
                            format!("unknown expression '@{ident}'"),
                        ));
                    }

                    let (fields, next_index) = scan_fields(&chars, end);
                    self.flush_text();
                    self.segments.push(Segment::Model(fields));
                    i = next_index;
                }
                _ => {
                    self.text.push('@');
                    i += 1;
                }
            }
        }
        Ok(())
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.segments.push(Segment::Text(std::mem::take(&mut self.text)));
        }
    }

    fn finish(mut self) -> (ModelType, Vec<Segment>) {
        self.flush_text();
        (self.model_type.unwrap_or_default(), self.segments)
    }
}

fn scan_ident(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && is_ident_char(chars[end]) {
        end += 1;
    }
    end
}

/// Read `.field` accessors after `@Model`. A `.` not followed by an
/// identifier character is left as text (sentence punctuation).
fn scan_fields(chars: &[char], mut index: usize) -> (Vec<String>, usize) {
    let mut fields = Vec::new();
    while index + 1 < chars.len() && chars[index] == '.' && is_ident_char(chars[index + 1]) {
        let end = scan_ident(chars, index + 1);
        fields.push(chars[index + 1..end].iter().collect());
        index = end;
    }
    (fields, index)
}
