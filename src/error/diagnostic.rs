use std::fmt;

use crate::{ast::Span, source::Source};

/// Declaration context reported for code outside any function or struct.
pub const GLOBAL_CONTEXT: &str = "<global>";

/// A located, human-readable error report.
///
/// Both the parser and the evaluator produce diagnostics in this shape, and
/// the rendered text is the externally observable error contract:
///
/// ```text
/// main.ox, function 'area', line 2, column 11: undefined variable: foo
///     return foo * 2
///            ^^^
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the source unit.
    pub filename: String,
    /// Declaration context, such as `function 'foo'` or `<global>`.
    pub context:  String,
    /// Zero-indexed line.
    pub line:     usize,
    /// Zero-indexed column in characters.
    pub column:   usize,
    /// The error message.
    pub message:  String,
    /// The literal source line.
    pub code:     String,
    /// Number of carets drawn under the offending token.
    pub width:    usize,
}

impl Diagnostic {
    /// Builds a diagnostic for `span` within `source`.
    pub fn new(source: &Source,
               span: Span,
               context: impl Into<String>,
               message: impl Into<String>)
               -> Self {
        Self { filename: source.name().to_string(),
               context:  context.into(),
               line:     span.line,
               column:   source.column(span.line, span.offset),
               message:  message.into(),
               code:     source.line_text(span.line).to_string(),
               width:    source.caret_width(span.line, span.offset, span.len), }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f,
                 "{}, {}, line {}, column {}: {}",
                 self.filename, self.context, self.line, self.column, self.message)?;
        writeln!(f, "{}", self.code)?;
        write!(f, "{}{}", " ".repeat(self.column), "^".repeat(self.width))
    }
}

/// Describes a function declaration for diagnostics.
#[must_use]
pub fn function_context(name: &str) -> String {
    format!("function '{name}'")
}

/// Describes a struct declaration for diagnostics.
#[must_use]
pub fn struct_context(name: &str) -> String {
    format!("struct '{name}'")
}
