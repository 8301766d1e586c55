/// Caret-style diagnostics.
///
/// Renders a failure against the source unit it happened in: file name,
/// declaration context, zero-indexed line and column, the message, the literal
/// source line and a caret run under the offending token.
pub mod diagnostic;
/// Lexing errors.
///
/// Raised when no token pattern matches the input at some position.
pub mod lex_error;
/// Parsing errors.
///
/// Defines every grammar violation the parser can report, including pragma
/// misuse and loop control outside of a loop.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error kinds that can be raised while evaluating a parsed
/// program, from undefined names to runaway recursion.
pub mod runtime_error;

pub use diagnostic::Diagnostic;
pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
use thiserror::Error as ThisError;

use crate::{ast::Span, error::diagnostic::GLOBAL_CONTEXT, source::Source};

/// Any failure raised while executing ox source text.
///
/// Every variant pairs the kind of failure with the rendered [`Diagnostic`].
/// Displaying the error prints the diagnostic.
#[derive(Debug, ThisError)]
pub enum Error {
    /// No token pattern matched the input.
    #[error("{diagnostic}")]
    Lex {
        /// What went wrong.
        kind:       LexError,
        /// Where it went wrong.
        diagnostic: Box<Diagnostic>,
    },
    /// The token stream violated the grammar.
    #[error("{diagnostic}")]
    Parse {
        /// What went wrong.
        kind:       ParseError,
        /// Where it went wrong.
        diagnostic: Box<Diagnostic>,
    },
    /// Evaluation failed.
    #[error("{diagnostic}")]
    Runtime {
        /// What went wrong.
        kind:       RuntimeError,
        /// Where it went wrong.
        diagnostic: Box<Diagnostic>,
    },
}

impl Error {
    pub(crate) fn lex(kind: LexError, source: &Source, span: Span) -> Self {
        let diagnostic = Diagnostic::new(source, span, GLOBAL_CONTEXT, kind.to_string());
        Self::Lex { kind,
                    diagnostic: Box::new(diagnostic) }
    }

    pub(crate) fn parse(kind: ParseError, source: &Source, span: Span, context: &str) -> Self {
        let diagnostic = Diagnostic::new(source, span, context, kind.to_string());
        Self::Parse { kind,
                      diagnostic: Box::new(diagnostic) }
    }

    pub(crate) fn runtime(kind: RuntimeError, source: &Source, span: Span, context: &str) -> Self {
        let diagnostic = Diagnostic::new(source, span, context, kind.to_string());
        Self::Runtime { kind,
                        diagnostic: Box::new(diagnostic) }
    }

    /// The rendered diagnostic of this error.
    #[must_use]
    pub fn diagnostic(&self) -> &Diagnostic {
        match self {
            Self::Lex { diagnostic, .. }
            | Self::Parse { diagnostic, .. }
            | Self::Runtime { diagnostic, .. } => diagnostic,
        }
    }

    /// The runtime error kind, if this error was raised during evaluation.
    #[must_use]
    pub const fn runtime_kind(&self) -> Option<&RuntimeError> {
        match self {
            Self::Runtime { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// The parse error kind, if this error was raised by the parser.
    #[must_use]
    pub const fn parse_kind(&self) -> Option<&ParseError> {
        match self {
            Self::Parse { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Whether evaluation was stopped by the call-depth bound.
    ///
    /// Hosts use this to report likely infinite recursion instead of a
    /// generic failure.
    #[must_use]
    pub const fn is_stack_exhausted(&self) -> bool {
        matches!(self,
                 Self::Runtime { kind: RuntimeError::StackExhausted { .. },
                                 .. })
    }
}
