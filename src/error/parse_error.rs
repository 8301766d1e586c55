use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during parsing.
pub enum ParseError {
    /// Found a token the grammar does not allow here.
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        /// What the parser was looking for.
        expected: String,
        /// The token encountered.
        found:    String,
    },
    /// Reached the end of input in the middle of a construct.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
    },
    /// Comparison operators were chained, as in `a < b < c`.
    #[error("comparison operators cannot be chained")]
    ChainedComparison,
    /// The left side of `=` is not a (dotted) name.
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    /// `break` or `continue` appeared outside of any loop.
    #[error("'{0}' outside of a loop")]
    LoopControlOutsideLoop(&'static str),
    /// A construct was used without the pragma that enables it.
    #[error("'{construct}' is not supported without `import pragma.{pragma}`")]
    PragmaRequired {
        /// The incompatible construct.
        construct: &'static str,
        /// The pragma that would enable it.
        pragma:    &'static str,
    },
    /// A pragma directive named no known pragma.
    #[error("unknown pragma '{0}'")]
    UnknownPragma(String),
    /// A parameter other than the last one was marked variadic.
    #[error("only the last parameter can be variadic, but '{0}' is not last")]
    VariadicNotLast(String),
    /// Expressions or blocks were nested deeper than the parser accepts.
    #[error("nesting is deeper than {limit} levels")]
    NestingTooDeep {
        /// The deepest nesting allowed.
        limit: usize,
    },
}
