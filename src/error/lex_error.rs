use thiserror::Error;

/// Represents all errors that can occur while tokenizing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// No token starts with this character.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// A string literal is missing its closing quote.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// A block comment is missing its closing `*/`.
    #[error("unterminated block comment")]
    UnterminatedComment,
    /// An integer literal does not fit in 64 bits, or a real literal
    /// overflows to infinity.
    #[error("numeric literal {0} is too large")]
    LiteralTooLarge(String),
}
