use logos::Logos;

use crate::{
    ast::Span,
    error::{Error, LexError},
    source::Source,
};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Real literal tokens, such as `3.14`, `2.0`, `2.1e-10` or `1e5`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// String literal tokens in single or double quotes, without the quotes.
    #[regex(r#""[^"]*""#, parse_text, allow_greedy = true)]
    #[regex(r"'[^']*'", parse_text, allow_greedy = true)]
    Text(String),
    /// A string literal that runs to the end of input.
    #[regex(r#""[^"]*"#, allow_greedy = true)]
    #[regex(r"'[^']*", allow_greedy = true)]
    UnterminatedText,
    /// `nil`
    #[token("nil")]
    Nil,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `return`
    #[token("return")]
    Return,
    /// `returns`
    #[token("returns")]
    Returns,
    /// `for`
    #[token("for")]
    For,
    /// `in`
    #[token("in")]
    In,
    /// `while`
    #[token("while")]
    While,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `func`
    #[token("func")]
    Func,
    /// `struct`
    #[token("struct")]
    Struct,
    /// `import`
    #[token("import")]
    Import,
    /// `pragma`
    #[token("pragma")]
    Pragma,
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`, without the leading slashes.
    #[regex(r"//[^\n\r]*", |lex| lex.slice()[2..].to_string(), allow_greedy = true)]
    LineComment(String),
    /// ```text
    /// /* Multi line comments. */
    /// ```
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", |lex| {
        let comment = lex.slice();
        comment[2..comment.len() - 2].to_string()
    }, allow_greedy = true)]
    BlockComment(String),
    /// A block comment that runs to the end of input.
    #[regex(r"/\*([^*]|\*+[^*/])*\**", allow_greedy = true)]
    UnterminatedComment,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    MulAssign,
    /// `/=`
    #[token("/=")]
    DivAssign,
    /// `^=`
    #[token("^=")]
    PowAssign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `=`
    #[token("=")]
    Equals,
    /// `&&`
    #[token("&&")]
    DoubleAmpersand,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `...`
    #[token("...")]
    Ellipsis,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,

    /// Spaces, tabs, feeds and newlines.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

impl Token {
    /// Whether this token is a comment, which the parser only looks at in
    /// statement position.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self, Self::LineComment(_) | Self::BlockComment(_))
    }
}

/// A token together with its raw text and position.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme<'src> {
    /// The classified token.
    pub token:  Token,
    /// The exact source text of the token.
    pub raw:    &'src str,
    /// Absolute byte offset of the token's first byte.
    pub offset: usize,
    /// Zero-indexed line of the token's first byte.
    pub line:   usize,
}

impl Lexeme<'_> {
    /// The span covering this token.
    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.offset, self.raw.len(), self.line)
    }
}

/// Splits a source unit into lexemes.
///
/// Whitespace is dropped; comments are kept. Line numbers are recovered by
/// counting the newlines between consecutive tokens, so multi-line strings and
/// block comments advance the line count of everything after them.
///
/// # Parameters
/// - `source`: The source unit to tokenize.
///
/// # Returns
/// - `Ok(Vec<Lexeme>)`: Every token, in source order.
/// - `Err(Error::Lex)`: At the first position no token pattern matches.
///
/// # Example
/// ```
/// use oxlang::{
///     interpreter::lexer::{Token, tokenize},
///     source::Source,
/// };
///
/// let source = Source::anonymous("x = 1\n// done");
/// let lexemes = tokenize(&source).unwrap();
///
/// assert_eq!(lexemes[2].token, Token::Integer(1));
/// assert_eq!(lexemes[3].line, 1);
/// ```
pub fn tokenize(source: &Source) -> Result<Vec<Lexeme<'_>>, Error> {
    let text = source.text();
    let mut lexer = Token::lexer(text);
    let mut lexemes = Vec::new();
    let mut line = 0;
    let mut cursor = 0;

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        line += text[cursor..range.start].matches('\n').count();
        cursor = range.start;

        let raw = lexer.slice();
        let span = Span::new(range.start, raw.len(), line);
        let token = match result {
            Ok(Token::UnterminatedText) => {
                return Err(Error::lex(LexError::UnterminatedString, source, span));
            },
            Ok(Token::UnterminatedComment) => {
                return Err(Error::lex(LexError::UnterminatedComment, source, span));
            },
            Ok(token) => token,
            Err(()) => return Err(Error::lex(classify_failure(raw), source, span)),
        };

        lexemes.push(Lexeme { token,
                              raw,
                              offset: range.start,
                              line });
    }

    Ok(lexemes)
}

/// Decides which lexing error a slice that matched no pattern represents.
fn classify_failure(raw: &str) -> LexError {
    match raw.chars().next() {
        Some(c) if c.is_ascii_digit() => LexError::LiteralTooLarge(raw.to_string()),
        Some('"' | '\'') => LexError::UnterminatedString,
        Some(c) => LexError::UnexpectedCharacter(c),
        None => LexError::UnexpectedCharacter('\0'),
    }
}

/// Parses a floating-point literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed floating-point value if it is finite.
/// - `None`: If the token slice is not a valid float or overflows to
///   infinity.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok().filter(|r: &f64| r.is_finite())
}
/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Some(i64)`: The parsed integer value if it fits.
/// - `None`: If the literal does not fit in 64 bits.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}
/// Parses a boolean literal from the current token slice (`true` or `false`).
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
/// Strips the quotes off a string literal.
fn parse_text(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

#[cfg(test)]
mod tests {
    use super::{Token, tokenize};
    use crate::{
        error::{Error, LexError},
        source::Source,
    };

    fn tokens(text: &str) -> Vec<Token> {
        let source = Source::anonymous(text);
        tokenize(&source).unwrap().into_iter().map(|l| l.token).collect()
    }

    fn lex_error(text: &str) -> LexError {
        match tokenize(&Source::anonymous(text)) {
            Err(Error::Lex { kind, .. }) => kind,
            other => panic!("expected a lex error, got {other:?}"),
        }
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert_eq!(tokens("returns return iffy if"),
                   vec![Token::Returns,
                        Token::Return,
                        Token::Identifier("iffy".into()),
                        Token::If]);
    }

    #[test]
    fn numbers_are_split_on_the_dot() {
        assert_eq!(tokens("1 1.5 2e3 7.25e-1"),
                   vec![Token::Integer(1), Token::Real(1.5), Token::Real(2000.0), Token::Real(0.725)]);
        assert_eq!(tokens("a.b"),
                   vec![Token::Identifier("a".into()), Token::Dot, Token::Identifier("b".into())]);
    }

    #[test]
    fn both_quote_forms_produce_text() {
        assert_eq!(tokens(r#"'say "hi"' "it's""#),
                   vec![Token::Text("say \"hi\"".into()), Token::Text("it's".into())]);
    }

    #[test]
    fn comments_are_kept() {
        assert_eq!(tokens("x // one\n/* two\n */ y"),
                   vec![Token::Identifier("x".into()),
                        Token::LineComment(" one".into()),
                        Token::BlockComment(" two\n ".into()),
                        Token::Identifier("y".into())]);
    }

    #[test]
    fn operators_prefer_the_longest_match() {
        assert_eq!(tokens("a... += <= ! != ^="),
                   vec![Token::Identifier("a".into()),
                        Token::Ellipsis,
                        Token::PlusAssign,
                        Token::LessEqual,
                        Token::Bang,
                        Token::BangEqual,
                        Token::PowAssign]);
    }

    #[test]
    fn lines_follow_multiline_tokens() {
        let source = Source::anonymous("a\n/* x\ny */ b\n'c\nd' e");
        let lexemes = tokenize(&source).unwrap();
        let lines: Vec<usize> = lexemes.iter().map(|l| l.line).collect();

        assert_eq!(lines, vec![0, 1, 2, 3, 4]);
        assert_eq!(lexemes[2].offset, 12);
    }

    #[test]
    fn failures_are_classified() {
        assert_eq!(lex_error("x = $"), LexError::UnexpectedCharacter('$'));
        assert_eq!(lex_error("x = 'open"), LexError::UnterminatedString);
        assert_eq!(lex_error("/* never closed"), LexError::UnterminatedComment);
        assert_eq!(lex_error("99999999999999999999"),
                   LexError::LiteralTooLarge("99999999999999999999".into()));
        assert_eq!(lex_error("x = 1e400"), LexError::LiteralTooLarge("1e400".into()));
        assert_eq!(lex_error("x = 1.5e999"), LexError::LiteralTooLarge("1.5e999".into()));
    }

    #[test]
    fn error_positions_point_at_the_offending_character() {
        let Err(err) = tokenize(&Source::anonymous("x = 1\ny = @")) else {
            panic!("expected a lex error");
        };

        assert_eq!(err.diagnostic().line, 1);
        assert_eq!(err.diagnostic().column, 4);
    }
}
