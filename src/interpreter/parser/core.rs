use std::collections::HashSet;

use crate::{
    ast::{Body, Span},
    error::{Error, ParseError, diagnostic::GLOBAL_CONTEXT},
    interpreter::lexer::{Lexeme, Token, tokenize},
    source::Source,
};

pub type ParseResult<T> = Result<T, Error>;

/// Pragmas the parser knows how to activate.
pub const KNOWN_PRAGMAS: &[&str] = &["returns"];

/// Deepest nesting of expressions and blocks a unit may use.
///
/// Operands of a chain like `a + b + c` count one level per operator, since
/// they nest in the tree as deeply as parentheses would.
pub const MAX_NESTING: usize = 200;

/// Recursive-descent parser state over one source unit.
///
/// Besides the lexemes and a cursor, the parser tracks the declaration
/// context stack used by diagnostics, the set of active pragmas, how many
/// loops enclose the current position and how deeply the current expression
/// or block is nested.
pub struct Parser<'src> {
    pub(super) source:     &'src Source,
    pub(super) lexemes:    Vec<Lexeme<'src>>,
    pub(super) pos:        usize,
    pub(super) contexts:   Vec<String>,
    pub(super) pragmas:    HashSet<String>,
    pub(super) loop_depth: usize,
    pub(super) nesting:    usize,
}

/// Parses a whole source unit into its root [`Body`].
///
/// Every unit starts with a fresh pragma set.
///
/// # Parameters
/// - `source`: The source unit to parse.
///
/// # Returns
/// The root body, or the first lexing or parsing error.
///
/// # Example
/// ```
/// use oxlang::{interpreter::parser::parse, source::Source};
///
/// let body = parse(&Source::anonymous("x = 2 + 3 * 4")).unwrap();
/// assert_eq!(body.to_string(), "x = (2 + (3 * 4))\n");
/// ```
pub fn parse(source: &Source) -> ParseResult<Body> {
    Parser::new(source)?.parse_program()
}

impl<'src> Parser<'src> {
    /// Tokenizes `source` and positions the parser at its first token.
    pub fn new(source: &'src Source) -> ParseResult<Self> {
        Ok(Self { source,
                  lexemes: tokenize(source)?,
                  pos: 0,
                  contexts: vec![GLOBAL_CONTEXT.to_string()],
                  pragmas: HashSet::new(),
                  loop_depth: 0,
                  nesting: 0 })
    }

    /// Parses declarations until the end of input.
    pub fn parse_program(mut self) -> ParseResult<Body> {
        let span = Span::new(0, 0, 0);
        let decls = self.parse_declarations(false)?;
        Ok(Body { decls, span })
    }

    /// Index of the next lexeme at or after `from` that is not a comment.
    fn skip_comments(&self, from: usize) -> usize {
        let mut index = from;
        while self.lexemes.get(index).is_some_and(|l| l.token.is_comment()) {
            index += 1;
        }
        index
    }

    /// The next significant lexeme, without consuming it.
    pub(super) fn peek(&self) -> Option<&Lexeme<'src>> {
        self.peek_nth(0)
    }

    /// The `n`-th significant lexeme ahead, without consuming anything.
    pub(super) fn peek_nth(&self, n: usize) -> Option<&Lexeme<'src>> {
        let mut index = self.skip_comments(self.pos);
        for _ in 0..n {
            index = self.skip_comments(index + 1);
        }
        self.lexemes.get(index)
    }

    /// Whether the next significant token equals `token`.
    pub(super) fn check(&self, token: &Token) -> bool {
        self.peek().is_some_and(|l| &l.token == token)
    }

    /// Consumes and returns the next significant lexeme.
    pub(super) fn advance(&mut self) -> Option<Lexeme<'src>> {
        let index = self.skip_comments(self.pos);
        let lexeme = self.lexemes.get(index).cloned();
        if lexeme.is_some() {
            self.pos = index + 1;
        }
        lexeme
    }

    /// Consumes the next token if it equals `token`.
    pub(super) fn eat(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.pos = self.skip_comments(self.pos) + 1;
            return true;
        }
        false
    }

    /// Consumes `token` or fails naming what was `expected`.
    ///
    /// # Returns
    /// The span of the consumed token.
    pub(super) fn expect(&mut self, token: &Token, expected: &str) -> ParseResult<Span> {
        match self.peek() {
            Some(lexeme) if &lexeme.token == token => {
                let span = lexeme.span();
                self.pos = self.skip_comments(self.pos) + 1;
                Ok(span)
            },
            _ => self.unexpected(expected),
        }
    }

    /// Fails at the next token, or at the end of input if there is none.
    pub(super) fn unexpected<T>(&self, expected: &str) -> ParseResult<T> {
        let expected = expected.to_string();
        match self.peek() {
            Some(lexeme) => {
                let found = format!("'{}'", lexeme.raw.lines().next().unwrap_or(lexeme.raw));
                self.fail(ParseError::UnexpectedToken { expected, found }, lexeme.span())
            },
            None => self.fail(ParseError::UnexpectedEndOfInput { expected }, self.end_span()),
        }
    }

    /// Enters one more level of nesting, failing at `span` once the total
    /// passes [`MAX_NESTING`]. The caller leaves it again with
    /// [`Parser::leave`]; a failed parse is abandoned, so errors skip that.
    pub(super) fn enter(&mut self, span: Span) -> ParseResult<()> {
        self.nesting += 1;
        if self.nesting > MAX_NESTING {
            return self.fail(ParseError::NestingTooDeep { limit: MAX_NESTING }, span);
        }
        Ok(())
    }

    pub(super) const fn leave(&mut self, levels: usize) {
        self.nesting -= levels;
    }

    /// Builds the error for `kind` at `span` within the innermost open
    /// declaration.
    pub(super) fn fail<T>(&self, kind: ParseError, span: Span) -> ParseResult<T> {
        Err(Error::parse(kind, self.source, span, self.context()))
    }

    pub(super) fn context(&self) -> &str {
        self.contexts.last().map_or(GLOBAL_CONTEXT, String::as_str)
    }

    /// A one-character span just past the last token.
    fn end_span(&self) -> Span {
        self.lexemes
            .last()
            .map_or_else(Span::default, |l| {
                let line = l.line + l.raw.matches('\n').count();
                Span::new(l.offset + l.raw.len(), 1, line)
            })
    }
}
