use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

/// Binding power of `||`.
pub const OR: u8 = 1;
/// Binding power of `&&`.
pub const AND: u8 = 2;
/// Binding power of prefix `!`.
pub const NOT: u8 = 3;
/// Binding power of the comparisons.
pub const CMP: u8 = 4;
/// Binding power of `+` and `-`.
pub const ADD: u8 = 5;
/// Binding power of `*` and `/`.
pub const MUL: u8 = 6;
/// Binding power of prefix `-`.
pub const NEG: u8 = 7;
/// Binding power of `^`.
pub const POW: u8 = 8;

impl Parser<'_> {
    /// Parses a full expression.
    ///
    /// This is the entry point for expression parsing. It begins at the
    /// loosest binding power, logical OR.
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_binary(OR)
    }

    /// Parses binary operators by precedence climbing.
    ///
    /// Every binary operator is left-associative, `^` included, so
    /// `2 ^ 3 ^ 2` parses as `(2 ^ 3) ^ 2`. Comparisons do not associate at
    /// all: a comparison directly followed by another one is rejected. Each
    /// folded operator nests the tree one level deeper and counts against
    /// [`MAX_NESTING`](super::core::MAX_NESTING).
    ///
    /// # Parameters
    /// - `min_prec`: The loosest operator this call may consume.
    ///
    /// # Returns
    /// A (possibly nested) `Expr::BinaryOp` tree.
    pub(super) fn parse_binary(&mut self, min_prec: u8) -> ParseResult<Expr> {
        let mut left = self.parse_unary(min_prec)?;
        let mut folds = 0;

        while let Some(lexeme) = self.peek()
              && let Some((op, prec)) = token_to_binary_operator(&lexeme.token)
              && prec >= min_prec
        {
            let span = lexeme.span();
            self.advance();
            self.enter(span)?;
            folds += 1;

            let right = self.parse_binary(prec + 1)?;
            if op.is_comparison()
               && let Some(next) = self.peek()
               && token_to_binary_operator(&next.token).is_some_and(|(op, _)| op.is_comparison())
            {
                return self.fail(ParseError::ChainedComparison, next.span());
            }

            left = Expr::BinaryOp { op,
                                    left: Box::new(left),
                                    right: Box::new(right),
                                    span };
        }

        self.leave(folds);
        Ok(left)
    }
}

/// Maps a token to its binary operator and binding power.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some((operator, power))` if the token is a binary operator, otherwise
/// `None`.
///
/// # Example
/// ```
/// use oxlang::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::{MUL, token_to_binary_operator}},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Star), Some((BinaryOperator::Mul, MUL)));
/// assert_eq!(token_to_binary_operator(&Token::Bang), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<(BinaryOperator, u8)> {
    use BinaryOperator::{
        Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Pow, Sub,
    };
    let pair = match token {
        Token::DoublePipe => (Or, OR),
        Token::DoubleAmpersand => (And, AND),
        Token::EqualEqual => (Equal, CMP),
        Token::BangEqual => (NotEqual, CMP),
        Token::Less => (Less, CMP),
        Token::LessEqual => (LessEqual, CMP),
        Token::Greater => (Greater, CMP),
        Token::GreaterEqual => (GreaterEqual, CMP),
        Token::Plus => (Add, ADD),
        Token::Minus => (Sub, ADD),
        Token::Star => (Mul, MUL),
        Token::Slash => (Div, MUL),
        Token::Caret => (Pow, POW),
        _ => return None,
    };
    Some(pair)
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{Error, ParseError},
        interpreter::parser::parse,
        source::Source,
    };

    fn printed(text: &str) -> String {
        parse(&Source::anonymous(text)).unwrap().to_string()
    }

    fn parse_error(text: &str) -> ParseError {
        match parse(&Source::anonymous(text)) {
            Err(Error::Parse { kind, .. }) => kind,
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(printed("2 + 3 * 4"), "(2 + (3 * 4))\n");
        assert_eq!(printed("(2 + 3) * 4"), "((2 + 3) * 4)\n");
    }

    #[test]
    fn power_is_left_associative() {
        assert_eq!(printed("2 ^ 3 ^ 2"), "((2 ^ 3) ^ 2)\n");
    }

    #[test]
    fn prefix_minus_is_looser_than_power() {
        assert_eq!(printed("-2 ^ 2"), "(-(2 ^ 2))\n");
        assert_eq!(printed("2 ^ -1"), "(2 ^ (-1))\n");
    }

    #[test]
    fn not_is_looser_than_comparison() {
        assert_eq!(printed("!a == b"), "(!(a == b))\n");
        assert_eq!(printed("!a && b || c"), "(((!a) && b) || c)\n");
    }

    #[test]
    fn comparisons_do_not_chain() {
        assert_eq!(parse_error("a < b < c"), ParseError::ChainedComparison);
        assert_eq!(printed("(a < b) == c"), "((a < b) == c)\n");
    }
}
