use crate::{
    ast::{Expr, Literal, Span, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::{NEG, NOT},
            core::{ParseResult, Parser},
        },
    },
};

impl Parser<'_> {
    /// Parses a prefix operation, or a postfix expression if there is none.
    ///
    /// The operand of a prefix operator is parsed at the operator's own
    /// binding power, or tighter if the caller already requires it. This is
    /// what makes `-2 ^ 2` negate the power and `!a == b` negate the
    /// comparison.
    ///
    /// # Parameters
    /// - `min_prec`: The binding power required by the caller.
    pub(super) fn parse_unary(&mut self, min_prec: u8) -> ParseResult<Expr> {
        let Some(lexeme) = self.peek() else {
            return self.parse_postfix();
        };
        let (op, prec) = match lexeme.token {
            Token::Minus => (UnaryOperator::Negate, NEG),
            Token::Bang => (UnaryOperator::Not, NOT),
            _ => return self.parse_postfix(),
        };
        let span = lexeme.span();
        self.advance();

        self.enter(span)?;
        let operand = self.parse_binary(min_prec.max(prec))?;
        self.leave(1);
        Ok(Expr::UnaryOp { op,
                           operand: Box::new(operand),
                           span })
    }

    /// Parses a primary expression followed by any number of subscripts.
    ///
    /// `a[0][1]` nests two `Index` nodes; `a[0, 1]` is a single node with two
    /// subscripts.
    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut node = self.parse_primary()?;

        while self.check(&Token::LBracket) {
            let span = self.expect(&Token::LBracket, "'['")?;
            let by = self.parse_nested_list(&Token::RBracket, "']'", span)?;
            if by.is_empty() {
                let kind = ParseError::UnexpectedToken { expected: "a subscript".into(),
                                                         found:    "']'".into(), };
                return self.fail(kind, span);
            }
            node = Expr::Index { target: Box::new(node),
                                 by,
                                 span };
        }

        Ok(node)
    }

    /// Parses a primary expression.
    ///
    /// Grammar:
    /// ```text
    /// primary := literal | "(" expression ")" | "[" list "]"
    ///          | variable [ "(" list ")" ]
    /// ```
    pub(super) fn parse_primary(&mut self) -> ParseResult<Expr> {
        let Some(lexeme) = self.peek() else {
            return self.unexpected("an expression");
        };
        let span = lexeme.span();

        let value = match &lexeme.token {
            Token::Nil => Literal::Nil,
            Token::Bool(b) => Literal::Bool(*b),
            Token::Integer(n) => Literal::Integer(*n),
            Token::Real(r) => Literal::Real(*r),
            Token::Text(s) => Literal::Text(s.clone()),
            Token::LParen => return self.parse_grouping(),
            Token::LBracket => return self.parse_array_literal(),
            Token::Identifier(_) => return self.parse_identifier_or_call(),
            _ => return self.unexpected("an expression"),
        };
        self.advance();

        Ok(Expr::Constant { value, span })
    }

    /// Parses a parenthesized expression.
    fn parse_grouping(&mut self) -> ParseResult<Expr> {
        let span = self.expect(&Token::LParen, "'('")?;
        self.enter(span)?;
        let expr = self.parse_expression()?;
        self.leave(1);
        self.expect(&Token::RParen, "')'")?;
        Ok(expr)
    }

    /// Parses a list literal: `"[" (expression ("," expression)*)? "]"`.
    fn parse_array_literal(&mut self) -> ParseResult<Expr> {
        let span = self.expect(&Token::LBracket, "'['")?;
        let elements = self.parse_nested_list(&Token::RBracket, "']'", span)?;
        Ok(Expr::Array { elements, span })
    }

    /// Parses a dotted name, turning it into a call if `(` follows.
    fn parse_identifier_or_call(&mut self) -> ParseResult<Expr> {
        let var = self.parse_variable()?;

        if self.eat(&Token::LParen) {
            let args = self.parse_nested_list(&Token::RParen, "')'", var.span)?;
            return Ok(Expr::Call { span: var.span,
                                   callee: var,
                                   args });
        }

        Ok(Expr::Variable(var))
    }

    /// Parses comma separated expressions one nesting level below `span`.
    fn parse_nested_list(&mut self,
                         closing: &Token,
                         expected: &str,
                         span: Span)
                         -> ParseResult<Vec<Expr>> {
        self.enter(span)?;
        let items = self.parse_comma_separated(closing, expected, Self::parse_expression)?;
        self.leave(1);
        Ok(items)
    }
}
