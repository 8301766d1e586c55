use crate::{
    ast::{Param, Span, Variable},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{KNOWN_PRAGMAS, ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a comma-separated list of items until a closing token.
    ///
    /// This utility is shared by array literals, subscripts, call arguments
    /// and parameter lists. An immediately encountered closing token produces
    /// an empty list. The closing token is consumed.
    ///
    /// Grammar (simplified): `list := item ("," item)*`
    ///
    /// # Parameters
    /// - `closing`: The token that terminates the list (e.g., `]` or `)`).
    /// - `closing_text`: How `closing` is named in error messages.
    /// - `parse_item`: Function used to parse each list element.
    pub(super) fn parse_comma_separated<T>(&mut self,
                                           closing: &Token,
                                           closing_text: &str,
                                           mut parse_item: impl FnMut(&mut Self) -> ParseResult<T>)
                                           -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        if self.eat(closing) {
            return Ok(items);
        }
        loop {
            items.push(parse_item(self)?);
            if self.eat(&Token::Comma) {
                continue;
            }
            if self.eat(closing) {
                break;
            }
            return self.unexpected(&format!("',' or {closing_text}"));
        }
        Ok(items)
    }

    /// Parses a plain identifier and returns its name and span.
    pub(super) fn parse_identifier(&mut self, expected: &str) -> ParseResult<(String, Span)> {
        match self.peek() {
            Some(lexeme) => {
                if let Token::Identifier(name) = &lexeme.token {
                    let found = (name.clone(), lexeme.span());
                    self.advance();
                    return Ok(found);
                }
                self.unexpected(expected)
            },
            None => self.unexpected(expected),
        }
    }

    /// Parses a dotted name: `variable := ID ("." ID)*`.
    ///
    /// The span of the result covers the whole path when it sits on one line.
    pub(super) fn parse_variable(&mut self) -> ParseResult<Variable> {
        let (name, mut span) = self.parse_identifier("a name")?;
        let mut attrs = Vec::new();

        while self.check(&Token::Dot)
              && matches!(self.peek_nth(1).map(|l| &l.token), Some(Token::Identifier(_)))
        {
            self.advance();
            let (attr, attr_span) = self.parse_identifier("an attribute name")?;
            span = span.to(attr_span);
            attrs.push(attr);
        }

        Ok(Variable { name, attrs, span })
    }

    /// Parses a parameter list up to and including `closing`.
    ///
    /// A trailing `...` marks a parameter variadic; only the last one may be.
    pub(super) fn parse_params(&mut self,
                               closing: &Token,
                               closing_text: &str)
                               -> ParseResult<Vec<Param>> {
        let params = self.parse_comma_separated(closing, closing_text, |p| {
                             let (name, span) = p.parse_identifier("a parameter name")?;
                             let variadic = p.eat(&Token::Ellipsis);
                             Ok((Param { name, variadic }, span))
                         })?;

        let last = params.len().saturating_sub(1);
        if let Some((param, span)) = params.iter().take(last).find(|(p, _)| p.variadic) {
            return self.fail(ParseError::VariadicNotLast(param.name.clone()), *span);
        }

        Ok(params.into_iter().map(|(param, _)| param).collect())
    }

    /// Whether the upcoming tokens form `ID ("." ID)* ("=" | "+=" | ...)`.
    pub(super) fn at_assignment(&self) -> bool {
        let mut index = 0;
        if !matches!(self.peek_nth(index).map(|l| &l.token), Some(Token::Identifier(_))) {
            return false;
        }
        while matches!(self.peek_nth(index + 1).map(|l| &l.token), Some(Token::Dot))
              && matches!(self.peek_nth(index + 2).map(|l| &l.token), Some(Token::Identifier(_)))
        {
            index += 2;
        }
        self.peek_nth(index + 1)
            .is_some_and(|l| is_assignment_operator(&l.token))
    }

    /// Turns on a pragma for the rest of this unit.
    pub(super) fn activate_pragma(&mut self, name: &str, span: Span) -> ParseResult<()> {
        if !KNOWN_PRAGMAS.contains(&name) {
            return self.fail(ParseError::UnknownPragma(name.to_string()), span);
        }
        tracing::debug!(pragma = name, "pragma activated");
        self.pragmas.insert(name.to_string());
        Ok(())
    }
}

/// Whether `token` is `=` or one of the compound assignment operators.
pub(super) const fn is_assignment_operator(token: &Token) -> bool {
    matches!(token,
             Token::Equals
             | Token::PlusAssign
             | Token::MinusAssign
             | Token::MulAssign
             | Token::DivAssign
             | Token::PowAssign)
}
