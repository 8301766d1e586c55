use crate::{
    ast::{Body, Decl},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a block delimited by braces.
    ///
    /// Grammar: `block := "{" declaration* "}"`
    ///
    /// # Returns
    /// A body whose span points at the opening brace.
    pub(super) fn parse_block(&mut self) -> ParseResult<Body> {
        let span = self.expect(&Token::LBrace, "'{'")?;
        self.enter(span)?;
        let decls = self.parse_declarations(true)?;
        self.leave(1);
        Ok(Body { decls, span })
    }

    /// Parses declarations until the closing brace, or until the end of input
    /// when `closing` is false.
    ///
    /// This is the only place comments are looked at: each one found in
    /// statement position becomes a [`Decl::Comment`]. The closing brace is
    /// consumed.
    pub(super) fn parse_declarations(&mut self, closing: bool) -> ParseResult<Vec<Decl>> {
        let mut decls = Vec::new();

        loop {
            let Some(lexeme) = self.lexemes.get(self.pos) else {
                if closing {
                    return self.unexpected("'}'");
                }
                break;
            };

            if let Token::LineComment(text) | Token::BlockComment(text) = &lexeme.token {
                let comment = Decl::Comment { text:  text.clone(),
                                              block: matches!(lexeme.token, Token::BlockComment(_)),
                                              span:  lexeme.span(), };
                decls.push(comment);
                self.pos += 1;
                continue;
            }
            if closing && lexeme.token == Token::RBrace {
                self.pos += 1;
                break;
            }

            decls.push(self.parse_declaration()?);
        }

        Ok(decls)
    }
}
