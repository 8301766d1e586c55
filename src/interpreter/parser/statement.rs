use std::{mem, rc::Rc};

use crate::{
    ast::{
        Assign, BinaryOperator, Body, Conditional, Decl, Expr, ForInLoop, Function, Import,
        ImportMembers, Literal, Loop, Struct,
    },
    error::{
        ParseError,
        diagnostic::{function_context, struct_context},
    },
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, Parser},
            utils::is_assignment_operator,
        },
    },
};

impl Parser<'_> {
    /// Parses a single declaration.
    ///
    /// Keywords select the construct. An identifier path followed by `=` or a
    /// compound operator is an assignment; anything else is parsed as an
    /// expression evaluated for its side effects.
    pub(super) fn parse_declaration(&mut self) -> ParseResult<Decl> {
        let Some(token) = self.peek().map(|l| l.token.clone()) else {
            return self.unexpected("a declaration");
        };

        match token {
            Token::Func => self.parse_function(),
            Token::Struct => self.parse_struct(),
            Token::Return => self.parse_return(),
            Token::If => self.parse_conditional().map(Decl::Conditional),
            Token::For => self.parse_for(),
            Token::While => self.parse_while(),
            Token::Break | Token::Continue => self.parse_loop_control(),
            Token::Import => self.parse_import(),
            Token::Pragma => self.parse_pragma(),
            _ if self.at_assignment() => self.parse_assign().map(Decl::Assign),
            _ => self.parse_expression_statement(),
        }
    }

    /// Parses an expression statement, rejecting expressions used as
    /// assignment targets.
    fn parse_expression_statement(&mut self) -> ParseResult<Decl> {
        let expr = self.parse_expression()?;
        if self.peek().is_some_and(|l| is_assignment_operator(&l.token)) {
            return self.fail(ParseError::InvalidAssignmentTarget, expr.span());
        }
        Ok(Decl::Expr(expr))
    }

    /// Parses `target = expr` or a compound assignment.
    ///
    /// `x += 1` is desugared into `x = x + 1`.
    pub(super) fn parse_assign(&mut self) -> ParseResult<Assign> {
        let target = self.parse_variable()?;
        let Some(op) = self.advance() else {
            return self.unexpected("'='");
        };

        let compound = match op.token {
            Token::Equals => None,
            Token::PlusAssign => Some(BinaryOperator::Add),
            Token::MinusAssign => Some(BinaryOperator::Sub),
            Token::MulAssign => Some(BinaryOperator::Mul),
            Token::DivAssign => Some(BinaryOperator::Div),
            Token::PowAssign => Some(BinaryOperator::Pow),
            _ => return self.fail(ParseError::InvalidAssignmentTarget, target.span),
        };

        let mut value = self.parse_expression()?;
        if let Some(bin_op) = compound {
            value = Expr::BinaryOp { op:    bin_op,
                                     left:  Box::new(Expr::Variable(target.clone())),
                                     right: Box::new(value),
                                     span:  op.span(), };
        }

        Ok(Assign { span: target.span,
                    target,
                    value })
    }

    /// Parses `func name(params) [returns] { body }`.
    ///
    /// The function's name becomes the diagnostic context of everything
    /// inside it, and its body starts outside of any loop.
    fn parse_function(&mut self) -> ParseResult<Decl> {
        self.expect(&Token::Func, "'func'")?;
        let (name, span) = self.parse_identifier("a function name")?;
        self.contexts.push(function_context(&name));

        self.expect(&Token::LParen, "'('")?;
        let params = self.parse_params(&Token::RParen, "')'")?;

        if let Some(lexeme) = self.peek()
           && lexeme.token == Token::Returns
        {
            if !self.pragmas.contains("returns") {
                let kind = ParseError::PragmaRequired { construct: "returns",
                                                        pragma:    "returns", };
                return self.fail(kind, lexeme.span());
            }
            self.advance();
        }

        let outer_depth = mem::take(&mut self.loop_depth);
        let body = self.parse_block()?;
        self.loop_depth = outer_depth;
        self.contexts.pop();

        Ok(Decl::Function(Rc::new(Function { name,
                                             params,
                                             body,
                                             span })))
    }

    /// Parses `struct Name { field, ... }`.
    fn parse_struct(&mut self) -> ParseResult<Decl> {
        self.expect(&Token::Struct, "'struct'")?;
        let (name, span) = self.parse_identifier("a struct name")?;
        self.contexts.push(struct_context(&name));

        self.expect(&Token::LBrace, "'{'")?;
        let fields = self.parse_params(&Token::RBrace, "'}'")?;
        self.contexts.pop();

        Ok(Decl::Struct(Rc::new(Struct { name, fields, span })))
    }

    /// Parses `return [expr]`.
    ///
    /// A `return` directly followed by `}` or the end of input returns `nil`.
    fn parse_return(&mut self) -> ParseResult<Decl> {
        let span = self.expect(&Token::Return, "'return'")?;

        let expr = if self.peek().is_none() || self.check(&Token::RBrace) {
            Expr::Constant { value: Literal::Nil,
                             span }
        } else {
            self.parse_expression()?
        };

        Ok(Decl::Return { expr, span })
    }

    /// Parses an `if` / `else if` / `else` chain into linked conditionals.
    fn parse_conditional(&mut self) -> ParseResult<Conditional> {
        let span = self.expect(&Token::If, "'if'")?;
        let cond = self.parse_expression()?;
        let body = self.parse_block()?;

        let orelse = if self.check(&Token::Else) {
            let else_span = self.expect(&Token::Else, "'else'")?;
            let next = if self.check(&Token::If) {
                self.enter(else_span)?;
                let next = self.parse_conditional()?;
                self.leave(1);
                next
            } else {
                Conditional { cond: None,
                              body: self.parse_block()?,
                              orelse: None,
                              span: else_span }
            };
            Some(Box::new(next))
        } else {
            None
        };

        Ok(Conditional { cond: Some(cond),
                         body,
                         orelse,
                         span })
    }

    /// Parses either loop form introduced by `for`:
    ///
    /// ```text
    /// for i = 0, i < 3, i += 1 { ... }
    /// for c in "abc" { ... }
    /// ```
    fn parse_for(&mut self) -> ParseResult<Decl> {
        let span = self.expect(&Token::For, "'for'")?;

        if matches!(self.peek().map(|l| &l.token), Some(Token::Identifier(_)))
           && matches!(self.peek_nth(1).map(|l| &l.token), Some(Token::In))
        {
            let (var, _) = self.parse_identifier("a loop variable")?;
            self.expect(&Token::In, "'in'")?;
            let expr = self.parse_expression()?;
            let body = self.parse_loop_body()?;
            return Ok(Decl::ForIn(ForInLoop { var, expr, body, span }));
        }

        let preloop = self.parse_loop_assign()?;
        self.expect(&Token::Comma, "','")?;
        let cond = self.parse_expression()?;
        self.expect(&Token::Comma, "','")?;
        let postloop = self.parse_loop_assign()?;
        let body = self.parse_loop_body()?;

        Ok(Decl::Loop(Loop { cond,
                             body,
                             preloop: Some(preloop),
                             postloop: Some(postloop),
                             span }))
    }

    /// Parses `while cond { body }`.
    fn parse_while(&mut self) -> ParseResult<Decl> {
        let span = self.expect(&Token::While, "'while'")?;
        let cond = self.parse_expression()?;
        let body = self.parse_loop_body()?;

        Ok(Decl::Loop(Loop { cond,
                             body,
                             preloop: None,
                             postloop: None,
                             span }))
    }

    fn parse_loop_assign(&mut self) -> ParseResult<Assign> {
        if !self.at_assignment() {
            return self.unexpected("an assignment");
        }
        self.parse_assign()
    }

    fn parse_loop_body(&mut self) -> ParseResult<Body> {
        self.loop_depth += 1;
        let body = self.parse_block()?;
        self.loop_depth -= 1;
        Ok(body)
    }

    /// Parses `break` or `continue`, which must sit inside a loop.
    fn parse_loop_control(&mut self) -> ParseResult<Decl> {
        let Some(lexeme) = self.advance() else {
            return self.unexpected("'break' or 'continue'");
        };
        let span = lexeme.span();
        let (keyword, decl) = match lexeme.token {
            Token::Break => ("break", Decl::Break(span)),
            _ => ("continue", Decl::Continue(span)),
        };

        if self.loop_depth == 0 {
            return self.fail(ParseError::LoopControlOutsideLoop(keyword), span);
        }
        Ok(decl)
    }

    /// Parses `import a.b`, `import a.b.*` or `import a.b.(x, y)`.
    ///
    /// `import pragma.<name>` activates a pragma instead of naming a library.
    fn parse_import(&mut self) -> ParseResult<Decl> {
        self.expect(&Token::Import, "'import'")?;

        let (first, mut span) = if self.check(&Token::Pragma) {
            let span = self.expect(&Token::Pragma, "'pragma'")?;
            (Import::PRAGMA.to_string(), span)
        } else {
            self.parse_identifier("a module name")?
        };
        let mut module = vec![first];
        let mut members = None;

        while self.eat(&Token::Dot) {
            match self.peek().map(|l| (l.token.clone(), l.span(), l.raw)) {
                Some((Token::Identifier(name), segment, _)) => {
                    self.advance();
                    span = span.to(segment);
                    module.push(name);
                },
                // Pragma names may be keywords, as in `import pragma.returns`.
                Some((_, segment, raw))
                    if module == [Import::PRAGMA]
                       && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
                {
                    self.advance();
                    span = span.to(segment);
                    module.push(raw.to_string());
                },
                Some((Token::Star, ..)) => {
                    self.advance();
                    members = Some(ImportMembers::All);
                    break;
                },
                Some((Token::LParen, ..)) => {
                    self.advance();
                    let names = self.parse_comma_separated(&Token::RParen, "')'", |p| {
                                        p.parse_identifier("a member name").map(|(name, _)| name)
                                    })?;
                    members = Some(ImportMembers::Named(names));
                    break;
                },
                _ => return self.unexpected("a module name, '*' or '('"),
            }
        }

        let import = Import { module, members, span };
        if import.is_pragma() {
            let name = match (&import.module[..], &import.members) {
                ([_, name], None) => name.clone(),
                _ => return self.fail(ParseError::UnknownPragma(import.path()), span),
            };
            self.activate_pragma(&name, span)?;
        }

        Ok(Decl::Import(import))
    }

    /// Parses `pragma "<name>"`, the string form of `import pragma.<name>`.
    fn parse_pragma(&mut self) -> ParseResult<Decl> {
        let span = self.expect(&Token::Pragma, "'pragma'")?;
        let Some((Token::Text(name), name_span)) = self.peek().map(|l| (l.token.clone(), l.span()))
        else {
            return self.unexpected("a pragma name");
        };
        self.advance();

        self.activate_pragma(&name, name_span)?;
        Ok(Decl::Import(Import { module: vec![Import::PRAGMA.to_string(), name],
                                 members: None,
                                 span: span.to(name_span) }))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{Decl, Expr, ImportMembers},
        error::{Error, ParseError},
        interpreter::parser::parse,
        source::Source,
    };

    fn decls(text: &str) -> Vec<Decl> {
        parse(&Source::anonymous(text)).unwrap().decls
    }

    fn parse_error(text: &str) -> Error {
        parse(&Source::anonymous(text)).unwrap_err()
    }

    #[test]
    fn compound_assignment_is_desugared() {
        let [Decl::Assign(assign)] = &decls("p.x ^= 2")[..] else {
            panic!("expected one assignment");
        };
        assert_eq!(assign.target.raw(), "p.x");
        assert_eq!(assign.value.to_string(), "(p.x ^ 2)");
    }

    #[test]
    fn else_if_chains_are_linked() {
        let [Decl::Conditional(cond)] = &decls("if a { } else if b { } else { x = 1 }")[..] else {
            panic!("expected one conditional");
        };
        let second = cond.orelse.as_deref().unwrap();
        let last = second.orelse.as_deref().unwrap();

        assert!(second.cond.is_some());
        assert!(last.cond.is_none());
        assert!(last.orelse.is_none());
        assert_eq!(last.body.decls.len(), 1);
    }

    #[test]
    fn for_loops_take_both_forms() {
        let parsed = decls("for i = 0, i < 3, i += 1 { }\nfor c in \"ab\" { }");

        assert!(matches!(&parsed[0], Decl::Loop(l) if l.preloop.is_some() && l.postloop.is_some()));
        assert!(matches!(&parsed[1], Decl::ForIn(f) if f.var == "c"));
    }

    #[test]
    fn loop_updates_must_be_assignments() {
        let err = parse_error("for i = 0, i < 3, i + 1 { }");
        assert!(matches!(err.parse_kind(), Some(ParseError::UnexpectedToken { .. })));
    }

    #[test]
    fn comments_become_declarations_only_in_statement_position() {
        let parsed = decls("// head\nx = 1 + /* inline */ 2\n/* tail */");

        assert!(matches!(&parsed[0], Decl::Comment { text, .. } if text == " head"));
        assert!(matches!(&parsed[1], Decl::Assign(_)));
        assert!(matches!(&parsed[2], Decl::Comment { text, .. } if text == " tail "));
    }

    #[test]
    fn bare_return_yields_nil() {
        let parsed = decls("func f() { return }");
        let Decl::Function(func) = &parsed[0] else {
            panic!("expected a function");
        };
        assert!(matches!(&func.body.decls[0],
                         Decl::Return { expr: Expr::Constant { .. }, .. }));
    }

    #[test]
    fn variadic_marker_must_be_last() {
        let err = parse_error("func f(a..., b) { }");
        assert_eq!(err.parse_kind(), Some(&ParseError::VariadicNotLast("a".into())));
        assert_eq!(err.diagnostic().context, "function 'f'");
    }

    #[test]
    fn loop_control_needs_an_enclosing_loop() {
        let err = parse_error("while true { func f() { break } }");
        assert_eq!(err.parse_kind(), Some(&ParseError::LoopControlOutsideLoop("break")));
        assert!(decls("while true { if x { continue } }").len() == 1);
    }

    #[test]
    fn returns_needs_its_pragma() {
        let err = parse_error("func f() returns { }");
        assert!(matches!(err.parse_kind(), Some(ParseError::PragmaRequired { .. })));

        let parsed = decls("import pragma.returns\nfunc f() returns { }");
        assert!(matches!(&parsed[0], Decl::Import(i) if i.is_pragma()));

        let parsed = decls("pragma \"returns\"\nfunc f() returns { }");
        assert!(matches!(&parsed[0], Decl::Import(i) if i.path() == "pragma.returns"));
    }

    #[test]
    fn unknown_pragmas_are_rejected() {
        let err = parse_error("import pragma.goto");
        assert_eq!(err.parse_kind(), Some(&ParseError::UnknownPragma("goto".into())));
    }

    #[test]
    fn imports_list_members() {
        let parsed = decls("import std.math.(sqrt, abs)\nimport std.io.*\nimport a");

        let Decl::Import(named) = &parsed[0] else { panic!("expected an import") };
        assert_eq!(named.path(), "std.math");
        assert_eq!(named.members,
                   Some(ImportMembers::Named(vec!["sqrt".into(), "abs".into()])));
        assert!(matches!(&parsed[1], Decl::Import(i) if i.members == Some(ImportMembers::All)));
        assert!(matches!(&parsed[2], Decl::Import(i) if i.members.is_none()));
    }

    #[test]
    fn indexed_targets_are_not_assignable() {
        let err = parse_error("a[0] = 1");
        assert_eq!(err.parse_kind(), Some(&ParseError::InvalidAssignmentTarget));
    }
}
