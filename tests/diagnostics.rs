use oxlang::{
    Error, Runtime, RuntimeConfig, Value,
    error::{LexError, ParseError, RuntimeError},
    interpreter::parser::MAX_NESTING,
};

fn failure(src: &str) -> Error {
    Runtime::new().execute(src)
                  .expect_err("script should fail")
}

fn runtime_kind(src: &str) -> RuntimeError {
    let err = failure(src);
    err.runtime_kind()
       .cloned()
       .unwrap_or_else(|| panic!("expected a runtime error, got:\n{err}"))
}

fn parse_kind(src: &str) -> ParseError {
    let err = failure(src);
    err.parse_kind()
       .cloned()
       .unwrap_or_else(|| panic!("expected a parse error, got:\n{err}"))
}

#[test]
fn undefined_variable_is_located_on_its_line() {
    let err = failure("a = 1\nb = 2\nc = foo + 1\nd = 4\ne = 5\n");
    let diagnostic = err.diagnostic();

    assert_eq!(err.runtime_kind(),
               Some(&RuntimeError::UndefinedVariable { name: "foo".to_string() }));
    assert_eq!(diagnostic.line, 2);
    assert_eq!(diagnostic.column, 4);
    assert_eq!(diagnostic.width, 3);
    assert_eq!(err.to_string(),
               "<stdin>, <global>, line 2, column 4: undefined variable: foo\nc = foo + 1\n    ^^^");
}

#[test]
fn runtime_errors_name_the_innermost_function() {
    let mut runtime = Runtime::new();
    let err = runtime.execute_named("main.ox", "func area(r) {\n    return foo * 2\n}\narea(1)")
                     .unwrap_err();

    assert_eq!(err.to_string(),
               "main.ox, function 'area', line 1, column 11: undefined variable: foo\n    return \
                foo * 2\n           ^^^");
}

#[test]
fn dotted_names_are_underlined_whole() {
    let err = failure("struct P { x }\np = P(1)\nq = p.y");

    assert_eq!(err.runtime_kind(),
               Some(&RuntimeError::UndefinedVariable { name: "p.y".to_string() }));
    assert_eq!(err.diagnostic().column, 4);
    assert_eq!(err.diagnostic().width, 3);
}

#[test]
fn columns_count_characters() {
    let err = failure("s = 'é' + foo");

    assert_eq!(err.diagnostic().column, 10);
    assert_eq!(err.diagnostic().width, 3);
}

#[test]
fn call_errors() {
    assert_eq!(runtime_kind("nope(1)"),
               RuntimeError::UndefinedFunction { name: "nope".to_string() });
    assert_eq!(runtime_kind("x = 1\nx()"),
               RuntimeError::NotCallable { name:      "x".to_string(),
                                           type_name: "integer", });
    assert_eq!(runtime_kind("func f(a, b) { }\nf(1)"),
               RuntimeError::ArityMismatch { name:     "f".to_string(),
                                             expected: 2,
                                             found:    1,
                                             variadic: false, });
}

#[test]
fn arity_messages_mention_variadics() {
    let err = failure("func g(a, rest...) { }\ng()");

    assert_eq!(err.diagnostic().message, "function or struct g expected at least 1 args, got 0");
    assert_eq!(err.diagnostic().width, 1);
}

#[test]
fn arguments_are_not_evaluated_on_arity_mismatch() {
    let err = failure("func f(a) { }\nf(1, missing)");

    assert!(matches!(err.runtime_kind(), Some(RuntimeError::ArityMismatch { .. })));
}

#[test]
fn operator_errors_point_at_the_operator() {
    let err = failure("x = 1 < 'a'");
    assert!(matches!(err.runtime_kind(), Some(RuntimeError::TypeMismatch { .. })));
    assert_eq!(err.diagnostic().column, 6);
    assert_eq!(err.diagnostic().width, 1);

    let err = failure("x = 4 / 0");
    assert_eq!(err.runtime_kind(), Some(&RuntimeError::DivisionByZero));
    assert_eq!(err.diagnostic().column, 6);
}

#[test]
fn subscript_errors_point_at_the_subscript() {
    let err = failure("x = [1, 2]\ny = x[5]");

    assert_eq!(err.runtime_kind(),
               Some(&RuntimeError::IndexOutOfBounds { index: 5, len: 2 }));
    assert_eq!(err.diagnostic().line, 1);
    assert_eq!(err.diagnostic().column, 6);
}

#[test]
fn for_in_needs_a_string_or_list() {
    let err = failure("for x in 5 {\n}");

    assert_eq!(err.runtime_kind(),
               Some(&RuntimeError::NotIterable { type_name: "integer" }));
    assert_eq!(err.diagnostic().column, 9);
}

#[test]
fn runaway_recursion_is_distinguished() {
    let config = RuntimeConfig::default().with_max_call_depth(20);
    let mut runtime = Runtime::with_config(config);
    let err = runtime.execute("func down(n) {\n    return down(n + 1)\n}\ndown(0)")
                     .unwrap_err();

    assert!(err.is_stack_exhausted());
    assert_eq!(err.runtime_kind(), Some(&RuntimeError::StackExhausted { depth: 20 }));
    assert_eq!(err.diagnostic().context, "function 'down'");
    assert!(err.to_string().contains("probably infinite recursion"));

    let err = failure("x = nope");
    assert!(!err.is_stack_exhausted());
}

#[test]
fn the_depth_bound_allows_calls_up_to_it() {
    let src = "func depth(n) {\n    if n == 0 { return 0 }\n    return 1 + depth(n - 1)\n}\nreturn \
               depth(9)";
    let mut runtime = Runtime::with_config(RuntimeConfig::default().with_max_call_depth(10));

    assert!(runtime.execute(src).is_ok());
}

#[test]
fn lex_errors() {
    let err = failure("x = 1\ny = @");

    assert!(matches!(err,
                     Error::Lex { kind: LexError::UnexpectedCharacter('@'),
                                  .. }));
    assert_eq!(err.diagnostic().line, 1);
    assert_eq!(err.diagnostic().column, 4);
    assert_eq!(err.diagnostic().context, "<global>");

    let err = failure("s = 'open");
    assert!(matches!(err,
                     Error::Lex { kind: LexError::UnterminatedString,
                                  .. }));

    let err = failure("x = 99999999999999999999");
    assert!(matches!(err,
                     Error::Lex { kind: LexError::LiteralTooLarge(_),
                                  .. }));
}

#[test]
fn parse_errors_name_the_open_declaration() {
    let err = failure("func broken(a) {\n    x = (1 +\n}");

    assert!(matches!(err.parse_kind(), Some(ParseError::UnexpectedToken { .. })));
    assert_eq!(err.diagnostic().context, "function 'broken'");
    assert_eq!(err.diagnostic().line, 2);
    assert_eq!(err.diagnostic().column, 0);

    let err = failure("struct Pair { a, 1 }");
    assert_eq!(err.diagnostic().context, "struct 'Pair'");

    let err = failure("x = (1 +");
    assert!(matches!(err.parse_kind(), Some(ParseError::UnexpectedEndOfInput { .. })));
}

#[test]
fn grammar_rules() {
    assert_eq!(parse_kind("x = 1 < 2 < 3"), ParseError::ChainedComparison);
    assert_eq!(parse_kind("f() = 1"), ParseError::InvalidAssignmentTarget);
    assert_eq!(parse_kind("break"), ParseError::LoopControlOutsideLoop("break"));
    assert_eq!(parse_kind("func f(a..., b) { }"),
               ParseError::VariadicNotLast("a".to_string()));
    assert_eq!(parse_kind("import pragma.goto"), ParseError::UnknownPragma("goto".to_string()));
}

#[test]
fn deep_nesting_is_rejected_instead_of_overflowing() {
    let too_deep = ParseError::NestingTooDeep { limit: MAX_NESTING };

    let chain = format!("x = 1{}", " + 1".repeat(5000));
    let err = failure(&chain);
    assert_eq!(err.parse_kind(), Some(&too_deep));
    assert_eq!(err.diagnostic().column, 6 + 4 * MAX_NESTING);

    let parens = format!("x = {}1{}", "(".repeat(5000), ")".repeat(5000));
    assert_eq!(parse_kind(&parens), too_deep);
    assert_eq!(parse_kind(&format!("x = {}1", "-".repeat(5000))), too_deep);
    assert_eq!(parse_kind(&format!("x = {}1{}", "[".repeat(5000), "]".repeat(5000))),
               too_deep);
    assert_eq!(parse_kind(&format!("if 0 {{ }}{}", " else if 0 { }".repeat(5000))), too_deep);
    assert_eq!(parse_kind(&format!("{}x = 1{}", "while 1 { ".repeat(5000), " }".repeat(5000))),
               too_deep);

    let shallow = format!("return 1{}", " + 1".repeat(150));
    assert_eq!(Runtime::new().execute(&shallow).unwrap(), Value::Integer(151));
}

#[test]
fn infinite_real_literals_are_rejected() {
    let err = failure("x = 1e400");

    assert!(matches!(err,
                     Error::Lex { kind: LexError::LiteralTooLarge(_),
                                  .. }));
    assert_eq!(err.diagnostic().column, 4);
    assert_eq!(err.diagnostic().width, 5);
}

#[test]
fn returns_without_its_pragma_names_both() {
    let err = failure("func f() returns {\n}");

    assert_eq!(err.parse_kind(),
               Some(&ParseError::PragmaRequired { construct: "returns",
                                                  pragma:    "returns", }));
    assert_eq!(err.diagnostic().column, 9);
    assert_eq!(err.diagnostic().width, 7);
}

#[test]
fn native_failures_are_located_at_the_call() {
    let mut runtime = Runtime::new();
    runtime.register("fail", &[], |_| Err(RuntimeError::Native("host said no".to_string())));
    let err = runtime.execute("x = 1\n  fail()").unwrap_err();

    assert_eq!(err.diagnostic().message, "host said no");
    assert_eq!(err.diagnostic().line, 1);
    assert_eq!(err.diagnostic().column, 2);
    assert_eq!(err.diagnostic().width, 4);
}
