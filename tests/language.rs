use std::fs;

use oxlang::{
    Runtime, Value, error::RuntimeError,
    interpreter::evaluator::function::core::BUILTIN_FUNCTIONS,
};
use walkdir::WalkDir;

/// A runtime with an `assert(condition)` native installed.
fn runtime() -> Runtime {
    let mut runtime = Runtime::new();
    runtime.register("assert", &["condition"], |args| match args {
               [condition] if condition.is_truthy() => Ok(Value::Nil),
               _ => Err(RuntimeError::Native("assertion failed".to_string())),
           });
    runtime
}

fn assert_success(src: &str) {
    if let Err(e) = runtime().execute(src) {
        panic!("Script failed:\n{e}");
    }
}

fn assert_failure(src: &str) {
    if runtime().execute(src).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

fn returned(src: &str) -> Value {
    runtime().execute(src)
             .unwrap_or_else(|e| panic!("Script failed:\n{e}"))
}

#[test]
fn script_fixtures_pass() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "ox"))
    {
        let path = entry.path();
        let code =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = runtime().execute_named(&path.display().to_string(), &code) {
            panic!("Script {path:?} failed:\n{e}");
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_success("x = 1 + 2\nassert(x == 3)");
    assert_success("x = 7 * 9\nassert(x == 63)");
    assert_success("x = 8 - 5\nassert(x == 3)");
    assert_success("x = 10 / 4\nassert(x == 2.5)");
    assert_success("x = 10 / 2\nassert(type(x) == 'real')");
}

#[test]
fn operator_precedence() {
    assert_eq!(returned("return 2 + 3 * 4"), Value::Integer(14));
    assert_eq!(returned("return (2 + 3) * 4"), Value::Integer(20));
    assert_eq!(returned("return 2 ^ 3 ^ 2"), Value::Integer(64));
    assert_eq!(returned("return -2 ^ 2"), Value::Integer(-4));
    assert_eq!(returned("return 2 ^ -1"), Value::Real(0.5));
    assert_eq!(returned("return !1 == 2"), Value::Bool(true));
    assert_eq!(returned("return 1 < 2 && 3 < 2 || true"), Value::Bool(true));
}

#[test]
fn compound_assignments() {
    assert_success("x = 1\nx += 2\nassert(x == 3)");
    assert_success("x = 9\nx -= 4\nassert(x == 5)");
    assert_success("x = 3\nx *= 3\nassert(x == 9)");
    assert_success("x = 9\nx /= 2\nassert(x == 4.5)");
    assert_success("x = 2\nx ^= 5\nassert(x == 32)");
}

#[test]
fn numbers_promote_and_check_overflow() {
    assert_eq!(returned("return 1 + 0.5"), Value::Real(1.5));
    assert_success("assert(1 == 1.0)\nassert(2 < 2.5)");
    assert_failure("x = 9223372036854775807 + 1");
    assert_failure("x = 1 / 0");
    assert_failure("x = 0 ^ -1");
}

#[test]
fn strings_and_lists() {
    assert_eq!(returned("return 'ox' + \"ide\""), Value::from("oxide"));
    assert_eq!(returned("return 'ab' * 3"), Value::from("ababab"));
    assert_eq!(returned("return len([1, 2] + [3])"), Value::Integer(3));
    assert_eq!(returned("return [0] * 2 == [0, 0]"), Value::Bool(true));
    assert_eq!(returned("return 'ox'[-1]"), Value::from("x"));
    assert_eq!(returned("m = [[1, 2], [3, 4]]\nreturn m[1][0] + m[0, 1]"), Value::Integer(5));
    assert_success("assert('abc' < 'abd')\nassert(str([1, 'a']) == '[1, \"a\"]')");
    assert_failure("x = [1][1]");
    assert_failure("x = 1 < 'a'");
    assert_failure("x = 'a' - 'b'");
}

#[test]
fn list_assignment_copies() {
    assert_success("a = [1, 2]\nb = a\nb = b + [3]\nassert(len(a) == 2)");
}

#[test]
fn logic_is_eager() {
    let src = "struct Counter { calls }
counter = Counter(0)
func bump() {
    counter.calls += 1
    return true
}
x = false && bump()
y = true || bump()
return counter.calls";
    assert_eq!(returned(src), Value::Integer(2));
}

#[test]
fn user_defined_functions_and_calls() {
    assert_success("func square(x) { return x * x }\nassert(square(5) == 25)");
    assert_success("func nothing() { x = 1 }\nassert(nothing() == nil)");
    assert_success("func early(x) {\n  if x { return 1 }\n  return 2\n}\nassert(early(true) == 1)\nassert(early(false) == 2)");
}

#[test]
fn functions_see_globals_and_keep_locals() {
    let src = "scale = 10
func scaled(x) {
    factor = scale
    return x * factor
}
y = scaled(2)";
    let mut runtime = runtime();
    runtime.execute(src).unwrap();

    assert_eq!(runtime.get("y"), Some(Value::Integer(20)));
    assert_eq!(runtime.get("factor"), None);
}

#[test]
fn recursion() {
    let src = "func fact(n) {
    if n <= 1 { return 1 }
    return n * fact(n - 1)
}
return fact(10)";
    assert_eq!(returned(src), Value::Integer(3_628_800));
}

#[test]
fn arity_is_checked() {
    assert_failure("func f(a, b) { }\nf(1)");
    assert_failure("func f(a, b) { }\nf(1, 2, 3)");
    assert_success("func f(a, b) { }\nf(1, 2)");
}

#[test]
fn variadic_parameters_collect_a_list() {
    let src = "func f(a, rest...) { return [a, rest] }
one = f(1)
three = f(1, 2, 3)";
    let mut runtime = runtime();
    runtime.execute(src).unwrap();

    assert_eq!(runtime.get("one").unwrap().to_string(), "[1, []]");
    assert_eq!(runtime.get("three").unwrap().to_string(), "[1, [2, 3]]");
    assert_failure("func f(a, rest...) { }\nf()");
}

#[test]
fn structs_build_records() {
    let mut runtime = runtime();
    runtime.execute("struct Point { x, y }\np = Point(1, 2)").unwrap();
    assert_eq!(runtime.get("p.x"), Some(Value::Integer(1)));
    assert_eq!(runtime.get("p.y"), Some(Value::Integer(2)));

    runtime.execute("p.x = 9").unwrap();
    assert_eq!(runtime.get("p.x"), Some(Value::Integer(9)));
    assert_eq!(runtime.get("p").unwrap().to_string(), "{x: 9, y: 2}");

    runtime.execute("p.z = 'new'\nq = p\nq.x = 0").unwrap();
    assert_eq!(runtime.get("p.z"), Some(Value::from("new")));
    assert_eq!(runtime.get("p.x"), Some(Value::Integer(9)));
}

#[test]
fn nested_records_and_field_subscripts() {
    assert_success("struct Box { inner }\nstruct Pair { a, b }\nb = Box(Pair(1, 2))\nb.inner.a = 5\nassert(b.inner.a == 5)\nassert(b['inner']['b'] == 2)");
    assert_failure("x = 1\nx.y = 2");
    assert_failure("missing.y = 2");
    assert_failure("struct P { a }\np = P(1)\nq = p['b']");
}

#[test]
fn if_else_chains() {
    let src = "func sign(x) {
    if x < 0 {
        return -1
    } else if x == 0 {
        return 0
    } else {
        return 1
    }
}
return [sign(-5), sign(0), sign(3)]";
    assert_eq!(returned(src).to_string(), "[-1, 0, 1]");
}

#[test]
fn c_style_loop_runs_four_times() {
    let mut runtime = runtime();
    runtime.execute("seen = []\nfor i = 0, i <= 3, i += 1 { seen = seen + [i] }").unwrap();

    assert_eq!(runtime.get("seen").unwrap().to_string(), "[0, 1, 2, 3]");
}

#[test]
fn break_and_continue() {
    let src = "runs = 0
for i = 0, i <= 3, i += 1 {
    runs += 1
    if i == 1 { break }
}
return runs";
    assert_eq!(returned(src), Value::Integer(2));

    let src = "odd = []
for i = 0, i < 6, i += 1 {
    if i == 0 || i == 2 || i == 4 { continue }
    odd = odd + [i]
}
return odd";
    assert_eq!(returned(src).to_string(), "[1, 3, 5]");
}

#[test]
fn break_only_leaves_the_innermost_loop() {
    let src = "pairs = 0
for i = 0, i < 3, i += 1 {
    for j = 0, j < 3, j += 1 {
        if j == 1 { break }
        pairs += 1
    }
}
return pairs";
    assert_eq!(returned(src), Value::Integer(3));
}

#[test]
fn while_loops() {
    assert_success("n = 0\nwhile n < 5 { n += 1 }\nassert(n == 5)");
    assert_success("n = 0\nwhile true {\n  n += 1\n  if n == 3 { break }\n}\nassert(n == 3)");
}

#[test]
fn for_in_iterates_lists_and_strings() {
    assert_eq!(returned("total = 0\nfor x in [1, 2, 3] { total += x }\nreturn total"),
               Value::Integer(6));
    assert_eq!(returned("out = ''\nfor c in 'abc' { out = c + out }\nreturn out"),
               Value::from("cba"));
    assert_failure("for x in 5 { }");
}

#[test]
fn loop_control_outside_loops_is_rejected() {
    assert_failure("break");
    assert_failure("if true { continue }");
}

#[test]
fn builtins() {
    assert_success("assert(len('größe') == 5)");
    assert_success("assert(str(2.0) == '2.0')");
    assert_success("assert(type(nil) == 'nil')\nassert(type(len) == 'native function')");
    assert_success("func f() { }\nstruct S { a }\nassert(type(f) == 'function')\nassert(type(S) == 'struct')");
    assert_failure("len(1, 2)");
}

#[test]
fn calling_non_callables_fails() {
    assert_failure("x = 1\nx()");
    assert_failure("nope()");
}

#[test]
fn unknown_variable_is_error() {
    assert_failure("y = x + 1");
}

#[test]
fn comments_are_ignored() {
    assert_success("// leading\nx = 1 /* inline */ + 1\n/* multi\nline */\nassert(x == 2)");
}

#[test]
fn returns_pragma() {
    assert_success("import pragma.returns\nfunc f() returns { return 1 }\nassert(f() == 1)");
    assert_success("pragma \"returns\"\nfunc f() returns { return 1 }\nassert(f() == 1)");
    assert_failure("func f() returns { return 1 }");
}

#[test]
fn globals_persist_until_reset() {
    let mut runtime = runtime();
    runtime.execute("x = 41").unwrap();
    assert_eq!(runtime.execute("return x + 1").unwrap(), Value::Integer(42));

    runtime.reset();
    assert_eq!(runtime.get("x"), None);
    assert!(runtime.get("print").is_some());
    assert!(runtime.execute("assert(true)").is_ok());
}

#[test]
fn fresh_namespaces_hold_only_the_builtins() {
    let mut runtime = Runtime::new();
    let names: Vec<&str> = runtime.globals().keys().map(String::as_str).collect();
    assert_eq!(names, BUILTIN_FUNCTIONS);

    runtime.register("host", &[], |_| Ok(Value::Nil));
    runtime.execute("x = 1").unwrap();
    runtime.reset();

    let names: Vec<&str> = runtime.globals().keys().map(String::as_str).collect();
    assert_eq!(names.len(), BUILTIN_FUNCTIONS.len() + 1);
    assert!(BUILTIN_FUNCTIONS.iter().all(|name| names.contains(name)));
    assert!(names.contains(&"host"));
}

#[test]
fn repetition_is_bounded() {
    assert_eq!(returned("return len('ab' * 3) + len([1] * -2)"), Value::Integer(6));
    assert_eq!(returned("return len('' * 4611686018427387904)"), Value::Integer(0));

    let overflow = |src: &str| {
        let err = runtime().execute(src).expect_err("repetition should fail");
        assert_eq!(err.runtime_kind(), Some(&RuntimeError::Overflow), "{err}");
    };
    overflow("x = \"ab\" * 4611686018427387904");
    overflow("x = 4611686018427387904 * [1, 2]");
    overflow("x = 'a' * 16777217");
}

#[test]
fn failed_units_keep_earlier_assignments() {
    let mut runtime = runtime();
    assert!(runtime.execute("a = 1\nb = nope\nc = 3").is_err());

    assert_eq!(runtime.get("a"), Some(Value::Integer(1)));
    assert_eq!(runtime.get("c"), None);
}

#[test]
fn parse_errors_run_nothing() {
    let mut runtime = runtime();
    assert!(runtime.execute("a = 1\nb = (").is_err());

    assert_eq!(runtime.get("a"), None);
}

#[test]
fn natives_receive_flat_arguments() {
    let mut runtime = runtime();
    runtime.register("sum", &["values..."], |args| {
               let mut total = 0;
               for arg in args {
                   match arg {
                       Value::Integer(n) => total += n,
                       other => {
                           return Err(RuntimeError::mismatch(format!("can't sum {}",
                                                                     other.type_name())));
                       },
                   }
               }
               Ok(Value::Integer(total))
           });

    assert_eq!(runtime.execute("return sum(1, 2, 3)").unwrap(), Value::Integer(6));
    assert_eq!(runtime.execute("return sum()").unwrap(), Value::Integer(0));
    assert!(runtime.execute("return sum(1, 'a')").is_err());
}
