use std::io::{self, Write};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::usize_to_i64_checked,
};

/// Joins values with single spaces, in their display form.
fn join(args: &[Value]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes the arguments to standard output, separated by spaces, without a
/// trailing newline.
///
/// # Example
/// ```
/// use oxlang::interpreter::{evaluator::function::builtin::print, value::core::Value};
///
/// assert_eq!(print(&[]).unwrap(), Value::Nil);
/// ```
pub fn print(args: &[Value]) -> EvalResult<Value> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", join(args)).and_then(|()| stdout.flush())
                                    .map_err(|e| RuntimeError::Native(e.to_string()))?;
    Ok(Value::Nil)
}

/// Writes the arguments to standard output, separated by spaces, followed by
/// a newline.
pub fn println(args: &[Value]) -> EvalResult<Value> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", join(args)).map_err(|e| RuntimeError::Native(e.to_string()))?;
    Ok(Value::Nil)
}

/// Returns the number of characters of a string, elements of a list or fields
/// of a record.
///
/// # Example
/// ```
/// use oxlang::interpreter::{evaluator::function::builtin::len, value::core::Value};
///
/// assert_eq!(len(&[Value::from("größe")]).unwrap(), Value::Integer(5));
/// assert!(len(&[Value::Integer(5)]).is_err());
/// ```
pub fn len(args: &[Value]) -> EvalResult<Value> {
    let count = match args {
        [Value::Text(text)] => text.chars().count(),
        [Value::List(items)] => items.len(),
        [Value::Record(fields)] => fields.len(),
        [other] => {
            return Err(RuntimeError::mismatch(format!("len() of {}", other.type_name())));
        },
        _ => return Err(arity("len", 1, args.len())),
    };

    usize_to_i64_checked(count).map(Value::Integer)
}

/// Converts a value to its display form.
pub fn str(args: &[Value]) -> EvalResult<Value> {
    match args {
        [value] => Ok(Value::from(value.to_string())),
        _ => Err(arity("str", 1, args.len())),
    }
}

/// Returns the name of a value's type.
///
/// # Example
/// ```
/// use oxlang::interpreter::{evaluator::function::builtin::type_of, value::core::Value};
///
/// assert_eq!(type_of(&[Value::Nil]).unwrap(), Value::from("nil"));
/// ```
pub fn type_of(args: &[Value]) -> EvalResult<Value> {
    match args {
        [value] => Ok(Value::from(value.type_name())),
        _ => Err(arity("type", 1, args.len())),
    }
}

/// Arity failure for builtins called directly from host code.
fn arity(name: &str, expected: usize, found: usize) -> RuntimeError {
    RuntimeError::ArityMismatch { name: name.to_string(),
                                  expected,
                                  found,
                                  variadic: false }
}
