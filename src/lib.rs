//! # oxlang
//!
//! oxlang is an interpreter for ox, a small imperative scripting language.
//! It tokenizes and parses ox source into an AST and executes it with a
//! tree-walking evaluator supporting functions, structs, variadic calls,
//! loops, library imports and host-registered native functions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed code.
///
/// This module declares the expression and declaration types that represent
/// ox source as a tree. The AST is built by the parser and traversed by the
/// evaluator, and prints back to parseable source.
///
/// # Responsibilities
/// - Defines expression and declaration types for all language constructs.
/// - Attaches source spans to every node for error reporting.
/// - Re-serializes nodes to source text.
pub mod ast;
/// Runtime configuration.
///
/// Library roots searched by `import` and the bound on nested calls.
pub mod config;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines every failure that can be raised while executing ox
/// source, and the caret diagnostic that locates it.
///
/// # Responsibilities
/// - Defines error kinds for all failure modes (lexer, parser, evaluator).
/// - Renders the file, declaration context, line, column and caret span.
/// - Lets hosts tell runaway recursion apart from other failures.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and value
/// representations to provide a complete runtime for ox source.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator and value types.
/// - Provides entry points for parsing and executing source units.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Source units.
///
/// Pairs source text with the name it is reported under and maps byte
/// offsets back to lines and columns.
pub mod source;
/// General utilities for safe numeric conversion.
///
/// This module provides conversions between `i64`, `usize` and `f64` and
/// index resolution used throughout the evaluator.
pub mod util;

pub use crate::{
    config::RuntimeConfig,
    error::Error,
    interpreter::{evaluator::core::Runtime, value::core::Value},
};

/// Executes source text in a fresh runtime.
///
/// This is a shorthand for creating a [`Runtime`] with the default
/// configuration and calling [`Runtime::execute`] once.
///
/// # Examples
/// ```
/// use oxlang::{Value, execute};
///
/// let source = "func square(x) { return x * x }\nreturn square(7)";
/// assert_eq!(execute(source).unwrap(), Value::Integer(49));
///
/// // Example with an intentional error (unknown variable).
/// let err = execute("y = x + 1").unwrap_err();
/// assert!(err.to_string().contains("undefined variable: x"));
/// ```
pub fn execute(source: &str) -> Result<Value, Error> {
    Runtime::new().execute(source)
}
